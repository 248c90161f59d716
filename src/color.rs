use crate::Scalar;
use bytemuck::{Pod, Zeroable};
use std::{fmt, str::FromStr};

/// Straight (not pre-multiplied) alpha sRGB color with 8-bit channels.
///
/// Memory layout is `[r, g, b, a]`, so a slice of colors can be viewed as
/// an RGBA8 byte buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Rgba([u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn red(self) -> u8 {
        self.0[0]
    }

    pub const fn green(self) -> u8 {
        self.0[1]
    }

    pub const fn blue(self) -> u8 {
        self.0[2]
    }

    pub const fn alpha(self) -> u8 {
        self.0[3]
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        self.0
    }

    pub const fn to_rgb(self) -> [u8; 3] {
        let [r, g, b, _] = self.0;
        [r, g, b]
    }

    /// Replace alpha component of the color
    pub const fn with_alpha(self, alpha: u8) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, alpha])
    }

    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    /// Linear interpolation between `self` and `other`.
    ///
    /// Channels are truncated towards zero and the result is always opaque,
    /// `t` is expected to be within `[0, 1]`.
    pub fn blend(self, other: Self, t: Scalar) -> Self {
        let mix = |c0: u8, c1: u8| {
            let c0 = c0 as Scalar;
            (c0 + (c1 as Scalar - c0) * t) as u8
        };
        Self([
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
            255,
        ])
    }

    /// Multiply color channels by `factor` (truncated), alpha is preserved.
    pub fn scale(self, factor: Scalar) -> Self {
        let scale = |c: u8| (c as Scalar * factor) as u8;
        Self([
            scale(self.red()),
            scale(self.green()),
            scale(self.blue()),
            self.alpha(),
        ])
    }

    /// Composite `other` on top of this color (source-over)
    pub fn blend_over(self, other: Self) -> Self {
        match other.alpha() {
            255 => return other,
            0 => return self,
            _ => {}
        }
        let src_a = other.alpha() as f32 / 255.0;
        let dst_a = self.alpha() as f32 / 255.0 * (1.0 - src_a);
        let out_a = src_a + dst_a;
        let mix = |src: u8, dst: u8| {
            ((src as f32 * src_a + dst as f32 * dst_a) / out_a + 0.5).min(255.0) as u8
        };
        Self([
            mix(other.red(), self.red()),
            mix(other.green(), self.green()),
            mix(other.blue(), self.blue()),
            (out_a * 255.0 + 0.5) as u8,
        ])
    }

    /// Calculate LUMA of the color.
    pub fn luma(self) -> f32 {
        let [r, g, b] = self.to_rgb();
        0.2126 * (r as f32 / 255.0) + 0.7152 * (g as f32 / 255.0) + 0.0722 * (b as f32 / 255.0)
    }

    /// Pick color that produces the best contrast with self
    pub fn best_contrast(self, c0: Self, c1: Self) -> Self {
        let luma = self.luma();
        if (luma - c0.luma()).abs() < (luma - c1.luma()).abs() {
            c1
        } else {
            c0
        }
    }
}

impl From<[u8; 3]> for Rgba {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgba::rgb(r, g, b)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(rgba: [u8; 4]) -> Self {
        Rgba(rgba)
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [bg_r, bg_g, bg_b] = self.to_rgb();
        let [fg_r, fg_g, fg_b] = self.best_contrast(Rgba::WHITE, Rgba::BLACK).to_rgb();
        write!(
            fmt,
            "\x1b[38;2;{};{};{};48;2;{};{};{}m",
            fg_r, fg_g, fg_b, bg_r, bg_g, bg_b
        )?;
        write!(fmt, "{}", self)?;
        write!(fmt, "\x1b[m")
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        if color.starts_with('#') && (color.len() == 7 || color.len() == 9) {
            // #RRGGBB(AA)
            let bytes: &[u8] = color[1..].as_ref();
            let digit = |byte| match byte {
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'0'..=b'9' => Ok(byte - b'0'),
                _ => Err(ColorError::HexExpected),
            };
            let mut hex = bytes
                .chunks(2)
                .map(|pair| Ok(digit(pair[0])? << 4 | digit(pair[1])?));
            Ok(Rgba::new(
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(255))?,
            ))
        } else {
            Err(ColorError::HexExpected)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        /// Either `"#rrggbb(aa)"` or `[r, g, b]`
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum RgbaRepr {
            Hex(String),
            Triple([u8; 3]),
        }

        match RgbaRepr::deserialize(deserializer)? {
            RgbaRepr::Hex(hex) => hex.parse().map_err(serde::de::Error::custom),
            RgbaRepr::Triple(rgb) => Ok(rgb.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ColorError {
    HexExpected,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB(AA) in hexidemical format")
            }
        }
    }
}

impl std::error::Error for ColorError {}
