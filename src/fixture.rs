//! Fixture descriptions: validated [`FixtureSpec`] and its loose, text-friendly
//! counterpart [`FixtureDesc`].
use crate::{CANVAS_SIZE, ICON_PADDING, Rgba};
use std::{borrow::Cow, fmt, str::FromStr};

/// Kind of the fixture body, without parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Oval,
    Square,
    AdvancedGrid,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Oval,
        ShapeKind::Square,
        ShapeKind::AdvancedGrid,
    ];

    /// Short tag used in catalog files
    pub fn tag(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Oval => "oval",
            ShapeKind::Square => "square",
            ShapeKind::AdvancedGrid => "adv",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for ShapeKind {
    type Err = SpecError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| SpecError::InvalidShape(tag.to_owned()))
    }
}

/// Fixture body together with the parameters it needs, all sizes are in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Circle { radius: u32 },
    Oval { width: u32, height: u32 },
    Square { size: u32 },
    AdvancedGrid { width: u32, height: u32 },
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Oval { .. } => ShapeKind::Oval,
            Shape::Square { .. } => ShapeKind::Square,
            Shape::AdvancedGrid { .. } => ShapeKind::AdvancedGrid,
        }
    }

    /// Largest accepted parameter, anything bigger is far outside of the canvas
    pub const MAX_EXTENT: u32 = 4 * CANVAS_SIZE as u32;

    /// Check that the shape survives icon padding with its interior detail intact,
    /// and that it is small enough for pixel arithmetic to stay in range.
    fn validate(&self) -> Result<(), String> {
        let pad = ICON_PADDING as u32;
        // (parameter name, value, smallest accepted value)
        let params = match *self {
            Shape::Circle { radius } => vec![("radius", radius, pad + 1)],
            Shape::Oval { width, height } => {
                vec![("width", width, 2 * pad + 2), ("height", height, 2 * pad + 2)]
            }
            // three cells with 1px gaps and a 2px margin
            Shape::Square { size } => vec![("size", size, 2 * pad + 4)],
            // 4px margin and two 2px gutters around three panels
            Shape::AdvancedGrid { width, height } => {
                vec![("width", width, 2 * pad + 12), ("height", height, 2 * pad + 12)]
            }
        };
        for (name, value, min) in params {
            if value == 0 {
                return Err(format!("{} {} must be positive", self.kind(), name));
            }
            if value < min {
                return Err(format!(
                    "{} {} {} is too small, at least {} is required",
                    self.kind(),
                    name,
                    value,
                    min
                ));
            }
            if value > Self::MAX_EXTENT {
                return Err(format!(
                    "{} {} {} is too large, at most {} is allowed",
                    self.kind(),
                    name,
                    value,
                    Self::MAX_EXTENT
                ));
            }
        }
        Ok(())
    }
}

/// Immutable, validated description of a single fixture
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixtureSpec {
    identifier: Cow<'static, str>,
    shape: Shape,
    housing: Rgba,
    center: Rgba,
    label: Cow<'static, str>,
}

impl FixtureSpec {
    /// Create fixture spec, colors are forced to be opaque.
    pub fn new(
        identifier: impl Into<Cow<'static, str>>,
        shape: Shape,
        housing: Rgba,
        center: Rgba,
        label: impl Into<Cow<'static, str>>,
    ) -> Result<Self, SpecError> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(SpecError::malformed(identifier, "identifier is empty"));
        }
        if let Err(reason) = shape.validate() {
            return Err(SpecError::malformed(identifier, reason));
        }
        Ok(Self {
            identifier,
            shape,
            housing: housing.with_alpha(255),
            center: center.with_alpha(255),
            label: label.into(),
        })
    }

    /// Constant constructor for built-in fixtures, validation is left to tests.
    pub(crate) const fn builtin(
        identifier: &'static str,
        shape: Shape,
        housing: [u8; 3],
        center: [u8; 3],
        label: &'static str,
    ) -> Self {
        let [hr, hg, hb] = housing;
        let [cr, cg, cb] = center;
        Self {
            identifier: Cow::Borrowed(identifier),
            shape,
            housing: Rgba::rgb(hr, hg, hb),
            center: Rgba::rgb(cr, cg, cb),
            label: Cow::Borrowed(label),
        }
    }

    /// Unique name, used as output file stem
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Color of the fixture body
    pub fn housing(&self) -> Rgba {
        self.housing
    }

    /// Color of the light source
    pub fn center(&self) -> Rgba {
        self.center
    }

    /// Human readable name, never rendered
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Unvalidated fixture description as it appears in catalog files.
///
/// Only parameters relevant to `shape` may be present.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixtureDesc {
    pub name: String,
    pub shape: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub shape_r: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub oval_w: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub oval_h: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub sq_size: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub adv_w: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub adv_h: Option<i64>,
    pub housing: Rgba,
    #[cfg_attr(feature = "serde", serde(rename = "centre"))]
    pub center: Rgba,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
}

impl FixtureDesc {
    /// Parameters of the description that are set, by catalog field name
    fn params(&self) -> impl Iterator<Item = (&'static str, i64)> {
        [
            ("shape_r", self.shape_r),
            ("oval_w", self.oval_w),
            ("oval_h", self.oval_h),
            ("sq_size", self.sq_size),
            ("adv_w", self.adv_w),
            ("adv_h", self.adv_h),
        ]
        .into_iter()
        .filter_map(|(name, value)| Some((name, value?)))
    }

    fn param(&self, name: &'static str) -> Result<u32, SpecError> {
        let value = self
            .params()
            .find_map(|(param, value)| (param == name).then_some(value))
            .ok_or_else(|| SpecError::malformed(&self.name, format!("{} is missing", name)))?;
        if value <= 0 {
            return Err(SpecError::malformed(
                &self.name,
                format!("{} must be positive, got {}", name, value),
            ));
        }
        u32::try_from(value)
            .map_err(|_| SpecError::malformed(&self.name, format!("{} is too large", name)))
    }
}

impl TryFrom<&FixtureDesc> for FixtureSpec {
    type Error = SpecError;

    fn try_from(desc: &FixtureDesc) -> Result<Self, Self::Error> {
        let kind: ShapeKind = desc.shape.parse()?;
        let shape = match kind {
            ShapeKind::Circle => Shape::Circle {
                radius: desc.param("shape_r")?,
            },
            ShapeKind::Oval => Shape::Oval {
                width: desc.param("oval_w")?,
                height: desc.param("oval_h")?,
            },
            ShapeKind::Square => Shape::Square {
                size: desc.param("sq_size")?,
            },
            ShapeKind::AdvancedGrid => Shape::AdvancedGrid {
                width: desc.param("adv_w")?,
                height: desc.param("adv_h")?,
            },
        };
        let expected: &[&str] = match kind {
            ShapeKind::Circle => &["shape_r"],
            ShapeKind::Oval => &["oval_w", "oval_h"],
            ShapeKind::Square => &["sq_size"],
            ShapeKind::AdvancedGrid => &["adv_w", "adv_h"],
        };
        if let Some((name, _)) = desc.params().find(|(name, _)| !expected.contains(name)) {
            return Err(SpecError::malformed(
                &desc.name,
                format!("{} does not apply to {} shape", name, kind),
            ));
        }
        FixtureSpec::new(
            desc.name.clone(),
            shape,
            desc.housing,
            desc.center,
            desc.label.clone(),
        )
    }
}

impl From<&FixtureSpec> for FixtureDesc {
    fn from(spec: &FixtureSpec) -> Self {
        let mut desc = FixtureDesc {
            name: spec.identifier.to_string(),
            shape: spec.shape.kind().tag().to_owned(),
            housing: spec.housing,
            center: spec.center,
            label: spec.label.to_string(),
            ..Default::default()
        };
        match spec.shape {
            Shape::Circle { radius } => desc.shape_r = Some(radius.into()),
            Shape::Oval { width, height } => {
                desc.oval_w = Some(width.into());
                desc.oval_h = Some(height.into());
            }
            Shape::Square { size } => desc.sq_size = Some(size.into()),
            Shape::AdvancedGrid { width, height } => {
                desc.adv_w = Some(width.into());
                desc.adv_h = Some(height.into());
            }
        }
        desc
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Shape tag is not one of the supported kinds
    InvalidShape(String),
    /// Required parameter is missing, out of range or does not match the shape
    MalformedSpec { identifier: String, reason: String },
}

impl SpecError {
    pub(crate) fn malformed(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        SpecError::MalformedSpec {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::InvalidShape(tag) => write!(
                f,
                "Unknown shape: {:?}, expected one of circle, oval, square, adv",
                tag
            ),
            SpecError::MalformedSpec { identifier, reason } => {
                write!(f, "Malformed fixture {:?}: {}", identifier, reason)
            }
        }
    }
}

impl std::error::Error for SpecError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(shape: &str) -> FixtureDesc {
        FixtureDesc {
            name: "SGL_Test".to_owned(),
            shape: shape.to_owned(),
            housing: Rgba::rgb(60, 60, 60),
            center: Rgba::rgb(255, 210, 100),
            label: "Test".to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_shape_kind_tags() -> Result<(), SpecError> {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.tag().parse::<ShapeKind>()?, kind);
        }
        assert_eq!(
            "hexagon".parse::<ShapeKind>(),
            Err(SpecError::InvalidShape("hexagon".to_owned()))
        );
        assert!("Circle".parse::<ShapeKind>().is_err());
        Ok(())
    }

    #[test]
    fn test_spec_new() -> Result<(), SpecError> {
        let spec = FixtureSpec::new(
            "SGL_SodiumLamp",
            Shape::Oval {
                width: 52,
                height: 38,
            },
            Rgba::new(25, 20, 15, 10),
            Rgba::rgb(255, 140, 30),
            "Sodium",
        )?;
        assert_eq!(spec.identifier(), "SGL_SodiumLamp");
        assert_eq!(spec.shape().kind(), ShapeKind::Oval);
        assert_eq!(spec.housing(), Rgba::rgb(25, 20, 15));
        assert_eq!(spec.label(), "Sodium");
        Ok(())
    }

    #[test]
    fn test_spec_rejects_bad_params() {
        let housing = Rgba::rgb(1, 2, 3);
        let bad = [
            Shape::Circle { radius: 0 },
            Shape::Circle { radius: 4 },
            Shape::Oval {
                width: 52,
                height: 0,
            },
            Shape::Square { size: 11 },
            Shape::AdvancedGrid {
                width: 56,
                height: 19,
            },
            Shape::Circle { radius: 40_000 },
            Shape::Circle { radius: u32::MAX },
            Shape::Square { size: 100_000 },
            Shape::Oval {
                width: 52,
                height: Shape::MAX_EXTENT + 1,
            },
        ];
        for shape in bad {
            let err = FixtureSpec::new("bad", shape, housing, housing, "");
            assert!(
                matches!(err, Err(SpecError::MalformedSpec { .. })),
                "{:?}",
                shape
            );
        }
        let ok = [
            Shape::Circle { radius: 5 },
            Shape::Square { size: 12 },
            Shape::AdvancedGrid {
                width: 20,
                height: 20,
            },
            Shape::Circle {
                radius: Shape::MAX_EXTENT,
            },
        ];
        for shape in ok {
            assert!(FixtureSpec::new("ok", shape, housing, housing, "").is_ok());
        }
        assert!(matches!(
            FixtureSpec::new("", Shape::Circle { radius: 26 }, housing, housing, ""),
            Err(SpecError::MalformedSpec { .. })
        ));
    }

    #[test]
    fn test_desc_to_spec() -> Result<(), SpecError> {
        let mut circle = desc("circle");
        circle.shape_r = Some(26);
        let spec = FixtureSpec::try_from(&circle)?;
        assert_eq!(spec.shape(), Shape::Circle { radius: 26 });
        assert_eq!(FixtureDesc::from(&spec), circle);

        let mut grid = desc("adv");
        grid.adv_w = Some(56);
        grid.adv_h = Some(48);
        let spec = FixtureSpec::try_from(&grid)?;
        assert_eq!(
            spec.shape(),
            Shape::AdvancedGrid {
                width: 56,
                height: 48
            }
        );
        Ok(())
    }

    #[test]
    fn test_desc_errors() {
        let unknown = desc("triangle");
        assert_eq!(
            FixtureSpec::try_from(&unknown),
            Err(SpecError::InvalidShape("triangle".to_owned()))
        );

        let missing = desc("oval");
        let err = FixtureSpec::try_from(&missing).unwrap_err();
        assert!(err.to_string().contains("oval_w is missing"), "{}", err);

        let mut negative = desc("square");
        negative.sq_size = Some(-48);
        let err = FixtureSpec::try_from(&negative).unwrap_err();
        assert!(err.to_string().contains("must be positive"), "{}", err);

        let mut mixed = desc("circle");
        mixed.shape_r = Some(26);
        mixed.oval_w = Some(40);
        let err = FixtureSpec::try_from(&mixed).unwrap_err();
        assert!(
            matches!(&err, SpecError::MalformedSpec { identifier, .. } if identifier == "SGL_Test")
        );
        assert!(err.to_string().contains("oval_w does not apply"), "{}", err);

        let mut huge = desc("circle");
        huge.shape_r = Some(u32::MAX.into());
        let err = FixtureSpec::try_from(&huge).unwrap_err();
        assert!(err.to_string().contains("too large"), "{}", err);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_desc_json() -> Result<(), Box<dyn std::error::Error>> {
        let desc: FixtureDesc = serde_json::from_str(
            r##"{
                "name": "SGL_SodiumLamp",
                "shape": "oval",
                "oval_w": 52,
                "oval_h": 38,
                "housing": [25, 20, 15],
                "centre": "#ff8c1e",
                "label": "Sodium"
            }"##,
        )?;
        let spec = FixtureSpec::try_from(&desc)?;
        assert_eq!(
            spec.shape(),
            Shape::Oval {
                width: 52,
                height: 38
            }
        );
        assert_eq!(spec.center(), Rgba::rgb(255, 140, 30));

        let json = serde_json::to_value(FixtureDesc::from(&spec))?;
        assert_eq!(json["centre"], "#ff8c1e");
        assert!(json.get("shape_r").is_none());
        Ok(())
    }
}
