//! Radial light bloom built from stacked translucent discs.
use crate::{BBox, ImageMut, Point, Rgba, Scalar, draw::fill_ellipse};

/// Number of discs used by default glow
pub const GLOW_STEPS: usize = 12;

/// Single disc of the glow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlowLayer {
    /// Radius of the disc in pixels
    pub radius: i32,
    /// Disc color, alpha encodes layer opacity
    pub color: Rgba,
}

/// Discs that make up a glow of `radius` pixels, outermost first.
///
/// Step `i` goes from `steps` down to `1` with `t = i / steps`. The disc radius
/// is `round(radius * t)`, alpha is `round(200 * (1 - t)^1.5 + 30)` which keeps
/// every layer in `[30, 230]`, and the color fades towards black by `0.6 * t`.
pub fn glow_layers(color: Rgba, radius: i32, steps: usize) -> impl Iterator<Item = GlowLayer> {
    let radius = radius.max(0) as Scalar;
    (1..=steps).rev().map(move |i| {
        let t = i as Scalar / steps as Scalar;
        let alpha = (200.0 * (1.0 - t).powf(1.5) + 30.0).round() as u8;
        GlowLayer {
            radius: (radius * t).round() as i32,
            color: color.blend(Rgba::BLACK, t * 0.6).with_alpha(alpha),
        }
    })
}

/// Paint glow around `center` with the painter's algorithm
pub fn paint_glow<I>(img: &mut I, center: Point, color: Rgba, radius: i32, steps: usize)
where
    I: ImageMut<Pixel = Rgba> + ?Sized,
{
    for layer in glow_layers(color, radius, steps) {
        fill_ellipse(
            img,
            BBox::centered(center, layer.radius, layer.radius),
            layer.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Image, ImageOwned};

    const AMBER: Rgba = Rgba::rgb(255, 210, 100);

    #[test]
    fn test_layers_order() {
        let layers: Vec<_> = glow_layers(AMBER, 36, GLOW_STEPS).collect();
        assert_eq!(layers.len(), GLOW_STEPS);

        let outer = layers[0];
        assert_eq!(outer.radius, 36);
        assert_eq!(outer.color, AMBER.blend(Rgba::BLACK, 0.6).with_alpha(30));

        let inner = layers[GLOW_STEPS - 1];
        assert_eq!(inner.radius, 3);
        assert_eq!(inner.color.alpha(), 206);

        for pair in layers.windows(2) {
            assert!(pair[0].radius >= pair[1].radius);
            assert!(pair[0].color.alpha() <= pair[1].color.alpha());
            assert!(pair[0].color.red() <= pair[1].color.red());
        }
    }

    #[test]
    fn test_layers_bounds() {
        for steps in [1, 4, 12, 16, 64] {
            for radius in [-5, 0, 1, 20, 44] {
                for layer in glow_layers(AMBER, radius, steps) {
                    assert!(layer.radius >= 0);
                    assert!(layer.radius <= radius.max(0));
                    let alpha = layer.color.alpha();
                    assert!((30..=230).contains(&alpha), "alpha {}", alpha);
                }
            }
        }
        assert_eq!(glow_layers(AMBER, 10, 0).count(), 0);
    }

    #[test]
    fn test_wide_glow() {
        let alphas: Vec<_> = glow_layers(AMBER, 40, 16)
            .map(|layer| layer.color.alpha())
            .collect();
        assert_eq!(alphas.first(), Some(&30));
        assert_eq!(alphas.last(), Some(&212));
    }

    #[test]
    fn test_paint_glow() {
        let mut img: ImageOwned<Rgba> = ImageOwned::new_default(64, 64);
        paint_glow(&mut img, Point::new(32, 32), AMBER, 20, GLOW_STEPS);

        let center = img.pixel((32, 32)).copied().unwrap_or_default();
        let rim = img.pixel((12, 32)).copied().unwrap_or_default();
        assert!(center.alpha() > rim.alpha());
        assert_eq!(rim.alpha(), 30);
        assert!(center.red() > rim.red());
        assert_eq!(img.pixel((11, 32)), Some(&Rgba::TRANSPARENT));
        assert_eq!(img.occupied_bbox(), Some(BBox::centered((32, 32), 20, 20)));

        let mut again: ImageOwned<Rgba> = ImageOwned::new_default(64, 64);
        paint_glow(&mut again, Point::new(32, 32), AMBER, 20, GLOW_STEPS);
        assert_eq!(img.as_bytes(), again.as_bytes());
    }
}
