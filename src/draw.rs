//! Aliased fill and outline primitives for axis-aligned ellipses and rectangles.
//!
//! Every primitive takes an inclusive pixel box. Ellipses are inscribed into
//! the box, a pixel belongs to the ellipse if its center lies inside of it.
//! Outlines of width `w` cover pixels of the shape that are not covered by the
//! same shape inset by `w` pixels. Colors are composited with source-over and
//! every pixel is painted at most once per call, so translucent colors are
//! applied exactly once. Anything outside of the image is clipped.
use crate::{BBox, ImageMut, Rgba};

/// Fill ellipse inscribed into `bbox`
pub fn fill_ellipse<I>(img: &mut I, bbox: BBox, color: Rgba)
where
    I: ImageMut<Pixel = Rgba> + ?Sized,
{
    let ellipse = Ellipse::new(bbox);
    paint_region(img, bbox, color, |x, y| ellipse.contains(x, y));
}

/// Outline ellipse inscribed into `bbox` with a line of `width` pixels drawn inwards
pub fn stroke_ellipse<I>(img: &mut I, bbox: BBox, width: i32, color: Rgba)
where
    I: ImageMut<Pixel = Rgba> + ?Sized,
{
    let outer = Ellipse::new(bbox);
    let inner = bbox.inset(width).map(Ellipse::new);
    paint_region(img, bbox, color, |x, y| {
        outer.contains(x, y) && !inner.is_some_and(|inner| inner.contains(x, y))
    });
}

/// Fill all pixels of `bbox`
pub fn fill_rect<I>(img: &mut I, bbox: BBox, color: Rgba)
where
    I: ImageMut<Pixel = Rgba> + ?Sized,
{
    paint_region(img, bbox, color, |_, _| true);
}

/// Outline `bbox` with a line of `width` pixels drawn inwards
pub fn stroke_rect<I>(img: &mut I, bbox: BBox, width: i32, color: Rgba)
where
    I: ImageMut<Pixel = Rgba> + ?Sized,
{
    let inner = bbox.inset(width);
    paint_region(img, bbox, color, |x, y| {
        !inner.is_some_and(|inner| inner.contains((x, y)))
    });
}

/// Composite `color` over every pixel of `bbox` accepted by `inside`
fn paint_region<I, F>(img: &mut I, bbox: BBox, color: Rgba, inside: F)
where
    I: ImageMut<Pixel = Rgba> + ?Sized,
    F: Fn(i32, i32) -> bool,
{
    let Some(clip) = img.shape().bbox().and_then(|bounds| bounds.intersect(bbox)) else {
        return;
    };
    let shape = img.shape();
    let data = img.data_mut();
    for y in clip.min().y()..=clip.max().y() {
        for x in clip.min().x()..=clip.max().x() {
            if !inside(x, y) {
                continue;
            }
            let pixel = &mut data[shape.offset(y as usize, x as usize)];
            *pixel = pixel.blend_over(color);
        }
    }
}

/// Ellipse inscribed into a pixel box.
///
/// All values are doubled so the inclusion test stays in integer arithmetic:
/// pixel center `x + 0.5` becomes `2x + 1`, box center `(x0 + x1 + 1) / 2`
/// becomes `x0 + x1 + 1`, and radius `(x1 - x0 + 1) / 2` becomes `x1 - x0 + 1`.
#[derive(Clone, Copy, Debug)]
struct Ellipse {
    center_x2: i64,
    center_y2: i64,
    radius_x2: i64,
    radius_y2: i64,
}

impl Ellipse {
    fn new(bbox: BBox) -> Self {
        let (x0, y0) = (bbox.min().x() as i64, bbox.min().y() as i64);
        let (x1, y1) = (bbox.max().x() as i64, bbox.max().y() as i64);
        Self {
            center_x2: x0 + x1 + 1,
            center_y2: y0 + y1 + 1,
            radius_x2: x1 - x0 + 1,
            radius_y2: y1 - y0 + 1,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        let dx = 2 * x as i64 + 1 - self.center_x2;
        let dy = 2 * y as i64 + 1 - self.center_y2;
        let rx = self.radius_x2 * self.radius_x2;
        let ry = self.radius_y2 * self.radius_y2;
        dx * dx * ry + dy * dy * rx <= rx * ry
    }
}
