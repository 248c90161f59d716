//! Fixture renderers.
//!
//! Every renderer paints on a fresh transparent canvas back to front: glow,
//! housing, interior detail, outline and finally the mount bracket. The order
//! matters since most layers are translucent.
use crate::{
    BBox, FixtureDesc, FixtureSpec, ImageOwned, Point, Rgba, Scalar, Shape, SpecError,
    draw::{fill_ellipse, fill_rect, stroke_ellipse, stroke_rect},
    glow::{GLOW_STEPS, paint_glow},
};
use std::fmt;

/// Width and height of every rendered image
pub const CANVAS_SIZE: usize = 64;

/// Padding applied to shape parameters of the icon variant
pub const ICON_PADDING: i32 = 4;

/// Rendered fixture image
pub type Canvas = ImageOwned<Rgba>;

const CENTER: Point = Point::new(CANVAS_SIZE as i32 / 2, CANVAS_SIZE as i32 / 2);

/// Color of the advanced grid frame
const FRAME_COLOR: Rgba = Rgba::new(80, 100, 120, 200);

/// Output flavour of a fixture image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Building sprite, shape parameters are used as is
    Full,
    /// UI icon, shape parameters are shrunk by [`ICON_PADDING`]
    Icon,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Full, Variant::Icon];

    pub fn padding(self) -> i32 {
        match self {
            Variant::Full => 0,
            Variant::Icon => ICON_PADDING,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Full => "sprite",
            Variant::Icon => "icon",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render `variant` of the fixture
pub fn render(spec: &FixtureSpec, variant: Variant) -> Canvas {
    let padding = variant.padding();
    tracing::debug_span!("[render]", fixture = spec.identifier(), %variant).in_scope(|| {
        match spec.shape() {
            Shape::Circle { radius } => render_circle(spec, radius as i32, padding),
            Shape::Oval { width, height } => {
                render_oval(spec, width as i32, height as i32, padding)
            }
            Shape::Square { size } => render_square(spec, size as i32, padding),
            Shape::AdvancedGrid { width, height } => {
                render_grid(spec, width as i32, height as i32, padding)
            }
        }
    })
}

impl FixtureDesc {
    /// Validate description and render `variant` of it
    pub fn render(&self, variant: Variant) -> Result<Canvas, SpecError> {
        let spec = FixtureSpec::try_from(self)?;
        Ok(render(&spec, variant))
    }
}

fn new_canvas() -> Canvas {
    ImageOwned::new_default(CANVAS_SIZE, CANVAS_SIZE)
}

/// Radial gradient from housing at the rim to center color in the middle,
/// built out of five solid ellipses.
fn paint_housing_gradient(img: &mut Canvas, spec: &FixtureSpec, rx: i32, ry: i32, min_radius: i32) {
    const STEPS: i32 = 4;
    for i in (0..=STEPS).rev() {
        let t = i as Scalar / STEPS as Scalar;
        let color = spec.housing().blend(spec.center(), 1.0 - t);
        let rx = ((rx as Scalar * t) as i32).max(min_radius);
        let ry = ((ry as Scalar * t) as i32).max(min_radius);
        fill_ellipse(img, BBox::centered(CENTER, rx, ry), color);
    }
}

/// Mount bracket at the top center, identical for all shapes
fn paint_mount(img: &mut Canvas, color: Rgba) {
    const WIDTH: i32 = 8;
    const HEIGHT: i32 = 6;
    const TOP: i32 = 2;
    let x0 = CENTER.x() - WIDTH / 2;
    fill_rect(
        img,
        BBox::new((x0, TOP), (x0 + WIDTH - 1, TOP + HEIGHT - 1)),
        color,
    );
}

fn render_circle(spec: &FixtureSpec, radius: i32, padding: i32) -> Canvas {
    let mut img = new_canvas();
    let r = radius - padding;

    paint_glow(&mut img, CENTER, spec.center(), r + 10, GLOW_STEPS);
    paint_housing_gradient(&mut img, spec, r, r, 2);

    let spot = 6 - padding / 2;
    fill_ellipse(&mut img, BBox::centered(CENTER, spot, spot), spec.center());

    stroke_ellipse(&mut img, BBox::centered(CENTER, r, r), 2, spec.housing());
    paint_mount(&mut img, spec.housing());
    img
}

fn render_oval(spec: &FixtureSpec, width: i32, height: i32, padding: i32) -> Canvas {
    let mut img = new_canvas();
    let hw = (width - 2 * padding) / 2;
    let hh = (height - 2 * padding) / 2;

    paint_glow(&mut img, CENTER, spec.center(), hw.max(hh) + 10, GLOW_STEPS);
    paint_housing_gradient(&mut img, spec, hw, hh, 1);
    fill_ellipse(&mut img, BBox::centered(CENTER, 5, 4), spec.center());
    stroke_ellipse(&mut img, BBox::centered(CENTER, hw, hh), 2, spec.housing());
    paint_mount(&mut img, spec.housing());
    img
}

fn render_square(spec: &FixtureSpec, size: i32, padding: i32) -> Canvas {
    let mut img = new_canvas();
    let half = (size - 2 * padding) / 2;
    let housing = BBox::centered(CENTER, half, half);

    paint_glow(&mut img, CENTER, spec.center(), half + 8, GLOW_STEPS);
    fill_rect(&mut img, housing, spec.housing());

    // 3x3 LED cells with 1px gaps inside a 2px margin
    let cell = (half * 2 - 4) / 3;
    for row in 0..3 {
        for col in 0..3 {
            let x0 = housing.x() + 2 + col * (cell + 1);
            let y0 = housing.y() + 2 + row * (cell + 1);
            let brightness = 0.7 + 0.3 * ((row + col) % 2) as Scalar;
            let color = spec.center().scale(brightness).with_alpha(230);
            fill_rect(&mut img, BBox::new((x0, y0), (x0 + cell, y0 + cell)), color);
        }
    }

    fill_rect(&mut img, BBox::centered(CENTER, 3, 3), spec.center());
    stroke_rect(&mut img, housing, 1, spec.housing().with_alpha(200));
    paint_mount(&mut img, spec.housing());
    img
}

fn render_grid(spec: &FixtureSpec, width: i32, height: i32, padding: i32) -> Canvas {
    const MARGIN: i32 = 4;
    const GUTTER: i32 = 2;

    let mut img = new_canvas();
    let hw = (width - 2 * padding) / 2;
    let hh = (height - 2 * padding) / 2;
    let housing = BBox::centered(CENTER, hw, hh);

    paint_glow(&mut img, CENTER, spec.center(), hw + 12, 16);
    fill_rect(&mut img, housing, spec.housing());

    // 3x3 sub-panels, each with an inset highlight
    let cell_w = (hw * 2 - 2 * MARGIN - 2 * GUTTER) / 3;
    let cell_h = (hh * 2 - 2 * MARGIN - 2 * GUTTER) / 3;
    let highlight = Rgba::WHITE.with_alpha(60);
    for row in 0..3 {
        for col in 0..3 {
            let x0 = housing.x() + MARGIN + col * (cell_w + GUTTER);
            let y0 = housing.y() + MARGIN + row * (cell_h + GUTTER);
            let brightness = 0.75 + 0.25 * ((row * 3 + col) % 3) as Scalar / 2.0;
            let color = spec.center().scale(brightness).with_alpha(240);
            let panel = BBox::new((x0, y0), (x0 + cell_w, y0 + cell_h));
            fill_rect(&mut img, panel, color);
            if let Some(inner) = panel.inset(1) {
                stroke_rect(&mut img, inner, 1, highlight);
            }
        }
    }

    fill_rect(&mut img, BBox::centered(CENTER, 2, 2), spec.center());
    stroke_rect(&mut img, housing, 2, FRAME_COLOR);
    paint_mount(&mut img, spec.housing());
    img
}
