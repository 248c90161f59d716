//! Procedural renderer for grow-lamp fixture sprites and icons.
//!
//! Main features:
//!  - Four built-in fixture shapes: circle, oval, square LED panel and advanced LED grid
//!  - Radial glow and housing gradients built from alpha-composited primitives
//!  - Full sprite and padded icon variants of every fixture
//!  - Deterministic output, suitable for parallel batch rendering
//!
#![deny(warnings)]

mod catalog;
mod color;
pub mod draw;
mod fixture;
mod geometry;
pub mod glow;
mod image;
mod render;

#[cfg(feature = "serde")]
pub use catalog::CatalogError;
pub use catalog::{Catalog, Rendered, render_all};
pub use color::{ColorError, Rgba};
pub use fixture::{FixtureDesc, FixtureSpec, Shape, ShapeKind, SpecError};
pub use geometry::{BBox, Point, Scalar};
pub use image::{Image, ImageMut, ImageOwned, ImageShape};
pub use render::{CANVAS_SIZE, Canvas, ICON_PADDING, Variant, render};
