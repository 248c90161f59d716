use std::fmt;

pub type Scalar = f64;

/// Integer pixel position, `x` grows to the right and `y` grows down.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point(pub [i32; 2]);

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub const fn x(self) -> i32 {
        self.0[0]
    }

    /// Get `y` component of the point
    #[inline]
    pub const fn y(self) -> i32 {
        self.0[1]
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        write!(f, "{},{}", x, y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self([x, y])
    }
}

/// Inclusive box of pixels, both `min` and `max` corners belong to the box.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BBox {
    /// Point with minimal x and y values
    min: Point,
    /// Point with maximum x and y values
    max: Point,
}

impl BBox {
    /// Construct bounding box which includes points `p0` and `p1`
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let Point([x0, y0]) = p0.into();
        let Point([x1, y1]) = p1.into();
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min: Point([x0, y0]),
            max: Point([x1, y1]),
        }
    }

    /// Box spanning `rx` pixels left and right, and `ry` pixels up and down from `center`.
    pub fn centered(center: impl Into<Point>, rx: i32, ry: i32) -> Self {
        let Point([x, y]) = center.into();
        Self::new((x - rx, y - ry), (x + rx, y + ry))
    }

    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.min.x()
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.min.y()
    }

    /// Number of pixel columns covered by the box
    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x() - self.min.x() + 1
    }

    /// Number of pixel rows covered by the box
    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y() - self.min.y() + 1
    }

    /// Determine if the point is inside of the bounding box
    pub fn contains(&self, point: impl Into<Point>) -> bool {
        let Point([x, y]) = point.into();
        self.min.x() <= x && x <= self.max.x() && self.min.y() <= y && y <= self.max.y()
    }

    /// Determine if `other` lies entirely within this box
    pub fn contains_bbox(&self, other: BBox) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Extend bounding box so it would contains provided point
    pub fn extend(&self, point: impl Into<Point>) -> Self {
        let Point([x, y]) = point.into();
        Self {
            min: Point([self.min.x().min(x), self.min.y().min(y)]),
            max: Point([self.max.x().max(x), self.max.y().max(y)]),
        }
    }

    /// Create bounding box the spans both bbox-es
    pub fn union(&self, other: BBox) -> Self {
        self.extend(other.min).extend(other.max)
    }

    /// Common part of two boxes, `None` if they do not overlap
    pub fn intersect(&self, other: BBox) -> Option<Self> {
        let x0 = self.min.x().max(other.min.x());
        let y0 = self.min.y().max(other.min.y());
        let x1 = self.max.x().min(other.max.x());
        let y1 = self.max.y().min(other.max.y());
        (x0 <= x1 && y0 <= y1).then(|| Self {
            min: Point([x0, y0]),
            max: Point([x1, y1]),
        })
    }

    /// Shrink box by `width` pixels from every side, `None` if nothing is left
    pub fn inset(&self, width: i32) -> Option<Self> {
        let x0 = self.min.x() + width;
        let y0 = self.min.y() + width;
        let x1 = self.max.x() - width;
        let y1 = self.max.y() - width;
        (x0 <= x1 && y0 <= y1).then(|| Self {
            min: Point([x0, y0]),
            max: Point([x1, y1]),
        })
    }
}

impl fmt::Debug for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox({:?} {:?})", self.min, self.max)
    }
}
