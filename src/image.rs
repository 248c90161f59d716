use crate::{BBox, Point, Rgba};
#[cfg(feature = "png")]
use std::io::Write;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ImageShape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
    /// How many elements we need to skip to get to the next row.
    pub row_stride: usize,
    /// How many elements we need to skip to get to the next column.
    pub col_stride: usize,
}

impl ImageShape {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.row_stride + col * self.col_stride
    }

    /// Pixel box covering the whole image, `None` for an empty image
    pub fn bbox(&self) -> Option<BBox> {
        (self.width > 0 && self.height > 0)
            .then(|| BBox::new((0, 0), (self.width as i32 - 1, self.height as i32 - 1)))
    }
}

pub trait Image {
    type Pixel;

    fn data(&self) -> &[Self::Pixel];

    fn shape(&self) -> ImageShape;

    fn width(&self) -> usize {
        self.shape().width
    }

    fn height(&self) -> usize {
        self.shape().height
    }

    fn get(&self, row: usize, col: usize) -> Option<&Self::Pixel> {
        let shape = self.shape();
        if row >= shape.height || col >= shape.width {
            return None;
        }
        self.data().get(shape.offset(row, col))
    }

    /// Pixel at `point`, `None` if it is outside of the image
    fn pixel(&self, point: impl Into<Point>) -> Option<&Self::Pixel> {
        let Point([x, y]) = point.into();
        if x < 0 || y < 0 {
            return None;
        }
        self.get(y as usize, x as usize)
    }
}

pub trait ImageMut: Image {
    fn data_mut(&mut self) -> &mut [Self::Pixel];

    fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Self::Pixel> {
        let shape = self.shape();
        if row >= shape.height || col >= shape.width {
            return None;
        }
        self.data_mut().get_mut(shape.offset(row, col))
    }

    fn clear(&mut self)
    where
        Self::Pixel: Default,
    {
        let shape = self.shape();
        let data = self.data_mut();
        for row in 0..shape.height {
            for col in 0..shape.width {
                data[shape.offset(row, col)] = Default::default();
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ImageOwned<P> {
    shape: ImageShape,
    data: Vec<P>,
}

impl<P> ImageOwned<P> {
    pub fn new_default(height: usize, width: usize) -> Self
    where
        P: Default,
    {
        Self::new_with(height, width, |_, _| Default::default())
    }

    pub fn new_with<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col))
            }
        }
        Self {
            shape: ImageShape {
                width,
                height,
                row_stride: width,
                col_stride: 1,
            },
            data,
        }
    }
}

impl<P> Image for ImageOwned<P> {
    type Pixel = P;

    fn shape(&self) -> ImageShape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        &self.data
    }
}

impl<P> ImageMut for ImageOwned<P> {
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        &mut self.data
    }
}

impl ImageOwned<Rgba> {
    /// Raw `RGBA8` bytes in row-major order
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Smallest box containing every pixel that is not fully transparent
    pub fn occupied_bbox(&self) -> Option<BBox> {
        let mut result: Option<BBox> = None;
        for row in 0..self.shape.height {
            for col in 0..self.shape.width {
                if self.data[self.shape.offset(row, col)].is_transparent() {
                    continue;
                }
                let point = Point::new(col as i32, row as i32);
                result = Some(match result {
                    None => BBox::new(point, point),
                    Some(bbox) => bbox.extend(point),
                });
            }
        }
        result
    }

    /// Encode image as 8-bit RGBA PNG
    #[cfg(feature = "png")]
    pub fn write_png(&self, out: impl Write) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(out, self.shape.width as u32, self.shape.height as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.as_bytes())?;
        writer.finish()
    }
}
