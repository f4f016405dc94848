use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use vispyx_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored contiguously in row-major order with shape (H, W, C),
/// where H is the height, W the width and C the number of channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use vispyx_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and a constant pixel value.
    ///
    /// # Examples
    ///
    /// ```
    /// use vispyx_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 1>::from_size_val(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     0u8,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 1);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get the pixel value at the given coordinates.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate (column) of the pixel.
    /// * `y` - The y-coordinate (row) of the pixel.
    /// * `ch` - The channel index of the pixel.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates or the channel are out of bounds.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<&T, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        Ok(&self.data[(y * self.width() + x) * CHANNELS + ch])
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.area(), 200);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_invalid_data_length() {
        let res = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0u8; 5],
        );
        assert_eq!(res, Err(ImageError::InvalidChannelShape(5, 6)));
    }

    #[test]
    fn image_empty() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )?;
        assert!(image.as_slice().is_empty());
        Ok(())
    }

    #[test]
    fn image_get_pixel() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![10, 11, 20, 21],
        )?;
        assert_eq!(image.get_pixel(1, 0, 1)?, &21);
        assert_eq!(
            image.get_pixel(2, 0, 0),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, 2, 1))
        );
        assert_eq!(
            image.get_pixel(0, 0, 2),
            Err(ImageError::ChannelIndexOutOfBounds(2, 2))
        );

        Ok(())
    }

    #[test]
    fn image_from_size_val() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([4, 2].into(), 7)?;
        assert_eq!(image.rows(), 2);
        assert_eq!(image.cols(), 4);
        assert!(image.as_slice().iter().all(|&v| v == 7));
        assert_eq!(image.as_slice().len(), 8);

        Ok(())
    }
}
