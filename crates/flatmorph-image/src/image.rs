use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use flatmorph_image::ImageSize;
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

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
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
/// The samples are stored row-major and interleaved, i.e. with shape (H, W, C), where H is the
/// height of the image, W the width and C the number of channels. Images are never resized in
/// place: every transform allocates a new image of the same shape.
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
    /// * `data` - The interleaved pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatmorph_image::{Image, ImageSize};
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
        let expected = size.width * size.height * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and every sample set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatmorph_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 1>::from_size_val([4, 3].into(), 100u8).unwrap();
    ///
    /// assert_eq!(image.rows(), 3);
    /// assert_eq!(image.cols(), 4);
    /// assert!(image.as_slice().iter().all(|&v| v == 100));
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
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
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

    /// Get the samples of the image as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the samples of the image as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get a sample by its `[row, col, channel]` index.
    ///
    /// Returns `None` when any of the indices is out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [row, col, ch] = index;
        if row >= self.rows() || col >= self.cols() || ch >= CHANNELS {
            return None;
        }
        self.data.get((row * self.cols() + col) * CHANNELS + ch)
    }

    /// Get all the channel samples of the pixel at `(row, col)`.
    pub fn pixel(&self, row: usize, col: usize) -> Option<&[T]> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let offset = (row * self.cols() + col) * CHANNELS;
        self.data.get(offset..offset + CHANNELS)
    }

    /// Apply `f` to every sample, producing a new image of the same shape.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Image<U, CHANNELS>
    where
        T: Copy,
    {
        Image {
            size: self.size,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }
}
