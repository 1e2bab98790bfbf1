use flatmorph_image::Image;

use super::Sample;

/// Invert every sample against the maximum value of its type.
///
/// `dst = MAX - src`, per channel, where `MAX` is 255 for `u8` samples and 65535 for `u16`.
/// Applying the complement twice returns the original image.
///
/// # Example
///
/// ```rust
/// use flatmorph_image::Image;
/// use flatmorph_imgproc::morphology::complement;
///
/// let image = Image::<u8, 1>::new([3, 1].into(), vec![0, 100, 255]).unwrap();
/// assert_eq!(complement(&image).as_slice(), &[255, 155, 0]);
/// ```
pub fn complement<T: Sample, const C: usize>(src: &Image<T, C>) -> Image<T, C> {
    src.map(|v| T::max_value() - v)
}
