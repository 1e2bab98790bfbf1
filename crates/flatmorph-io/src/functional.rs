use std::path::Path;

use flatmorph_image::{Image, ImageSize};
use image::{ColorType, DynamicImage, ImageBuffer, ImageReader, Pixel};

use crate::error::IoError;

/// An image of any of the supported pixel layouts.
///
/// Each variant keeps the channel count and the bit depth of the decoded file, so that the
/// morphological transforms work on every channel at its own depth.
#[derive(Debug, Clone, PartialEq)]
pub enum DynImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit grayscale image with alpha channel
    La8(Image<u8, 2>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
    /// 16-bit grayscale image
    L16(Image<u16, 1>),
    /// 16-bit grayscale image with alpha channel
    La16(Image<u16, 2>),
    /// 16-bit RGB image
    Rgb16(Image<u16, 3>),
    /// 16-bit RGB image with alpha channel
    Rgba16(Image<u16, 4>),
}

impl DynImage {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            DynImage::L8(img) => img.size(),
            DynImage::La8(img) => img.size(),
            DynImage::Rgb8(img) => img.size(),
            DynImage::Rgba8(img) => img.size(),
            DynImage::L16(img) => img.size(),
            DynImage::La16(img) => img.size(),
            DynImage::Rgb16(img) => img.size(),
            DynImage::Rgba16(img) => img.size(),
        }
    }

    /// Get the number of channels of the image.
    pub fn num_channels(&self) -> usize {
        match self {
            DynImage::L8(_) | DynImage::L16(_) => 1,
            DynImage::La8(_) | DynImage::La16(_) => 2,
            DynImage::Rgb8(_) | DynImage::Rgb16(_) => 3,
            DynImage::Rgba8(_) | DynImage::Rgba16(_) => 4,
        }
    }

    /// Get the number of bits of every sample.
    pub fn bits_per_sample(&self) -> usize {
        match self {
            DynImage::L8(_) | DynImage::La8(_) | DynImage::Rgb8(_) | DynImage::Rgba8(_) => 8,
            _ => 16,
        }
    }
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate, guessing the
/// format from the file content.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// Fails when the file is missing, cannot be decoded, or decodes to a floating point layout.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<DynImage, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("decoded {} as {:?} {}", file_path.display(), img.color(), size);

    let image = match img.color() {
        ColorType::L8 => DynImage::L8(Image::new(size, img.into_luma8().into_raw())?),
        ColorType::La8 => DynImage::La8(Image::new(size, img.into_luma_alpha8().into_raw())?),
        ColorType::Rgb8 => DynImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
        ColorType::Rgba8 => DynImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?),
        ColorType::L16 => DynImage::L16(Image::new(size, img.into_luma16().into_raw())?),
        ColorType::La16 => DynImage::La16(Image::new(size, img.into_luma_alpha16().into_raw())?),
        ColorType::Rgb16 => DynImage::Rgb16(Image::new(size, img.into_rgb16().into_raw())?),
        ColorType::Rgba16 => DynImage::Rgba16(Image::new(size, img.into_rgba16().into_raw())?),
        other => return Err(IoError::UnsupportedColorType(format!("{other:?}"))),
    };

    Ok(image)
}

/// Writes the image to the given file path.
///
/// The output format is chosen from the file extension. Formats that cannot hold the pixel
/// layout (e.g. 16-bit samples in a JPEG file) are reported as an encoding error.
///
/// # Arguments
///
/// * `file_path` - The path of the file to write.
/// * `img` - The image to encode.
pub fn write_image_any(file_path: impl AsRef<Path>, img: &DynImage) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let dynamic = match img {
        DynImage::L8(img) => DynamicImage::ImageLuma8(to_buffer(img)?),
        DynImage::La8(img) => DynamicImage::ImageLumaA8(to_buffer(img)?),
        DynImage::Rgb8(img) => DynamicImage::ImageRgb8(to_buffer(img)?),
        DynImage::Rgba8(img) => DynamicImage::ImageRgba8(to_buffer(img)?),
        DynImage::L16(img) => DynamicImage::ImageLuma16(to_buffer(img)?),
        DynImage::La16(img) => DynamicImage::ImageLumaA16(to_buffer(img)?),
        DynImage::Rgb16(img) => DynamicImage::ImageRgb16(to_buffer(img)?),
        DynImage::Rgba16(img) => DynamicImage::ImageRgba16(to_buffer(img)?),
    };

    dynamic.save(file_path)?;

    log::debug!("encoded {} image to {}", img.size(), file_path.display());

    Ok(())
}

fn to_buffer<P: Pixel, const C: usize>(
    img: &Image<P::Subpixel, C>,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, IoError> {
    ImageBuffer::from_raw(
        img.width() as u32,
        img.height() as u32,
        img.as_slice().to_vec(),
    )
    .ok_or(IoError::InvalidImageBuffer(img.size()))
}
