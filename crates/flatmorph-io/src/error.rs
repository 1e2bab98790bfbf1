use flatmorph_image::ImageSize;

/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode or encode the image.
    #[error("Failed to decode or encode the image. {0}")]
    ImageCodecError(#[from] image::ImageError),

    /// The decoded pixel layout has no matching image type.
    #[error("Unsupported color type: {0}")]
    UnsupportedColorType(String),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] flatmorph_image::ImageError),

    /// The image buffer could not be handed to the encoder.
    #[error("Invalid image buffer for an image of size {0}")]
    InvalidImageBuffer(ImageSize),
}
