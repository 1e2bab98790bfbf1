use flatmorph_image::ImageError;

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphologyError {
    /// The structuring element has no rows or no columns.
    #[error("structuring element must have at least one row and one column")]
    EmptyElement,

    /// The structuring element rows have inconsistent lengths.
    #[error("structuring element rows have inconsistent lengths")]
    NonRectangularElement,

    /// The structuring element data does not match its declared size.
    #[error("structuring element data length ({actual}) does not match its size ({expected})")]
    InvalidElementData {
        /// Number of cells implied by the declared size.
        expected: usize,
        /// Number of cells provided.
        actual: usize,
    },

    /// The anchor does not refer to a cell of the structuring element.
    #[error("anchor ({x}, {y}) lies outside the {cols}x{rows} structuring element")]
    AnchorOutOfBounds {
        /// Anchor column.
        x: usize,
        /// Anchor row.
        y: usize,
        /// Structuring element columns.
        cols: usize,
        /// Structuring element rows.
        rows: usize,
    },

    /// The operation name is not one of dilate, erode, open or close.
    #[error("unknown morphological operation: {0}")]
    UnknownOperation(String),

    /// The output image could not be allocated.
    #[error(transparent)]
    Image(#[from] ImageError),
}
