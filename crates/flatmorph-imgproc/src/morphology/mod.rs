//! Flat mathematical morphology.
//!
//! Dilation is the only primitive that scans the image; erosion is derived from it through the
//! complement, and opening and closing chain the two.

/// Error types used for morphological operations.
pub mod error;
pub use error::MorphologyError;

/// Structuring elements, anchors and their reflection.
pub mod element;

/// The dilation scan and its options.
pub mod dilate;

/// Per-channel value inversion.
pub mod complement;

/// Erosion, opening and closing.
pub mod ops;

/// Named operations with timing.
pub mod op;

pub use complement::complement;
pub use dilate::{dilate, dilate_with_options, EmptyWindow, MorphOptions};
pub use element::{Anchor, ElementShape, StructuringElement, DEFAULT_ELEMENT_SIZE};
pub use op::{MorphOp, Timed};
pub use ops::{close, close_with_options, erode, erode_with_options, open, open_with_options};

/// Sample types the morphological transforms work on.
///
/// Unsigned integers, whose maximum value is used by the [`complement`].
pub trait Sample:
    Copy + Ord + Default + Send + Sync + num_traits::Bounded + num_traits::Unsigned
{
}

impl<T> Sample for T where
    T: Copy + Ord + Default + Send + Sync + num_traits::Bounded + num_traits::Unsigned
{
}
