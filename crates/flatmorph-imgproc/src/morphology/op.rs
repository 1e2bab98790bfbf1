use std::time::{Duration, Instant};

use flatmorph_image::Image;

use super::dilate::{dilate_with_options, MorphOptions};
use super::element::{Anchor, StructuringElement};
use super::ops::{close_with_options, erode_with_options, open_with_options};
use super::{MorphologyError, Sample};

/// The four flat morphological transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    /// See [`super::dilate()`].
    Dilate,
    /// See [`super::erode()`].
    Erode,
    /// See [`super::open()`].
    Open,
    /// See [`super::close()`].
    Close,
}

/// The output of an operation together with its wall-clock duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    /// The value produced by the operation.
    pub output: T,
    /// The time spent computing `output`.
    pub elapsed: Duration,
}

impl MorphOp {
    /// All the operations, in definition order.
    pub const ALL: [MorphOp; 4] = [MorphOp::Dilate, MorphOp::Erode, MorphOp::Open, MorphOp::Close];

    /// The name of the transform, e.g. `"dilation"`.
    pub fn name(&self) -> &'static str {
        match self {
            MorphOp::Dilate => "dilation",
            MorphOp::Erode => "erosion",
            MorphOp::Open => "opening",
            MorphOp::Close => "closing",
        }
    }

    /// Apply the transform and measure how long it takes.
    ///
    /// When `anchor` is `None` the geometric center of `element` is used.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatmorph_image::Image;
    /// use flatmorph_imgproc::morphology::{MorphOp, MorphOptions, StructuringElement};
    ///
    /// let image = Image::<u8, 3>::from_size_val([8, 8].into(), 7).unwrap();
    /// let element = StructuringElement::default();
    ///
    /// let timed = MorphOp::Close
    ///     .apply(&image, &element, None, &MorphOptions::default())
    ///     .unwrap();
    /// assert_eq!(timed.output, image);
    /// ```
    pub fn apply<T: Sample, const C: usize>(
        &self,
        src: &Image<T, C>,
        element: &StructuringElement,
        anchor: Option<Anchor>,
        options: &MorphOptions,
    ) -> Result<Timed<Image<T, C>>, MorphologyError> {
        let anchor = anchor.unwrap_or_else(|| element.center());

        let start = Instant::now();
        let output = match self {
            MorphOp::Dilate => dilate_with_options(src, element, anchor, options)?,
            MorphOp::Erode => erode_with_options(src, element, anchor, options)?,
            MorphOp::Open => open_with_options(src, element, anchor, options)?,
            MorphOp::Close => close_with_options(src, element, anchor, options)?,
        };
        let elapsed = start.elapsed();

        log::debug!(
            "{} of {} image ({} channels) with {}x{} element at ({}, {}) took {:?}",
            self.name(),
            src.size(),
            C,
            element.cols(),
            element.rows(),
            anchor.x,
            anchor.y,
            elapsed
        );

        Ok(Timed { output, elapsed })
    }
}

impl std::fmt::Display for MorphOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for MorphOp {
    type Err = MorphologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dilate" | "dilation" => Ok(MorphOp::Dilate),
            "erode" | "erosion" => Ok(MorphOp::Erode),
            "open" | "opening" => Ok(MorphOp::Open),
            "close" | "closing" => Ok(MorphOp::Close),
            _ => Err(MorphologyError::UnknownOperation(s.to_string())),
        }
    }
}
