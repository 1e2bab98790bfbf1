#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// flat morphology module: structuring elements, dilation, erosion, opening and closing.
pub mod morphology;

/// module containing parallelization utilities.
pub mod parallel;
