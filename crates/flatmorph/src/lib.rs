#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use flatmorph_image as image;

#[doc(inline)]
pub use flatmorph_imgproc as imgproc;

#[doc(inline)]
pub use flatmorph_io as io;
