//! Binary morphology over single channel 8-bit images.
//!
//! Every operator binarizes its input (any nonzero sample is foreground),
//! pads each pass with [`pad_reflect101`](crate::padding::pad_reflect101)
//! and returns a freshly allocated image holding only `0` and `255`.

mod error;
pub use error::MorphologyError;

mod kernels;
pub use kernels::{Kernel, KernelShape};

mod window;
pub use window::{pad_reflect, Window};

mod ops;
pub use ops::{binarize, close, dilate, erode, gradient, open, DEFAULT_ITERATIONS};
