//! Binary morphology and grayscale preprocessing over raw pixel buffers.
//!
//! ```rust
//! use vispyx::image::Image;
//! use vispyx::imgproc::morphology::{dilate, Kernel};
//!
//! let mut data = vec![0u8; 25];
//! data[12] = 255;
//! let image = Image::<u8, 1>::new([5, 5].into(), data).unwrap();
//!
//! let dilated = dilate(&image, &Kernel::default(), 1).unwrap();
//! assert_eq!(dilated.as_slice().iter().filter(|&&v| v == 255).count(), 9);
//! ```

#[doc(inline)]
pub use vispyx_image as image;

#[doc(inline)]
pub use vispyx_imgproc as imgproc;

#[doc(inline)]
pub use vispyx_io as io;
