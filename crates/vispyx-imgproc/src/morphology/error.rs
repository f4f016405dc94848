use vispyx_image::ImageError;

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MorphologyError {
    /// The kernel has a zero dimension.
    #[error("Kernel must have non-zero width and height, got {0}x{1}")]
    EmptyKernel(usize, usize),

    /// The kernel data does not match its declared dimensions.
    #[error("Kernel data length ({0}) does not match its size ({1})")]
    KernelDataMismatch(usize, usize),

    /// A kernel cell holds something other than 0 or 1.
    #[error("Kernel cells must be 0 or 1, got {0}")]
    InvalidKernelValue(u8),

    /// The kernel must have odd dimensions so that it has a center cell.
    #[error("Kernel dimensions must be odd, got {0}x{1}")]
    EvenSizedKernel(usize, usize),

    /// The kernel does not fit inside the image.
    #[error("Kernel of {0}x{1} is larger than the image of {2}x{3}")]
    KernelLargerThanImage(usize, usize, usize, usize),

    /// The input image has zero width or height.
    #[error("Input image is empty")]
    EmptyImage,

    /// The iteration count must be at least one.
    #[error("Iterations must be a positive integer, got {0}")]
    InvalidIterations(usize),

    /// Error from the underlying image operations.
    #[error(transparent)]
    Image(#[from] ImageError),
}
