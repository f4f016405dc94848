use super::MorphologyError;

/// Shapes of morphological [`Kernel`]s.
///
/// All shapes produce a rectangular 0/1 mask centered at its geometric center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelShape {
    /// A square box structuring element, all cells active.
    Box {
        /// `size` - The side length of the square kernel (size x size).
        size: usize,
    },

    /// A rectangular box structuring element, all cells active.
    Rect {
        /// The width of the kernel.
        width: usize,
        /// The height of the kernel.
        height: usize,
    },

    /// A cross (plus) shaped structuring element.
    ///
    /// Only cells along the horizontal and vertical center lines are active.
    Cross {
        /// `size` - The side length of the square cross kernel (size x size).
        size: usize,
    },
}

/// A morphological structuring element.
///
/// The kernel stores a binary mask where 1 marks the neighbor offsets that
/// take part in the operation and 0 marks excluded offsets. The center cell
/// is `(height / 2, width / 2)`.
///
/// # Example
///
/// ```rust
/// use vispyx_imgproc::morphology::{Kernel, KernelShape};
///
/// let kernel = Kernel::new(KernelShape::Box { size: 3 });
/// assert_eq!(kernel.width(), 3);
/// assert_eq!(kernel.height(), 3);
/// assert_eq!(kernel.pad(), (1, 1));
/// assert_eq!(kernel, Kernel::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Default for Kernel {
    /// The 3x3 all-ones kernel.
    fn default() -> Self {
        Self::new(KernelShape::Box { size: 3 })
    }
}

impl Kernel {
    /// Create a morphological kernel from a shape.
    pub fn new(shape: KernelShape) -> Self {
        match shape {
            KernelShape::Box { size } => rect_kernel(size, size),
            KernelShape::Rect { width, height } => rect_kernel(width, height),
            KernelShape::Cross { size } => cross_kernel(size),
        }
    }

    /// Create a kernel from a row-major 0/1 mask.
    ///
    /// A mask without any active cell is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, if `data` does not hold
    /// `width * height` cells, or if a cell is neither 0 nor 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vispyx_imgproc::morphology::Kernel;
    ///
    /// let kernel = Kernel::from_mask(3, 1, vec![1, 1, 0]).unwrap();
    /// assert_eq!(kernel.num_active(), 2);
    /// ```
    pub fn from_mask(width: usize, height: usize, data: Vec<u8>) -> Result<Self, MorphologyError> {
        if width == 0 || height == 0 {
            return Err(MorphologyError::EmptyKernel(width, height));
        }

        if data.len() != width * height {
            return Err(MorphologyError::KernelDataMismatch(data.len(), width * height));
        }

        if let Some(&v) = data.iter().find(|&&v| v > 1) {
            return Err(MorphologyError::InvalidKernelValue(v));
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Get a reference to the kernel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the padding for the kernel (offset from center) as `(rows, cols)`.
    pub fn pad(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    /// Number of active cells in the mask.
    pub fn num_active(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    /// `(row, col)` offsets of the active cells, relative to the top-left corner.
    pub fn active_offsets(&self) -> Vec<(usize, usize)> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 1)
            .map(|(idx, _)| (idx / self.width, idx % self.width))
            .collect()
    }
}

fn rect_kernel(width: usize, height: usize) -> Kernel {
    Kernel {
        data: vec![1u8; width * height],
        width,
        height,
    }
}

fn cross_kernel(size: usize) -> Kernel {
    let mut data = vec![0u8; size * size];
    let mid = size / 2;

    for (idx, cell) in data.iter_mut().enumerate() {
        if idx / size == mid || idx % size == mid {
            *cell = 1;
        }
    }

    Kernel {
        data,
        width: size,
        height: size,
    }
}
