use vispyx_image::{Image, ImageError};

use super::Kernel;
use crate::padding::{pad_reflect101, Padding2D};

/// Pads a binary mask by half the kernel size on each side.
///
/// The border mirrors the interior without repeating the edge sample, so for
/// a row `[a, b, c]` and a 3-wide kernel the padded row is `[b, a, b, c, b]`.
///
/// # Errors
///
/// Propagates the padding error when the padded buffer cannot be built.
pub fn pad_reflect(mask: &Image<u8, 1>, kernel: &Kernel) -> Result<Image<u8, 1>, ImageError> {
    let (pad_rows, pad_cols) = kernel.pad();
    let padding = Padding2D::symmetric(pad_rows, pad_cols);

    let mut padded = Image::<u8, 1>::from_size_val(padding.padded_size(mask.size()), 0)?;
    pad_reflect101(mask, &mut padded, padding)?;

    Ok(padded)
}

/// Hit-or-miss evaluator over a padded 0/1 mask.
///
/// A window is addressed by its top-left corner `(row, col)` in the padded
/// mask, which is the output pixel `(row, col)` of the unpadded image. Only
/// the active kernel cells are visited.
pub struct Window<'a> {
    data: &'a [u8],
    stride: usize,
    offsets: Vec<usize>,
}

impl<'a> Window<'a> {
    /// Binds a padded mask to the active cells of `kernel`.
    pub fn new(padded: &'a Image<u8, 1>, kernel: &Kernel) -> Self {
        let stride = padded.width();
        let offsets = kernel
            .active_offsets()
            .into_iter()
            .map(|(r, c)| r * stride + c)
            .collect();

        Self {
            data: padded.as_slice(),
            stride,
            offsets,
        }
    }

    /// True iff every cell under the active kernel mask is set.
    ///
    /// Vacuously true for a kernel without active cells.
    ///
    /// # Panics
    ///
    /// Panics if the window at `(row, col)` reaches past the padded mask, i.e.
    /// `row` or `col` is outside the unpadded image.
    #[inline]
    pub fn all_match(&self, row: usize, col: usize) -> bool {
        let base = row * self.stride + col;
        self.offsets.iter().all(|&o| self.data[base + o] == 1)
    }

    /// True iff at least one cell under the active kernel mask is set.
    ///
    /// Always false for a kernel without active cells.
    ///
    /// # Panics
    ///
    /// Panics if the window at `(row, col)` reaches past the padded mask, i.e.
    /// `row` or `col` is outside the unpadded image.
    #[inline]
    pub fn any_match(&self, row: usize, col: usize) -> bool {
        let base = row * self.stride + col;
        self.offsets.iter().any(|&o| self.data[base + o] == 1)
    }
}
