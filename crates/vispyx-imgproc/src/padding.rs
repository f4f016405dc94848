use rayon::prelude::*;
use vispyx_image::{Image, ImageError, ImageSize};

/// Maps a possibly out of range index into `[0, len)` by mirroring around the
/// edge samples without repeating them.
///
/// Example with `len = 4`: `... c b | a b c d | c b a ...`
///
/// Indices further out than one image length keep bouncing between the two
/// edges. A single sample always maps to itself.
///
/// `len` must be greater than zero.
///
/// # Example
///
/// ```rust
/// use vispyx_imgproc::padding::reflect101_index;
///
/// assert_eq!(reflect101_index(-1, 4), 1);
/// assert_eq!(reflect101_index(4, 4), 2);
/// assert_eq!(reflect101_index(2, 4), 2);
/// ```
#[inline]
pub fn reflect101_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as isize;
    let mut i = i;
    while i < 0 || i >= len {
        if i < 0 {
            i = -i;
        } else {
            i = 2 * len - i - 2;
        }
    }
    i as usize
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// Symmetric padding of `vertical` rows above and below and `horizontal`
    /// columns left and right.
    pub fn symmetric(vertical: usize, horizontal: usize) -> Self {
        Self {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }

    /// Size of an image of `size` once this padding is applied.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Pads `src` into `dst` with mirrored borders that do not repeat the edge
/// sample, see [`reflect101_index`].
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image, `src` grown by `padding`.
/// * `padding` - The amount of padding (in pixels) for all four sides.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match `src` grown by
/// `padding`, or if `src` is empty and there is nothing to mirror.
///
/// # Example
///
/// ```rust
/// use vispyx_image::{Image, ImageSize};
/// use vispyx_imgproc::padding::{pad_reflect101, Padding2D};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 5, height: 1 }, 0).unwrap();
///
/// pad_reflect101(&src, &mut dst, Padding2D { top: 0, bottom: 0, left: 1, right: 1 }).unwrap();
///
/// assert_eq!(dst.as_slice(), &[2, 1, 2, 3, 2]);
/// ```
pub fn pad_reflect101<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let expected = padding.padded_size(src.size());
    if expected != dst.size() || src.width() == 0 || src.height() == 0 {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    let (src_w, src_h) = (src.width(), src.height());
    let src_stride = src_w * C;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(expected.width * C)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_y = reflect101_index(y as isize - padding.top as isize, src_h);
            let src_row = &src_data[src_y * src_stride..(src_y + 1) * src_stride];

            for (x, dst_px) in dst_row.chunks_exact_mut(C).enumerate() {
                let src_x = reflect101_index(x as isize - padding.left as isize, src_w);
                dst_px.copy_from_slice(&src_row[src_x * C..(src_x + 1) * C]);
            }
        });

    Ok(())
}
