use rayon::prelude::*;

use vispyx_image::Image;

/// Apply a function to each element of the image in parallel, row by row.
pub fn par_iter_rows_val<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    let cols = src.cols();
    if cols == 0 {
        return;
    }
    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each element of two images in parallel, row by row.
pub fn par_iter_rows_val_two<T1, const C1: usize, T2, const C2: usize, T3, const C3: usize>(
    src1: &Image<T1, C1>,
    src2: &Image<T2, C2>,
    dst: &mut Image<T3, C3>,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
    T3: Send + Sync,
{
    let cols = src1.cols();
    if cols == 0 {
        return;
    }
    src1.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(src2.as_slice().par_chunks_exact(C2 * cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C3 * cols))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

/// Fill each row of the image in parallel.
///
/// The closure receives the row index and the mutable row buffer
/// (`cols * C` elements). Rows never alias, so no synchronization is needed
/// beyond the implicit join at the end of the call.
pub fn par_iter_rows_indexed<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    if cols == 0 {
        return;
    }
    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(row, dst_row)| f(row, dst_row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use vispyx_image::{ImageError, ImageSize};

    fn make_image(data: Vec<u8>) -> Result<Image<u8, 1>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            data,
        )
    }

    #[test]
    fn test_par_iter_rows_val() -> Result<(), ImageError> {
        let src = make_image(vec![1, 2, 3, 4])?;
        let mut dst = make_image(vec![0; 4])?;
        par_iter_rows_val(&src, &mut dst, |s, d| *d = *s * 2);
        assert_eq!(dst.as_slice(), &[2, 4, 6, 8]);
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_val_two() -> Result<(), ImageError> {
        let src1 = make_image(vec![1, 2, 3, 4])?;
        let src2 = make_image(vec![10, 20, 30, 40])?;
        let mut dst = make_image(vec![0; 4])?;
        par_iter_rows_val_two(&src1, &src2, &mut dst, |a, b, d| *d = *a + *b);
        assert_eq!(dst.as_slice(), &[11, 22, 33, 44]);
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_indexed() -> Result<(), ImageError> {
        let mut dst = make_image(vec![0; 4])?;
        par_iter_rows_indexed(&mut dst, |row, buf| buf.fill(row as u8 + 1));
        assert_eq!(dst.as_slice(), &[1, 1, 2, 2]);
        Ok(())
    }
}
