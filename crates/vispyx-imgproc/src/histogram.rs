use rayon::prelude::*;
use vispyx_image::{Image, ImageError};

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit 1-channel images.
///
/// The counts are added to `hist`, so callers accumulating over several
/// images can reuse the same buffer.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
/// * `hist` - The output histogram.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins is invalid.
///
/// # Example
///
/// ```
/// use vispyx_image::{Image, ImageSize};
/// use vispyx_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 3,
///     height: 3,
///   },
///   vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let mut histogram = vec![0; 3];
///
/// compute_histogram(&image, &mut histogram, 3).unwrap();
/// assert_eq!(histogram, vec![3, 3, 3]);
/// ```
pub fn compute_histogram(
    src: &Image<u8, 1>,
    hist: &mut [usize],
    num_bins: usize,
) -> Result<(), ImageError> {
    if num_bins == 0 || num_bins > 256 || hist.len() != num_bins {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    let mut bin_lut = [0usize; 256];
    for (i, bin) in bin_lut.iter_mut().enumerate() {
        *bin = (i * num_bins) >> 8;
    }

    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; num_bins],
            |mut local, chunk| {
                for &px in chunk {
                    local[bin_lut[px as usize]] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                for (acc, val) in a.iter_mut().zip(b.iter()) {
                    *acc += val;
                }
                a
            },
        );

    for (h, c) in hist.iter_mut().zip(counts.iter()) {
        *h += c;
    }

    Ok(())
}
