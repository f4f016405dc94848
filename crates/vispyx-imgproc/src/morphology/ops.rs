use vispyx_image::{Image, ImageError};

use super::{pad_reflect, Kernel, MorphologyError, Window};
use crate::{parallel, threshold::threshold_binary};

/// Default number of passes of the primitive operators.
pub const DEFAULT_ITERATIONS: usize = 1;

#[derive(Debug, Clone, Copy)]
enum Predicate {
    All,
    Any,
}

impl Predicate {
    fn name(self) -> &'static str {
        match self {
            Predicate::All => "erode",
            Predicate::Any => "dilate",
        }
    }
}

/// Maps every nonzero pixel to 255 and the rest to 0.
///
/// # Example
///
/// ```rust
/// use vispyx_image::Image;
/// use vispyx_imgproc::morphology::binarize;
///
/// let image = Image::<u8, 1>::new([4, 1].into(), vec![0, 1, 128, 255]).unwrap();
/// let binary = binarize(&image).unwrap();
/// assert_eq!(binary.as_slice(), &[0, 255, 255, 255]);
/// ```
pub fn binarize(image: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    let mut dst = Image::from_size_val(image.size(), 0)?;
    threshold_binary(image, &mut dst, 0, 255)?;
    Ok(dst)
}

/// Erode a binary image.
///
/// A pixel stays foreground only if every active kernel cell centered on it
/// lands on foreground. The input is binarized first, any nonzero pixel being
/// foreground, and each of the `iterations` passes pads the current mask with
/// reflected borders.
///
/// # Arguments
///
/// * `image` - The input grayscale image.
/// * `kernel` - The structuring element, see [`Kernel::default`].
/// * `iterations` - Number of passes, see [`DEFAULT_ITERATIONS`].
///
/// # Returns
///
/// A new image of the same size holding only 0 and 255.
///
/// # Errors
///
/// Fails before any pixel work if the image is empty, the kernel has an even
/// dimension or does not fit in the image, or `iterations` is zero.
///
/// # Example
///
/// ```rust
/// use vispyx_image::Image;
/// use vispyx_imgproc::morphology::{erode, Kernel};
///
/// let image = Image::<u8, 1>::from_size_val([5, 5].into(), 255).unwrap();
/// let eroded = erode(&image, &Kernel::default(), 1).unwrap();
/// assert!(eroded.as_slice().iter().all(|&v| v == 255));
/// ```
pub fn erode(
    image: &Image<u8, 1>,
    kernel: &Kernel,
    iterations: usize,
) -> Result<Image<u8, 1>, MorphologyError> {
    apply_iterated(image, kernel, iterations, Predicate::All)
}

/// Dilate a binary image.
///
/// A pixel becomes foreground if any active kernel cell centered on it lands
/// on foreground. Binarization, border handling and errors follow [`erode`].
///
/// # Example
///
/// ```rust
/// use vispyx_image::Image;
/// use vispyx_imgproc::morphology::{dilate, Kernel};
///
/// let mut data = vec![0u8; 9];
/// data[4] = 1;
/// let image = Image::<u8, 1>::new([3, 3].into(), data).unwrap();
///
/// let dilated = dilate(&image, &Kernel::default(), 1).unwrap();
/// assert!(dilated.as_slice().iter().all(|&v| v == 255));
/// ```
pub fn dilate(
    image: &Image<u8, 1>,
    kernel: &Kernel,
    iterations: usize,
) -> Result<Image<u8, 1>, MorphologyError> {
    apply_iterated(image, kernel, iterations, Predicate::Any)
}

/// Morphological opening, `dilate(erode(image, kernel, n), kernel, n)`.
///
/// With `iterations > 1` each primitive runs `n` passes, so this is not the
/// opening applied `n` times.
pub fn open(
    image: &Image<u8, 1>,
    kernel: &Kernel,
    iterations: usize,
) -> Result<Image<u8, 1>, MorphologyError> {
    let eroded = erode(image, kernel, iterations)?;
    dilate(&eroded, kernel, iterations)
}

/// Morphological closing, `erode(dilate(image, kernel, n), kernel, n)`.
///
/// Same iteration semantics as [`open`].
pub fn close(
    image: &Image<u8, 1>,
    kernel: &Kernel,
    iterations: usize,
) -> Result<Image<u8, 1>, MorphologyError> {
    let dilated = dilate(image, kernel, iterations)?;
    erode(&dilated, kernel, iterations)
}

/// Binary morphological gradient, `dilate - erode` floored at zero.
///
/// Both operands hold 0 or 255, so the result marks the boundary band with
/// 255 and everything else with 0.
///
/// # Example
///
/// ```rust
/// use vispyx_image::Image;
/// use vispyx_imgproc::morphology::{gradient, Kernel};
///
/// let image = Image::<u8, 1>::from_size_val([5, 5].into(), 255).unwrap();
/// let edges = gradient(&image, &Kernel::default(), 1).unwrap();
/// assert!(edges.as_slice().iter().all(|&v| v == 0));
/// ```
pub fn gradient(
    image: &Image<u8, 1>,
    kernel: &Kernel,
    iterations: usize,
) -> Result<Image<u8, 1>, MorphologyError> {
    let dilated = dilate(image, kernel, iterations)?;
    let eroded = erode(image, kernel, iterations)?;

    let mut dst = Image::from_size_val(image.size(), 0)?;
    parallel::par_iter_rows_val_two(&dilated, &eroded, &mut dst, |&d, &e, out| {
        *out = (d as i16 - e as i16).max(0) as u8;
    });

    Ok(dst)
}

fn validate(
    image: &Image<u8, 1>,
    kernel: &Kernel,
    iterations: usize,
) -> Result<(), MorphologyError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(MorphologyError::EmptyImage);
    }

    if kernel.width() % 2 == 0 || kernel.height() % 2 == 0 {
        return Err(MorphologyError::EvenSizedKernel(kernel.width(), kernel.height()));
    }

    if kernel.width() > image.width() || kernel.height() > image.height() {
        return Err(MorphologyError::KernelLargerThanImage(
            kernel.width(),
            kernel.height(),
            image.width(),
            image.height(),
        ));
    }

    if iterations == 0 {
        return Err(MorphologyError::InvalidIterations(iterations));
    }

    Ok(())
}

fn apply_iterated(
    image: &Image<u8, 1>,
    kernel: &Kernel,
    iterations: usize,
    predicate: Predicate,
) -> Result<Image<u8, 1>, MorphologyError> {
    validate(image, kernel, iterations)?;

    // work on a 0/1 mask, scaled back to 0/255 at the end
    let mut mask = Image::from_size_val(image.size(), 0)?;
    threshold_binary(image, &mut mask, 0, 1)?;

    for i in 0..iterations {
        log::debug!(
            "{} pass {}/{} on {} with a {}x{} kernel",
            predicate.name(),
            i + 1,
            iterations,
            image.size(),
            kernel.width(),
            kernel.height()
        );
        mask = sweep(&mask, kernel, predicate)?;
    }

    let mut dst = Image::from_size_val(image.size(), 0)?;
    threshold_binary(&mask, &mut dst, 0, 255)?;

    Ok(dst)
}

/// One pass of the evaluator over every pixel of `mask`.
fn sweep(
    mask: &Image<u8, 1>,
    kernel: &Kernel,
    predicate: Predicate,
) -> Result<Image<u8, 1>, ImageError> {
    let padded = pad_reflect(mask, kernel)?;
    let window = Window::new(&padded, kernel);

    let mut dst = Image::from_size_val(mask.size(), 0)?;
    parallel::par_iter_rows_indexed(&mut dst, |row, dst_row| {
        for (col, px) in dst_row.iter_mut().enumerate() {
            let hit = match predicate {
                Predicate::All => window.all_match(row, col),
                Predicate::Any => window.any_match(row, col),
            };
            *px = u8::from(hit);
        }
    });

    Ok(dst)
}
