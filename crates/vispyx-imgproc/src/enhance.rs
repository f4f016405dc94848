use rayon::prelude::*;
use vispyx_image::{Image, ImageError};

use crate::{padding::reflect101_index, parallel};

/// Default contrast clip limit for [`clahe`].
pub const DEFAULT_CLIP_LIMIT: f32 = 2.0;

/// Default `(tiles_x, tiles_y)` grid for [`clahe`].
pub const DEFAULT_TILE_GRID: (usize, usize) = (8, 8);

const BINS: usize = 256;

/// Contrast Limited Adaptive Histogram Equalization.
///
/// The image is split into a `tiles_x` x `tiles_y` grid of equal tiles. When the
/// size is not a multiple of the grid, the image is extended on the right and
/// bottom with mirrored borders (see [`reflect101_index`]), so images smaller
/// than the grid are processed as well. Each tile histogram is clipped
/// at `max(clip_limit * tile_pixels / 256, 1)` and the clipped excess is spread
/// evenly over all bins. The equalization map of a tile is its scaled cumulative
/// histogram, and every pixel is mapped by bilinear interpolation between the
/// maps of its four nearest tiles.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output image, same size as `src`.
/// * `clip_limit` - Relative contrast limit, see [`DEFAULT_CLIP_LIMIT`].
/// * `tile_grid` - Number of tiles along x and y, see [`DEFAULT_TILE_GRID`].
///
/// # Errors
///
/// Returns an error if the sizes do not match, if the grid has no tile along
/// an axis, or if the clip limit is not a positive finite number.
///
/// # Example
///
/// ```
/// use vispyx_image::{Image, ImageSize};
/// use vispyx_imgproc::enhance::{clahe, DEFAULT_CLIP_LIMIT};
///
/// let image = Image::<u8, 1>::from_size_val(ImageSize { width: 16, height: 16 }, 80).unwrap();
/// let mut enhanced = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// clahe(&image, &mut enhanced, DEFAULT_CLIP_LIMIT, (2, 2)).unwrap();
/// assert_eq!(enhanced.size(), image.size());
/// ```
pub fn clahe(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    clip_limit: f32,
    tile_grid: (usize, usize),
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let (tiles_x, tiles_y) = tile_grid;

    if tiles_x == 0 || tiles_y == 0 {
        return Err(ImageError::InvalidTileGrid(tiles_x, tiles_y));
    }

    if !clip_limit.is_finite() || clip_limit <= 0.0 {
        return Err(ImageError::InvalidClipLimit(clip_limit.to_string()));
    }

    let (width, height) = (src.width(), src.height());
    if width == 0 || height == 0 {
        return Ok(());
    }

    // tiles cover the image padded up to a multiple of the grid
    let tile_w = width.div_ceil(tiles_x);
    let tile_h = height.div_ceil(tiles_y);
    let src_data = src.as_slice();

    // one equalization map per tile, row-major over the grid
    let luts = (0..tiles_x * tiles_y)
        .into_par_iter()
        .map(|idx| {
            let (tx, ty) = (idx % tiles_x, idx / tiles_x);

            let mut hist = [0usize; BINS];
            for y in ty * tile_h..(ty + 1) * tile_h {
                let row = &src_data[reflect101_index(y as isize, height) * width..][..width];
                for x in tx * tile_w..(tx + 1) * tile_w {
                    hist[row[reflect101_index(x as isize, width)] as usize] += 1;
                }
            }

            tile_lut(&mut hist, tile_w * tile_h, clip_limit)
        })
        .collect::<Vec<_>>();

    let (tile_wf, tile_hf) = (tile_w as f32, tile_h as f32);

    parallel::par_iter_rows_indexed(dst, |y, dst_row| {
        let (ty0, ty1, ay) = neighbor_tiles(y, tile_hf, tiles_y);
        let src_row = &src_data[y * width..(y + 1) * width];

        for (x, (dst_px, &src_px)) in dst_row.iter_mut().zip(src_row.iter()).enumerate() {
            let (tx0, tx1, ax) = neighbor_tiles(x, tile_wf, tiles_x);
            let v = src_px as usize;

            let v00 = luts[ty0 * tiles_x + tx0][v] as f32;
            let v10 = luts[ty0 * tiles_x + tx1][v] as f32;
            let v01 = luts[ty1 * tiles_x + tx0][v] as f32;
            let v11 = luts[ty1 * tiles_x + tx1][v] as f32;

            let top = v00 + ax * (v10 - v00);
            let bottom = v01 + ax * (v11 - v01);
            *dst_px = (top + ay * (bottom - top)).round().clamp(0.0, 255.0) as u8;
        }
    });

    Ok(())
}

/// Clips the tile histogram and turns it into an equalization lookup table.
fn tile_lut(hist: &mut [usize; BINS], tile_pixels: usize, clip_limit: f32) -> [u8; BINS] {
    let clip = ((clip_limit * tile_pixels as f32 / BINS as f32) as usize).max(1);

    let mut excess = 0usize;
    for bin in hist.iter_mut() {
        if *bin > clip {
            excess += *bin - clip;
            *bin = clip;
        }
    }

    let per_bin = excess / BINS;
    let remainder = excess % BINS;
    for (i, bin) in hist.iter_mut().enumerate() {
        *bin += per_bin + usize::from(i < remainder);
    }

    let scale = 255.0 / tile_pixels as f32;
    let mut lut = [0u8; BINS];
    let mut cdf = 0usize;
    for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
        cdf += count;
        *entry = (cdf as f32 * scale).round().min(255.0) as u8;
    }

    lut
}

/// Returns the two tiles surrounding `pos` along one axis and the
/// interpolation weight of the second one.
fn neighbor_tiles(pos: usize, tile_len: f32, num_tiles: usize) -> (usize, usize, f32) {
    let f = pos as f32 / tile_len - 0.5;
    let base = f.floor();
    let last = num_tiles as isize - 1;
    let t0 = (base as isize).clamp(0, last) as usize;
    let t1 = (base as isize + 1).clamp(0, last) as usize;
    (t0, t1, f - base)
}
