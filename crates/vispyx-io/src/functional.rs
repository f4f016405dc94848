use std::path::Path;

use vispyx_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit grayscale.
///
/// The method tries to read from any image format supported by the image
/// crate. Color images are converted to luma.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A grayscale image with a single channel.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] if there is no file at `file_path`,
/// or a decode error if the content is not a supported image.
pub fn read_image_any_gray8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    // SAFETY: the mapping is read-only and dropped before returning.
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    log::debug!("decoding {} ({} bytes)", file_path.display(), mmap.len());

    decode_image_bytes_gray8(&mmap)
}

/// Decodes an encoded image held in memory as 8-bit grayscale.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of an image file in any format the image crate supports.
///
/// # Returns
///
/// A grayscale image with a single channel.
pub fn decode_image_bytes_gray8(bytes: &[u8]) -> Result<Image<u8, 1>, IoError> {
    let img = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_luma8().into_raw())?)
}

/// Writes a grayscale image to the given file path.
///
/// The format is picked from the file extension, e.g. `png`, `jpg` or `bmp`.
/// PNG output goes through [`crate::png::write_image_png_gray8`].
/// Missing parent directories are created.
///
/// # Arguments
///
/// * `file_path` - The destination path, its extension selects the encoder.
/// * `image` - The grayscale image to encode.
///
/// # Errors
///
/// Returns [`IoError::InvalidFileExtension`] if the extension does not name a
/// format the image crate knows, or an encode error if that format cannot
/// hold 8-bit grayscale.
pub fn write_image_any_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let format = image::ImageFormat::from_path(file_path)
        .map_err(|_| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    if format == image::ImageFormat::Png {
        return crate::png::write_image_png_gray8(file_path, image);
    }

    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let gray = image::GrayImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.as_slice().to_vec(),
    )
    .ok_or_else(|| IoError::ImageEncodeError(format!("invalid buffer for {}", image.size())))?;

    gray.save_with_format(file_path, format)
        .map_err(|e| IoError::ImageEncodeError(e.to_string()))?;

    log::debug!("wrote {} as {:?} ({})", file_path.display(), format, image.size());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_rgb_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, IoError> {
        let mut bytes = Vec::new();
        image::RgbImage::from_raw(width, height, rgb.to_vec())
            .ok_or_else(|| IoError::PngEncodingError("bad buffer".to_string()))?
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    #[test]
    fn decode_color_to_gray() -> Result<(), IoError> {
        let bytes = encode_rgb_png(2, 1, &[0, 0, 0, 255, 255, 255])?;

        let image = decode_image_bytes_gray8(&bytes)?;
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.as_slice(), &[0, 255]);

        Ok(())
    }

    #[test]
    fn read_any_from_file() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");
        std::fs::write(&file_path, encode_rgb_png(1, 2, &[10, 10, 10, 200, 200, 200])?)?;

        let image = read_image_any_gray8(&file_path)?;
        assert_eq!(image.size(), ImageSize { width: 1, height: 2 });
        assert_eq!(image.as_slice(), &[10, 200]);

        Ok(())
    }

    #[test]
    fn read_any_missing_file() {
        let result = read_image_any_gray8("does/not/exist.png");
        assert!(matches!(result, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn write_any_picks_format_from_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = Image::<u8, 1>::new([4, 2].into(), vec![0, 255, 0, 255, 255, 0, 255, 0])?;

        // lossless, so the pixels come back unchanged
        let bmp_path = tmp_dir.path().join("nested").join("mask.bmp");
        write_image_any_gray8(&bmp_path, &image)?;
        assert_eq!(&std::fs::read(&bmp_path)?[..2], b"BM");
        assert_eq!(read_image_any_gray8(&bmp_path)?, image);

        let jpg_path = tmp_dir.path().join("out").join("result.jpg");
        write_image_any_gray8(&jpg_path, &image)?;
        assert_eq!(&std::fs::read(&jpg_path)?[..2], &[0xFF, 0xD8]);
        assert_eq!(read_image_any_gray8(&jpg_path)?.size(), image.size());

        let png_path = tmp_dir.path().join("result.PNG");
        write_image_any_gray8(&png_path, &image)?;
        assert_eq!(&std::fs::read(&png_path)?[1..4], b"PNG");
        assert_eq!(crate::png::read_image_png_mono8(&png_path)?, image);

        Ok(())
    }

    #[test]
    fn write_any_unknown_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;

        for name in ["result.xyz", "result"] {
            let result = write_image_any_gray8(tmp_dir.path().join(name), &image);
            assert!(matches!(result, Err(IoError::InvalidFileExtension(_))));
        }

        Ok(())
    }

    #[test]
    fn decode_garbage() {
        let result = decode_image_bytes_gray8(&[1, 2, 3, 4]);
        assert!(matches!(result, Err(IoError::ImageDecodeError(_))));
    }
}
