use std::{fs, io::BufReader, io::BufWriter, path::Path};

use png::{BitDepth, ColorType, Decoder, Encoder};
use vispyx_image::{Image, ImageSize};

use crate::error::IoError;

/// Read a PNG image with a single channel (mono8).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
///
/// # Errors
///
/// Fails if the file is missing, has no `png` extension, or is not an 8-bit
/// grayscale PNG.
pub fn read_image_png_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("png"))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = fs::File::open(file_path)?;
    let mut reader = Decoder::new(BufReader::new(file))
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    if info.color_type != ColorType::Grayscale || info.bit_depth != BitDepth::Eight {
        return Err(IoError::PngDecodeError(format!(
            "Expected an 8-bit grayscale image, got {:?} with {:?}",
            info.color_type, info.bit_depth
        )));
    }

    buf.truncate(info.buffer_size());

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };

    Ok(Image::new(size, buf)?)
}

/// Writes the given PNG _(gray8)_ data to the given file path.
///
/// Missing parent directories are created.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The grayscale image to encode.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = fs::File::create(file_path)?;
    let mut encoder = Encoder::new(
        BufWriter::new(file),
        image.width() as u32,
        image.height() as u32,
    );
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    writer
        .write_image_data(image.as_slice())
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    log::debug!("wrote {} ({})", file_path.display(), image.size());

    Ok(())
}
