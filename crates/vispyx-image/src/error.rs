/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image size mismatch: got {0}x{1}, expected {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinate ({0}, {1}) is out of bounds for an image of {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds, the image has {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the number of histogram bins is not valid.
    #[error("Invalid number of histogram bins: {0}")]
    InvalidHistogramBins(usize),

    /// Error when the tile grid has no tile along an axis.
    #[error("Tile grid needs at least one tile per axis, got {0}x{1}")]
    InvalidTileGrid(usize, usize),

    /// Error when the contrast clip limit is not a positive number.
    #[error("Clip limit must be a positive finite number, got {0}")]
    InvalidClipLimit(String),
}
