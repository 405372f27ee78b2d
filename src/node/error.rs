use image::error::ImageError;

/// Reason why a source image couldn't be read into a pixel buffer.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	/// The file doesn't exist or couldn't be read.
	#[error("file not found or could not be read")]
	Io(#[source] std::io::Error),
	/// The file was read but its contents are not a valid image.
	#[error("invalid image data")]
	InvalidData(#[source] ImageError),
	/// The decoder refused the image for being too large.
	#[error("computation limits exceeded")]
	LimitsExceeded(#[source] ImageError),
	#[error("an error occurred while decoding")]
	Other(#[source] ImageError),
}

impl From<ImageError> for DecodeError {
	fn from(e: ImageError) -> Self {
		match e {
			ImageError::IoError(e) => DecodeError::Io(e),
			e @ ImageError::Decoding(_) |
			e @ ImageError::Unsupported(_) => DecodeError::InvalidData(e),
			e @ ImageError::Limits(_) => DecodeError::LimitsExceeded(e),
			e => DecodeError::Other(e),
		}
	}
}

/// Reason why a quadtree couldn't be queried or rendered at some depth.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DrawError {
	/// The requested depth is deeper than any leaf the build produced.
	#[error("depth {requested} is out of range; the tree only reaches depth {reached}")]
	DepthOutOfRange {
		requested: usize,
		reached: usize,
	},
}

/// Reason why a rendering couldn't be written out.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
	/// The output path names a format that can't be encoded.
	#[error("unsupported output format")]
	Unsupported(#[source] ImageError),
	/// The output file couldn't be created or written.
	#[error("could not write output file")]
	Io(#[source] std::io::Error),
	#[error("an error occurred while encoding")]
	Other(#[source] ImageError),
}

impl From<ImageError> for EncodeError {
	fn from(e: ImageError) -> Self {
		match e {
			ImageError::IoError(e) => EncodeError::Io(e),
			e @ ImageError::Unsupported(_) => EncodeError::Unsupported(e),
			e => EncodeError::Other(e),
		}
	}
}

impl From<std::io::Error> for EncodeError {
	fn from(e: std::io::Error) -> Self {
		EncodeError::Io(e)
	}
}
