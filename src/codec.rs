use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};

use crate::node::error::{DecodeError, EncodeError};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Reads any image format `image` understands into an RGB buffer.
///
/// Alpha, if present, is dropped.
pub fn decode<Q: AsRef<Path>>(path: Q) -> Result<RgbImage, DecodeError> {
	Ok(image::open(path)?.into_rgb8())
}

/// Writes `img` to `path`, picking the format from the file extension.
pub fn encode_static<Q: AsRef<Path>>(img: &RgbImage, path: Q) -> Result<(), EncodeError> {
	img.save(path)?;
	Ok(())
}

/// Writes `frames` to `path` as an animated GIF.
///
/// Each frame is shown for `frame_duration_ms`; `loop_count` of 0 loops
/// forever.
pub fn encode_animation<Q, I>(
	frames: I,
	path: Q,
	frame_duration_ms: u32,
	loop_count: u16
) -> Result<(), EncodeError>
where
	Q: AsRef<Path>,
	I: IntoIterator<Item = RgbImage>,
{
	let out_fh = BufWriter::new(File::create(path)?);
	let mut encoder = GifEncoder::new(out_fh);
	encoder.set_repeat(match loop_count {
		0 => Repeat::Infinite,
		n => Repeat::Finite(n),
	})?;
	let delay = Delay::from_numer_denom_ms(frame_duration_ms, 1);
	encoder.encode_frames(frames.into_iter()
		.map(|f| Frame::from_parts(DynamicImage::ImageRgb8(f).into_rgba8(), 0, 0, delay)))?;
	Ok(())
}
