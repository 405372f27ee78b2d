use super::{Color, Rect};

/// Number of buckets in a full RGB histogram: 256 per channel.
pub const HISTOGRAM_LEN: usize = 768;

/// Luma weights applied to the red, green and blue errors.
const LUMA: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Counts the intensities of every pixel inside `rect`.
///
/// The result holds three consecutive 256-bucket channel histograms, in
/// red, green, blue order. An empty `rect` gives an all-zero histogram.
pub fn histogram(img: &image::RgbImage, rect: Rect) -> [u32; HISTOGRAM_LEN] {
	let mut hist = [0u32; HISTOGRAM_LEN];
	for y in rect.top..rect.bottom {
		for x in rect.left..rect.right {
			let px = img.get_pixel(x, y);
			hist[px.0[0] as usize] += 1;
			hist[256 + px.0[1] as usize] += 1;
			hist[512 + px.0[2] as usize] += 1;
		}
	}
	hist
}

/// Mean intensity and standard deviation of one channel's histogram.
///
/// Both are 0 for an empty histogram.
pub fn weighted_average(segment: &[u32]) -> (f64, f64) {
	let total: f64 = segment.iter().map(|&n| n as f64).sum();
	if total == 0. {
		return (0., 0.);
	}
	let mean = segment.iter()
		.enumerate()
		.map(|(i, &n)| i as f64 * n as f64)
		.sum::<f64>() / total;
	let variance = segment.iter()
		.enumerate()
		.map(|(i, &n)| n as f64 * (mean - i as f64).powi(2))
		.sum::<f64>() / total;
	(mean, variance.sqrt())
}

/// Derives a node's flat color and perceptual error from its histogram.
///
/// Channel means are truncated, not rounded.
pub fn color_and_error(hist: &[u32; HISTOGRAM_LEN]) -> (Color, f64) {
	let mut color = [0u8; 3];
	let mut error = 0.;
	for (chan, segment) in hist.chunks_exact(256).enumerate() {
		let (mean, err) = weighted_average(segment);
		color[chan] = mean.max(0.).min(255.) as u8;
		error += err * LUMA[chan];
	}
	(image::Rgb(color), error)
}
