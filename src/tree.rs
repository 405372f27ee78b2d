use image::RgbImage;

use crate::codec;
use crate::node::build::{self, BuildOptions};
use crate::node::error::{DecodeError, DrawError, EncodeError};
use crate::node::{QuadNode, Rect};

use std::path::Path;

/// Number of extra copies of the final frame appended to an animation, so
/// that it lingers before looping.
const FINAL_FRAME_HOLD: usize = 4;

/// Timing of an animation that steps through a tree one depth per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationOptions {
	pub frame_duration_ms: u32,
	/// How many times to play the animation; 0 loops forever.
	pub loop_count: u16,
}

impl Default for AnimationOptions {
	fn default() -> Self {
		AnimationOptions { frame_duration_ms: 1000, loop_count: 0 }
	}
}

/// A fully built quadtree approximation of an image.
///
/// The tree is built once, in `new`, and never changes afterwards.
#[derive(Clone, Debug)]
pub struct QuadTree {
	root: QuadNode,
	width: u32,
	height: u32,
	max_depth_reached: usize,
}

impl QuadTree {
	/// Subdivides `img` according to `opts`, blocking until the whole tree
	/// is built.
	pub fn new(img: &RgbImage, opts: &BuildOptions) -> Self {
		let (width, height) = img.dimensions();
		let mut root = QuadNode::new(img, Rect::new(0, 0, width, height), 0);
		let max_depth_reached = build::subdivide(img, &mut root, opts);
		let tree = QuadTree { root, width, height, max_depth_reached };
		log::info!(
			"built {}x{} quadtree: {} leaves, depth {} of {}",
			width, height, tree.leaf_count(), max_depth_reached, opts.max_depth
		);
		tree
	}

	/// Decodes the image at `path` and builds a tree from it.
	pub fn open<Q: AsRef<Path>>(path: Q, opts: &BuildOptions) -> Result<Self, DecodeError> {
		let img = codec::decode(path)?;
		Ok(QuadTree::new(&img, opts))
	}

	pub fn root(&self) -> &QuadNode {
		&self.root
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	/// Depth of the deepest leaf; may be less than the requested limit if
	/// every branch became uniform earlier.
	pub fn max_depth_reached(&self) -> usize {
		self.max_depth_reached
	}

	pub fn leaf_count(&self) -> usize {
		self.root.leaves().count()
	}

	fn check_depth(&self, depth: usize) -> Result<(), DrawError> {
		if depth > self.max_depth_reached {
			return Err(DrawError::DepthOutOfRange {
				requested: depth,
				reached: self.max_depth_reached,
			});
		}
		Ok(())
	}

	/// Lists the nodes making up the image at `depth`: every leaf no deeper
	/// than `depth`, plus every node exactly at `depth`.
	///
	/// The nodes partition the image and come in depth-first NW, NE, SW, SE
	/// order.
	pub fn collect_nodes(&self, depth: usize) -> Result<Vec<&QuadNode>, DrawError> {
		self.check_depth(depth)?;
		let mut nodes = Vec::new();
		self.root.collect(depth, &mut nodes);
		Ok(nodes)
	}

	/// Renders the approximation of the source image at `depth`.
	pub fn render(&self, depth: usize) -> Result<RgbImage, DrawError> {
		self.check_depth(depth)?;
		let mut img = RgbImage::new(self.width, self.height);
		self.root.draw(&mut img, depth);
		Ok(img)
	}

	/// Mean error of the nodes visible at `depth`, weighted by area.
	///
	/// Never increases as `depth` grows.
	pub fn weighted_error(&self, depth: usize) -> Result<f64, DrawError> {
		let nodes = self.collect_nodes(depth)?;
		let area = self.width as f64 * self.height as f64;
		if area == 0. {
			return Ok(0.);
		}
		Ok(nodes.iter().map(|n| n.error * n.rect.area() as f64).sum::<f64>() / area)
	}

	/// Renders one frame per depth up to `max_depth_reached`, holding the
	/// final one for a few extra frames.
	pub fn animation_frames(&self) -> Vec<RgbImage> {
		let mut frames = Vec::with_capacity(self.max_depth_reached + FINAL_FRAME_HOLD);
		for depth in 0..self.max_depth_reached {
			let mut img = RgbImage::new(self.width, self.height);
			self.root.draw(&mut img, depth);
			frames.push(img);
		}
		let mut last = RgbImage::new(self.width, self.height);
		self.root.draw(&mut last, self.max_depth_reached);
		frames.extend(std::iter::repeat(last).take(FINAL_FRAME_HOLD));
		frames
	}

	/// Writes the full-depth rendering to `path`, in the format named by its
	/// extension.
	pub fn save_static<Q: AsRef<Path>>(&self, path: Q) -> Result<(), EncodeError> {
		let mut img = RgbImage::new(self.width, self.height);
		self.root.draw(&mut img, self.max_depth_reached);
		codec::encode_static(&img, path.as_ref())?;
		log::info!("saved depth {} rendering to {}", self.max_depth_reached, path.as_ref().display());
		Ok(())
	}

	/// Writes `animation_frames` to `path` as an animated GIF.
	pub fn save_animation<Q: AsRef<Path>>(
		&self,
		path: Q,
		opts: &AnimationOptions
	) -> Result<(), EncodeError> {
		let frames = self.animation_frames();
		let count = frames.len();
		codec::encode_animation(frames, path.as_ref(), opts.frame_duration_ms, opts.loop_count)?;
		log::info!("saved {} frame animation to {}", count, path.as_ref().display());
		Ok(())
	}
}
