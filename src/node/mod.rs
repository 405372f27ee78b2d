pub mod error;
pub mod histogram;

/// Flat color of a node's region.
pub type Color = image::Rgb<u8>;

/// Rectangle in source-image pixel coordinates.
///
/// `right` and `bottom` are exclusive, so a rectangle with `left == right`
/// covers no pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
	pub left: u32,
	pub top: u32,
	pub right: u32,
	pub bottom: u32,
}

impl Rect {
	pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
		Rect { left, top, right, bottom }
	}

	pub fn width(&self) -> u32 {
		self.right - self.left
	}

	pub fn height(&self) -> u32 {
		self.bottom - self.top
	}

	pub fn area(&self) -> u64 {
		self.width() as u64 * self.height() as u64
	}

	/// Splits into north-west, north-east, south-west and south-east
	/// quadrants, in that order.
	///
	/// Each axis is cut at its midpoint rounded down, so odd sizes give
	/// the larger half to the east and south quadrants.
	pub fn quadrants(&self) -> [Rect; 4] {
		let mid_x = self.left + self.width() / 2;
		let mid_y = self.top + self.height() / 2;
		[
			Rect::new(self.left, self.top, mid_x, mid_y),
			Rect::new(mid_x, self.top, self.right, mid_y),
			Rect::new(self.left, mid_y, mid_x, self.bottom),
			Rect::new(mid_x, mid_y, self.right, self.bottom),
		]
	}
}

/// Node in a quadtree approximating a region of an image.
///
/// May contain subnodes (branch node) or no subnodes (leaf node).
///
/// It always carries the color and error of its whole region, such that
/// tree descent can stop at any level and give a meaningful preview.
#[derive(Clone, Debug)]
pub struct QuadNode {
	pub rect: Rect,
	pub depth: usize,
	pub color: Color,
	/// Luma-weighted standard deviation of the region's colors.
	pub error: f64,
	pub sections: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
	/// Measures the region `rect` of `img` without subdividing it.
	///
	/// `rect` must lie within the bounds of `img`.
	pub fn new(img: &image::RgbImage, rect: Rect, depth: usize) -> Self {
		let hist = histogram::histogram(img, rect);
		let (color, error) = histogram::color_and_error(&hist);
		QuadNode { rect, depth, color, error, sections: None }
	}

	pub fn is_leaf(&self) -> bool {
		self.sections.is_none()
	}

	/// Replaces any existing subsections with four freshly measured quadrants
	/// one level deeper.
	///
	/// Doesn't recurse; see `build::subdivide` for that.
	pub fn split(&mut self, img: &image::RgbImage) {
		let [nw, ne, sw, se] = self.rect.quadrants();
		let depth = self.depth + 1;
		self.sections = Some(Box::new([
			QuadNode::new(img, nw, depth),
			QuadNode::new(img, ne, depth),
			QuadNode::new(img, sw, depth),
			QuadNode::new(img, se, depth),
		]));
	}

	/// Iterates over every leaf below (or at) this node, in
	/// NW, NE, SW, SE order.
	pub fn leaves(&self) -> Box<dyn Iterator<Item = &QuadNode> + '_> {
		match self.sections {
			Some(ref sects) => Box::new(sects.iter().flat_map(|s| s.leaves())),
			None => Box::new(std::iter::once(self)),
		}
	}
}

pub mod build;
pub mod render;
