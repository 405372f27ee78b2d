use super::{Color, QuadNode, Rect};

/// Overwrites every pixel of `rect` in `img` with `color`.
///
/// Parts of `rect` outside `img` are ignored.
pub fn fill_rect(img: &mut image::RgbImage, rect: Rect, color: Color) {
	image::imageops::replace(
		img,
		&image::RgbImage::from_pixel(rect.width(), rect.height(), color),
		rect.left as i64,
		rect.top as i64,
	);
}

impl QuadNode {
	/// Pushes the nodes that are visible when the tree is cut off at `depth`
	/// onto `out`, in NW, NE, SW, SE order.
	///
	/// A node is visible if it is a leaf or sits exactly at `depth`; its
	/// descendants are then skipped.
	pub fn collect<'a>(&'a self, depth: usize, out: &mut Vec<&'a QuadNode>) {
		match self.sections {
			Some(ref sects) if self.depth != depth => {
				for section in sects.iter() {
					section.collect(depth, out);
				}
			},
			_ => out.push(self),
		}
	}

	/// Draws this node's region into `img` as seen at `depth`.
	///
	/// Pixels outside `self.rect` are left untouched.
	pub fn draw(&self, img: &mut image::RgbImage, depth: usize) {
		let mut visible = Vec::new();
		self.collect(depth, &mut visible);
		for node in visible {
			fill_rect(img, node.rect, node.color);
		}
	}
}
