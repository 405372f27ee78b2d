use rayon::prelude::*;

use super::QuadNode;

/// Error below which a region is considered uniform and left unsplit.
pub const ERROR_THRESHOLD: f64 = 7.0;

/// Parameters for turning an image into a quadtree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildOptions {
	/// Depth past which nodes are never split. 0 leaves only the root.
	pub max_depth: usize,
	/// Nodes with an error at or below this are never split.
	pub error_threshold: f64,
	/// Nodes shallower than this hand their four subtrees to the thread pool;
	/// deeper ones recurse on the current thread. 1 parallelizes only the
	/// root's children, 0 builds everything on the calling thread.
	pub parallel_depth: usize,
}

impl Default for BuildOptions {
	fn default() -> Self {
		BuildOptions {
			max_depth: 0,
			error_threshold: ERROR_THRESHOLD,
			parallel_depth: 1,
		}
	}
}

impl BuildOptions {
	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn error_threshold(mut self, error_threshold: f64) -> Self {
		self.error_threshold = error_threshold;
		self
	}

	pub fn parallel_depth(mut self, parallel_depth: usize) -> Self {
		self.parallel_depth = parallel_depth;
		self
	}

	fn is_final(&self, node: &QuadNode) -> bool {
		node.depth >= self.max_depth || node.error <= self.error_threshold
	}
}

/// Recursively splits `node` until every leaf is uniform enough or as deep
/// as `opts` allows.
///
/// Returns the depth of the deepest leaf in the resulting subtree.
pub fn subdivide(img: &image::RgbImage, node: &mut QuadNode, opts: &BuildOptions) -> usize {
	if opts.is_final(node) {
		return node.depth;
	}
	node.split(img);
	let parallel = node.depth < opts.parallel_depth;
	let depth = node.depth;
	let sections = match node.sections {
		Some(ref mut sects) => sects,
		None => return depth,
	};
	let deepest = if parallel {
		log::debug!("fanning out {} subtrees at depth {}", sections.len(), depth);
		sections.par_iter_mut()
			.map(|s| subdivide(img, s, opts))
			.max()
	} else {
		sections.iter_mut()
			.map(|s| subdivide(img, s, opts))
			.max()
	};
	deepest.unwrap_or(depth)
}
