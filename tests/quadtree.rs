use image::{Rgb, RgbImage};

use quadtree_compress::error::DrawError;
use quadtree_compress::{AnimationOptions, BuildOptions, QuadNode, QuadTree};

/// Deterministic, high-variance test image.
fn noise(width: u32, height: u32) -> RgbImage {
	let mut state = 0x2545_f491u32;
	RgbImage::from_fn(width, height, |_, _| {
		state ^= state << 13;
		state ^= state >> 17;
		state ^= state << 5;
		let [r, g, b, _] = state.to_le_bytes();
		Rgb([r, g, b])
	})
}

/// Smooth gradient with a sharp block, so some branches stop early.
fn scene(width: u32, height: u32) -> RgbImage {
	RgbImage::from_fn(width, height, |x, y| {
		if x > width / 2 && y > height / 3 {
			Rgb([240, 240, 240])
		} else {
			Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 90])
		}
	})
}

fn assert_partition(nodes: &[&QuadNode], width: u32, height: u32) {
	let mut hits = vec![0u32; (width * height) as usize];
	for node in nodes {
		for y in node.rect.top..node.rect.bottom {
			for x in node.rect.left..node.rect.right {
				hits[(y * width + x) as usize] += 1;
			}
		}
	}
	assert!(hits.iter().all(|&h| h == 1), "nodes do not partition the image");
}

#[test]
fn uniform_image_is_single_leaf() {
	let img = RgbImage::from_pixel(64, 64, Rgb([37, 142, 201]));
	let tree = QuadTree::new(&img, &BuildOptions::default().max_depth(4));
	assert_eq!(tree.max_depth_reached(), 0);
	assert_eq!(tree.leaf_count(), 1);
	assert!(tree.root().is_leaf());
	assert_eq!(tree.render(0).unwrap(), img);
}

#[test]
fn four_corners_split_once() {
	let mut img = RgbImage::new(2, 2);
	img.put_pixel(0, 0, Rgb([250, 10, 10]));
	img.put_pixel(1, 0, Rgb([10, 250, 10]));
	img.put_pixel(0, 1, Rgb([10, 10, 250]));
	img.put_pixel(1, 1, Rgb([200, 200, 30]));
	for depth in 1..4 {
		let tree = QuadTree::new(&img, &BuildOptions::default().max_depth(depth));
		assert_eq!(tree.max_depth_reached(), 1);
		let leaves = tree.collect_nodes(1).unwrap();
		assert_eq!(leaves.len(), 4);
		let corners = [(0, 0), (1, 0), (0, 1), (1, 1)];
		for (leaf, &(x, y)) in leaves.iter().zip(corners.iter()) {
			assert!(leaf.is_leaf());
			assert_eq!(leaf.color, *img.get_pixel(x, y));
		}
		assert_eq!(tree.render(1).unwrap(), img);
	}
}

#[test]
fn leaves_obey_depth_and_threshold() {
	let img = scene(90, 61);
	for &threshold in [0., 7., 30.].iter() {
		for max_depth in 0..6 {
			let opts = BuildOptions::default()
				.max_depth(max_depth)
				.error_threshold(threshold);
			let tree = QuadTree::new(&img, &opts);
			assert!(tree.max_depth_reached() <= max_depth);
			for leaf in tree.root().leaves() {
				assert!(leaf.depth <= max_depth);
				if leaf.depth < max_depth {
					assert!(leaf.error <= threshold, "leaf {:?} should have split", leaf.rect);
				}
			}
			let deepest = tree.root().leaves().map(|l| l.depth).max();
			assert_eq!(deepest, Some(tree.max_depth_reached()));
		}
	}
}

#[test]
fn threshold_can_stop_before_depth_limit() {
	let img = RgbImage::from_fn(32, 32, |x, _| if x < 16 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) });
	let tree = QuadTree::new(&img, &BuildOptions::default().max_depth(8));
	assert_eq!(tree.max_depth_reached(), 1);
}

#[test]
fn every_depth_partitions_image() {
	let (w, h) = (45, 29);
	let tree = QuadTree::new(&noise(w, h), &BuildOptions::default().max_depth(7));
	for depth in 0..=tree.max_depth_reached() {
		assert_partition(&tree.collect_nodes(depth).unwrap(), w, h);
	}
	let full = tree.collect_nodes(tree.max_depth_reached()).unwrap();
	assert!(full.iter().all(|n| n.is_leaf()));
	assert_eq!(full.len(), tree.leaf_count());
}

#[test]
fn depth_zero_is_flat() {
	let tree = QuadTree::new(&noise(33, 17), &BuildOptions::default().max_depth(3));
	let flat = tree.render(0).unwrap();
	let first = *flat.get_pixel(0, 0);
	assert_eq!(first, tree.root().color);
	assert!(flat.pixels().all(|p| *p == first));
}

#[test]
fn rendering_is_idempotent() {
	let tree = QuadTree::new(&scene(50, 50), &BuildOptions::default().max_depth(5));
	for depth in 0..=tree.max_depth_reached() {
		assert_eq!(tree.render(depth).unwrap(), tree.render(depth).unwrap());
	}
}

#[test]
fn fidelity_improves_with_depth() {
	for img in [noise(64, 48), scene(70, 70)].iter() {
		let tree = QuadTree::new(img, &BuildOptions::default().max_depth(6));
		assert!(tree.max_depth_reached() > 0);
		let errors: Vec<f64> = (0..=tree.max_depth_reached())
			.map(|d| tree.weighted_error(d).unwrap())
			.collect();
		for pair in errors.windows(2) {
			assert!(pair[1] <= pair[0] + 1e-9, "{:?}", errors);
		}
	}
}

#[test]
fn out_of_range_depth_fails() {
	let tree = QuadTree::new(&scene(20, 20), &BuildOptions::default().max_depth(2));
	let reached = tree.max_depth_reached();
	match tree.collect_nodes(reached + 1) {
		Err(DrawError::DepthOutOfRange { requested, reached: r }) => {
			assert_eq!(requested, reached + 1);
			assert_eq!(r, reached);
		},
		other => panic!("expected DepthOutOfRange, got {:?}", other.map(|n| n.len())),
	}
	assert!(tree.render(reached + 5).is_err());
}

#[test]
fn animation_frame_count() {
	for max_depth in 0..5 {
		let tree = QuadTree::new(&noise(24, 24), &BuildOptions::default().max_depth(max_depth));
		let frames = tree.animation_frames();
		assert_eq!(frames.len(), tree.max_depth_reached() + 4);
		let last = tree.render(tree.max_depth_reached()).unwrap();
		assert!(frames[frames.len() - 4..].iter().all(|f| *f == last));
	}
}

#[test]
fn degenerate_strips_terminate() {
	// One pixel wide: splits produce empty quadrants which stay black leaves.
	let img = noise(1, 40);
	let tree = QuadTree::new(&img, &BuildOptions::default().max_depth(6));
	assert!(tree.max_depth_reached() <= 6);
	assert_partition(&tree.collect_nodes(tree.max_depth_reached()).unwrap(), 1, 40);
	for leaf in tree.root().leaves().filter(|l| l.rect.area() == 0) {
		assert_eq!(leaf.color, Rgb([0, 0, 0]));
		assert_eq!(leaf.error, 0.);
	}
}

#[test]
fn saves_static_and_animation() {
	let dir = tempfile::tempdir().unwrap();
	let img = scene(40, 30);
	let tree = QuadTree::new(&img, &BuildOptions::default().max_depth(3));

	let png = dir.path().join("scene.png");
	tree.save_static(&png).unwrap();
	let decoded = image::open(&png).unwrap().into_rgb8();
	assert_eq!(decoded, tree.render(tree.max_depth_reached()).unwrap());

	let gif = dir.path().join("scene.gif");
	tree.save_animation(&gif, &AnimationOptions::default()).unwrap();
	assert!(std::fs::metadata(&gif).unwrap().len() > 0);

	let reopened = QuadTree::open(&png, &BuildOptions::default().max_depth(3)).unwrap();
	assert_eq!((reopened.width(), reopened.height()), (40, 30));
}
