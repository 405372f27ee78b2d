use quadtree_compress::error::{DecodeError, EncodeError};
use quadtree_compress::{AnimationOptions, BuildOptions, QuadTree, ERROR_THRESHOLD};

use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// Parses an optional numeric argument, exiting on malformed input.
fn numeric_arg<T: FromStr>(matches: &clap::ArgMatches, name: &str, default: T) -> T {
	match matches.value_of(name) {
		Some(v) => match v.parse() {
			Ok(n) => n,
			Err(_) => error_exit(&format!("Non-numeric value for {}", name), 2)
		},
		None => default
	}
}

/// Builds the output path: `<out_dir>/<stem>.gif` for animations, otherwise
/// `<out_dir>/<file name of input>`.
fn output_path(input: &Path, out_dir: &Path, gif: bool) -> PathBuf {
	let name = if gif {
		input.file_stem().map(|s| Path::new(s).with_extension("gif"))
	} else {
		input.file_name().map(PathBuf::from)
	};
	match name {
		Some(n) => out_dir.join(n),
		None => error_exit("Input path has no file name", 2)
	}
}

/// `clap`-based CLI for compressing images into quadtree renderings.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let clap_matches = clap::App::new("quadtree_compress")
		.version(env!("CARGO_PKG_VERSION"))
		.author("vkcz")
		.about("Compresses an image by flattening the quadrants of a quadtree.")
		.arg_from_usage("-i, --image=<PATH> 'Path to the source image'")
		.arg_from_usage("-d, --depth=[N] 'Maximum subdivision depth; defaults to 0'")
		.arg_from_usage("-t, --threshold=[F] 'Error at or below which a quadrant is not split; defaults to 7'")
		.arg_from_usage("-g, --gif 'Write an animation stepping through every depth instead of a single image'")
		.arg_from_usage("-o, --out-dir=[DIR] 'Directory for the output file; defaults to results'")
		.arg_from_usage("--duration=[MS] 'Milliseconds per animation frame (--gif only); defaults to 1000'")
		.arg_from_usage("--loop=[N] 'Times to play the animation, 0 for forever (--gif only); defaults to 0'")
		.get_matches();

	let input = Path::new(clap_matches.value_of("image").unwrap_or_default());
	let opts = BuildOptions::default()
		.max_depth(numeric_arg(&clap_matches, "depth", 0))
		.error_threshold(numeric_arg(&clap_matches, "threshold", ERROR_THRESHOLD));
	if !(opts.error_threshold >= 0.) {
		error_exit("Threshold must be a non-negative number", 2)
	}
	let anim = AnimationOptions {
		frame_duration_ms: numeric_arg(&clap_matches, "duration", 1000),
		loop_count: numeric_arg(&clap_matches, "loop", 0),
	};
	let gif = clap_matches.is_present("gif");

	let tree = match QuadTree::open(input, &opts) {
		Ok(t) => t,
		Err(e) => {
			let code = match e {
				DecodeError::Io(_) => 3,
				DecodeError::InvalidData(_) => 4,
				DecodeError::LimitsExceeded(_) => 5,
				DecodeError::Other(_) => 10
			};
			error_exit(&e.to_string(), code)
		}
	};

	let out_dir = Path::new(clap_matches.value_of("out-dir").unwrap_or("results"));
	if std::fs::create_dir_all(out_dir).is_err() {
		error_exit("Could not create output directory", 3)
	}
	let out_path = output_path(input, out_dir, gif);
	let saved = if gif {
		tree.save_animation(&out_path, &anim)
	} else {
		tree.save_static(&out_path)
	};
	match saved {
		Ok(()) => (),
		Err(e) => {
			let code = match e {
				EncodeError::Unsupported(_) => 2,
				EncodeError::Io(_) => 3,
				EncodeError::Other(_) => 10
			};
			error_exit(&e.to_string(), code)
		}
	}
}
