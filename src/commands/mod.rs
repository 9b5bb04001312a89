//! Command handlers for front ends.
//!
//! - [`compress_images`]: compress every matching image in a folder

mod compress;

pub use compress::*;
