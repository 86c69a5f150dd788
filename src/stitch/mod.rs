//! # Stitching Module
//!
//! Decodes each input animation, appends its frames and delays the requested
//! number of times, and writes the combined animation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gif_stitch::resolver::resolve;
//! use gif_stitch::stitch::Stitcher;
//!
//! # fn main() -> gif_stitch::Result<()> {
//! let files = vec!["intro.gif".to_string(), "loop.gif".to_string()];
//! let tasks = resolve(&files, &[1, 3])?;
//!
//! let stitcher = Stitcher::new();
//! let sequence = stitcher.stitch(&tasks)?;
//! stitcher.save(&sequence, "merged.gif")?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod stitcher;
pub mod types;

pub use codec::{Codec, GifCodec};
pub use stitcher::{stitch, EncodedGif, Stitcher};
pub use types::{DecodedAnimation, Frame, FrameSequence};
