//! # gif-stitch
//!
//! Concatenate animated GIFs into one, repeating each input a configurable
//! number of times.
//!
//! Each input is decoded once, its frames and per-frame delays are appended
//! to the output as many times as requested, and the combined animation is
//! written in a single pass. Frames are never re-quantized or re-timed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gif_stitch::{Config, StitchEngine};
//!
//! # fn main() -> gif_stitch::Result<()> {
//! let config = Config::default()
//!     .with_overrides(Some("intro.gif,loop.gif"), Some("1,3"), None)?;
//!
//! let encoded = StitchEngine::new(config).run()?;
//! println!("{} frames written to {:?}", encoded.frame_count, encoded.path);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`resolver`] - Pairs file names with loop counts
//! - [`stitch`] - Decodes, concatenates and encodes frames
//! - [`engine`] - Runs the whole pipeline for one [`Config`]
//! - [`config`] - Configuration management
//!
//! ## Custom codecs
//!
//! The stitcher only needs decode-all / encode-all. Implement
//! [`Codec`](stitch::Codec) to plug in something other than the `gif` crate:
//!
//! ```rust,no_run
//! use std::io::{Read, Write};
//! use gif_stitch::error::{DecodeFailure, EncodeError};
//! use gif_stitch::stitch::{Codec, DecodedAnimation, FrameSequence, Stitcher};
//!
//! struct MyCodec;
//!
//! impl Codec for MyCodec {
//!     fn decode_all(&self, source: &mut dyn Read) -> Result<DecodedAnimation, DecodeFailure> {
//!         // Your decoder here
//!         Ok(DecodedAnimation::new(0, 0))
//!     }
//!
//!     fn encode_all(&self, sink: &mut dyn Write, sequence: &FrameSequence) -> Result<(), EncodeError> {
//!         // Your encoder here
//!         Ok(())
//!     }
//! }
//!
//! let stitcher = Stitcher::with_codec(MyCodec);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod stitch;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    engine::StitchEngine,
    error::{ErrorKind, Result, StitchError},
    resolver::{resolve, Task, TaskList},
    stitch::{FrameSequence, Stitcher},
};
