//! # Argument Resolver
//!
//! Turns raw file names and loop counts into an ordered [`TaskList`].
//!
//! ## Usage
//!
//! ```rust
//! use gif_stitch::resolver::{parse_file_list, parse_loop_list, resolve};
//!
//! # fn main() -> gif_stitch::Result<()> {
//! let files = parse_file_list("a.gif,b.gif")?;
//! let loops = parse_loop_list("2,1")?;
//! let tasks = resolve(&files, &loops)?;
//!
//! assert_eq!(tasks.len(), 2);
//! assert_eq!(tasks.get(0).unwrap().repeat_count, 2);
//! # Ok(())
//! # }
//! ```

pub mod parse;
pub mod types;

pub use parse::{parse_file_list, parse_loop_list, resolve, DEFAULT_REPEAT_COUNT};
pub use types::{Task, TaskList};
