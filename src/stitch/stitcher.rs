use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{EncodeError, EncodeFailure, IoError, Result, StitchError};
use crate::resolver::{Task, TaskList};
use crate::stitch::codec::{Codec, GifCodec};
use crate::stitch::types::{DecodedAnimation, FrameSequence};

/// Summary of a written output animation
#[derive(Debug, Clone)]
pub struct EncodedGif {
    pub path: PathBuf,
    pub frame_count: usize,
    /// One loop's play time, in hundredths of a second
    pub duration_centis: u64,
    pub file_size: u64,
}

/// Concatenates the frames of several animations
///
/// Tasks run strictly in order. Each input is decoded once; repeating it
/// appends the same decoded frames again.
pub struct Stitcher<C: Codec = GifCodec> {
    codec: C,
}

impl Stitcher<GifCodec> {
    /// Create a stitcher using the `gif` crate codec
    pub fn new() -> Self {
        Self::with_codec(GifCodec::new())
    }
}

impl Default for Stitcher<GifCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> Stitcher<C> {
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// Decode every task's input and concatenate the frames
    ///
    /// The first failing task aborts the whole run; nothing accumulated so
    /// far is returned.
    pub fn stitch(&self, tasks: &TaskList) -> Result<FrameSequence> {
        info!("Stitching {} inputs", tasks.len());

        let mut sequence = FrameSequence::new();
        for task in tasks {
            self.add(&mut sequence, task)?;
        }

        info!(
            "Stitched {} frames ({:.2}s per loop)",
            sequence.len(),
            sequence.duration_centis() as f64 / 100.0
        );
        Ok(sequence)
    }

    /// Append one task's frames `repeat_count` times
    ///
    /// Returns the number of frames appended. On error `sequence` is left
    /// untouched.
    pub fn add(&self, sequence: &mut FrameSequence, task: &Task) -> Result<usize> {
        let decoded = self.decode(&task.source)?;

        if let Some(screen) = sequence.screen() {
            if screen != decoded.screen() && task.repeat_count > 0 {
                warn!(
                    "{} is {}x{} but output is {}x{}",
                    task.source,
                    decoded.screen().0,
                    decoded.screen().1,
                    screen.0,
                    screen.1
                );
            }
        }

        for _ in 0..task.repeat_count {
            sequence.append(&decoded);
        }

        let appended = decoded.len() * task.repeat_count as usize;
        debug!(
            "Added {} x{} ({} frames, {} total)",
            task.source,
            task.repeat_count,
            appended,
            sequence.len()
        );
        Ok(appended)
    }

    /// Open and decode one input; the file handle is closed on return
    fn decode(&self, source: &str) -> Result<DecodedAnimation> {
        let file = File::open(source).map_err(|e| IoError::Open {
            path: source.to_string(),
            source: e,
        })?;
        let mut reader = BufReader::new(file);

        self.codec
            .decode_all(&mut reader)
            .map_err(|e| StitchError::Decode {
                path: source.to_string(),
                source: e,
            })
    }

    /// Encode `sequence` to any writer
    pub fn encode<W: Write>(&self, sequence: &FrameSequence, mut sink: W) -> Result<()> {
        self.codec.encode_all(&mut sink, sequence)?;
        sink.flush().map_err(|e| EncodeError::Codec { source: e.into() })?;
        Ok(())
    }

    /// Encode `sequence` to the file at `path`
    ///
    /// The animation is written to a temporary file next to `path` and
    /// renamed into place once complete, so a failed run leaves no output
    /// file behind.
    pub fn save<P: AsRef<Path>>(&self, sequence: &FrameSequence, path: P) -> Result<EncodedGif> {
        let path = path.as_ref();
        sequence.check_encodable()?;

        let output_error = |source: std::io::Error| IoError::Output {
            path: path.display().to_string(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".gif-stitch").suffix(".tmp");
        // Same mode as a plainly created file (0666 less umask), not 0600
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder.tempfile_in(dir).map_err(output_error)?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            self.codec
                .encode_all(&mut writer, sequence)
                .map_err(|e| classify_encode_error(e, path))?;
            writer.flush().map_err(output_error)?;
        }

        let file = tmp.persist(path).map_err(|e| output_error(e.error))?;
        let file_size = file.metadata().map_err(output_error)?.len();

        info!("Wrote {:?} ({} frames, {} bytes)", path, sequence.len(), file_size);

        Ok(EncodedGif {
            path: path.to_path_buf(),
            frame_count: sequence.len(),
            duration_centis: sequence.duration_centis(),
            file_size,
        })
    }
}

/// Writer failures surface as output I/O errors, not codec errors
fn classify_encode_error(err: EncodeError, path: &Path) -> StitchError {
    let source = match err {
        EncodeError::Codec {
            source: EncodeFailure::Io(source),
        }
        | EncodeError::Codec {
            source: EncodeFailure::Gif(gif::EncodingError::Io(source)),
        } => source,
        other => return other.into(),
    };

    IoError::Output {
        path: path.display().to_string(),
        source,
    }
    .into()
}

/// Stitch `tasks` with the default `gif` codec
pub fn stitch(tasks: &TaskList) -> Result<FrameSequence> {
    Stitcher::new().stitch(tasks)
}
