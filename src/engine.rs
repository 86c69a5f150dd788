use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    config::Config,
    error::{IoError, Result},
    resolver::TaskList,
    stitch::{Codec, EncodedGif, FrameSequence, GifCodec, Stitcher},
};

/// Runs one stitch job end to end
///
/// The pipeline is straight-line:
/// 1. Resolve files and loop counts into tasks
/// 2. Decode and concatenate every task's frames
/// 3. Encode the result to the output file (or stdout)
///
/// Nothing is written until step 3, and only if steps 1 and 2 succeeded.
pub struct StitchEngine<C: Codec = GifCodec> {
    config: Config,
    stitcher: Stitcher<C>,
}

impl StitchEngine<GifCodec> {
    /// Create an engine with the default `gif` codec
    pub fn new(config: Config) -> Self {
        Self::with_codec(config, GifCodec::new())
    }
}

impl<C: Codec> StitchEngine<C> {
    pub fn with_codec(config: Config, codec: C) -> Self {
        Self {
            config,
            stitcher: Stitcher::with_codec(codec),
        }
    }

    /// Run the whole pipeline
    pub fn run(&self) -> Result<EncodedGif> {
        let tasks = self.resolve_tasks()?;
        let sequence = self.stitch_frames(&tasks)?;
        self.write_output(&sequence)
    }

    fn resolve_tasks(&self) -> Result<TaskList> {
        info!("📋 Step 1: Resolving inputs...");

        let tasks = self.config.tasks()?;
        for (i, task) in tasks.iter().enumerate() {
            debug!("   {:02} - {} x{}", i + 1, task.source, task.repeat_count);
        }

        info!("   {} inputs, {} passes", tasks.len(), tasks.total_repeats());
        Ok(tasks)
    }

    fn stitch_frames(&self, tasks: &TaskList) -> Result<FrameSequence> {
        info!("🎞️  Step 2: Stitching frames...");
        self.stitcher.stitch(tasks)
    }

    fn write_output(&self, sequence: &FrameSequence) -> Result<EncodedGif> {
        info!("💾 Step 3: Writing output...");

        if !self.config.writes_to_stdout() {
            return self.stitcher.save(sequence, &self.config.output);
        }

        // Encode fully before touching stdout so a failure writes nothing
        let mut bytes = Vec::new();
        self.stitcher.encode(sequence, &mut bytes)?;

        let stdout_error = |source: std::io::Error| IoError::Output {
            path: "<stdout>".to_string(),
            source,
        };
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&bytes).map_err(stdout_error)?;
        stdout.flush().map_err(stdout_error)?;

        Ok(EncodedGif {
            path: PathBuf::from(crate::config::STDOUT_OUTPUT),
            frame_count: sequence.len(),
            duration_centis: sequence.duration_centis(),
            file_size: bytes.len() as u64,
        })
    }
}
