use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

/// Main error type for the gif-stitch library
///
/// Each variant is tagged with an [`ErrorKind`], carries a message naming the
/// offending file or argument, and keeps its underlying cause (if any) as the
/// error `source`, so the whole chain can be printed.
#[derive(Error, Debug)]
pub enum StitchError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("Decode error: cannot decode {path}")]
    Decode {
        path: String,
        #[source]
        source: DecodeFailure,
    },

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Coarse classification of a [`StitchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Io,
    Decode,
    Encode,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Io => "io",
            Self::Decode => "decode",
            Self::Encode => "encode",
            Self::Config => "config",
        };
        f.write_str(name)
    }
}

/// Bad or missing command-line arguments
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("no input files specified")]
    NoInputFiles,

    #[error("count mismatch (len(files)={files}, len(loops)={loops})")]
    CountMismatch { files: usize, loops: usize },

    #[error("invalid loop count token: {token:?}")]
    InvalidLoopCount {
        token: String,
        #[source]
        source: ParseIntError,
    },
}

/// Failures opening inputs or writing the output
#[derive(Error, Debug)]
pub enum IoError {
    #[error("cannot open {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create/write output {path}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure reported by a codec while decoding one input
#[derive(Error, Debug)]
pub enum DecodeFailure {
    #[error(transparent)]
    Gif(#[from] gif::DecodingError),

    #[error("frame {index} has no color table")]
    MissingPalette { index: usize },

    #[error("{0}")]
    Malformed(String),
}

/// Failure reported by a codec while encoding the output
#[derive(Error, Debug)]
pub enum EncodeFailure {
    #[error(transparent)]
    Gif(#[from] gif::EncodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Output serialization errors
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("no frames to encode")]
    Empty,

    #[error("frame {index} out of bounds ({right}x{bottom} exceeds {width}x{height} screen)")]
    FrameOutOfBounds {
        index: usize,
        right: u32,
        bottom: u32,
        width: u16,
        height: u16,
    },

    #[error("cannot encode merged gif")]
    Codec {
        #[source]
        source: EncodeFailure,
    },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration file: {path}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {reason}")]
    SerializeFailed { reason: String },
}

/// Convenience type alias for Results using StitchError
pub type Result<T> = std::result::Result<T, StitchError>;

impl StitchError {
    /// Tag identifying which stage of the pipeline failed
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Io(_) => ErrorKind::Io,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::NoInputFiles) => {
                "No input files specified. Pass a comma-separated list with --files.".to_string()
            }
            Self::Validation(ValidationError::CountMismatch { files, loops }) => {
                format!(
                    "Got {} files but {} loop counts. Pass one loop count per file, or none at all.",
                    files, loops
                )
            }
            Self::Io(IoError::Open { path, .. }) => {
                format!("Could not open '{}'. Please check the file exists and is readable.", path)
            }
            Self::Decode { path, .. } => {
                format!("Could not decode '{}'. Is it a valid GIF file?", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kind_tags() {
        let err: StitchError = ValidationError::NoInputFiles.into();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: StitchError = EncodeError::Empty.into();
        assert_eq!(err.kind(), ErrorKind::Encode);

        let err: StitchError = IoError::Open {
            path: "a.gif".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.kind().to_string(), "io");
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err: StitchError = IoError::Open {
            path: "a.gif".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert!(err.to_string().contains("cannot open a.gif"));

        let err: StitchError = ValidationError::CountMismatch { files: 2, loops: 1 }.into();
        assert_eq!(
            err.to_string(),
            "Validation error: count mismatch (len(files)=2, len(loops)=1)"
        );
    }

    #[test]
    fn test_cause_chain_is_preserved() {
        let parse_err = "x".parse::<u32>().unwrap_err();
        let err: StitchError = ValidationError::InvalidLoopCount {
            token: "x".to_string(),
            source: parse_err,
        }
        .into();

        // StitchError -> ValidationError -> ParseIntError
        let validation = err.source().expect("validation layer");
        let parse = validation.source().expect("parse layer");
        assert!(parse.downcast_ref::<ParseIntError>().is_some());
    }

    #[test]
    fn test_user_messages() {
        let err: StitchError = ValidationError::NoInputFiles.into();
        assert!(err.user_message().contains("--files"));

        let err: StitchError = ValidationError::CountMismatch { files: 3, loops: 2 }.into();
        assert!(err.user_message().starts_with("Got 3 files but 2 loop counts"));

        let err: StitchError = IoError::Open {
            path: "missing.gif".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert!(err.user_message().contains("'missing.gif'"));

        let err = StitchError::Decode {
            path: "broken.gif".to_string(),
            source: DecodeFailure::MissingPalette { index: 0 },
        };
        assert_eq!(
            err.user_message(),
            "Could not decode 'broken.gif'. Is it a valid GIF file?"
        );

        // Everything else falls back to the error's own message
        let err: StitchError = EncodeError::Empty.into();
        assert_eq!(err.user_message(), err.to_string());
    }
}
