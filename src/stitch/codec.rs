use std::borrow::Cow;
use std::io::{Read, Write};

use tracing::debug;

use crate::error::{DecodeFailure, EncodeError, EncodeFailure};
use crate::stitch::types::{DecodedAnimation, Frame, FrameSequence};

/// Decode-all / encode-all capability the stitcher depends on
///
/// The stitcher never looks inside the binary format; it only moves whole
/// frame lists in and out through this trait.
pub trait Codec {
    /// Decode every frame and its delay from `source`
    fn decode_all(&self, source: &mut dyn Read) -> Result<DecodedAnimation, DecodeFailure>;

    /// Write `sequence` as one animation to `sink`
    fn encode_all(&self, sink: &mut dyn Write, sequence: &FrameSequence) -> Result<(), EncodeError>;
}

/// [`Codec`] backed by the `gif` crate
///
/// Frames are kept in indexed form end to end; nothing is re-quantized.
/// Frames that rely on their file's global color table get a copy of it as
/// a local table, so frames from different files keep their own colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct GifCodec;

impl GifCodec {
    /// Codec producing an animation that loops forever
    pub fn new() -> Self {
        Self
    }
}

impl Codec for GifCodec {
    fn decode_all(&self, source: &mut dyn Read) -> Result<DecodedAnimation, DecodeFailure> {
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);

        let mut decoder = options.read_info(source)?;
        let global_palette = decoder.global_palette().map(<[u8]>::to_vec);
        let mut animation = DecodedAnimation::new(decoder.width(), decoder.height());

        while let Some(frame) = decoder.read_next_frame()? {
            let mut frame = frame.clone();
            if frame.palette.is_none() {
                match &global_palette {
                    Some(palette) => frame.palette = Some(palette.clone()),
                    None => {
                        return Err(DecodeFailure::MissingPalette {
                            index: animation.len(),
                        })
                    }
                }
            }

            let delay = frame.delay;
            animation.push(Frame::new(frame), delay);
        }

        if animation.is_empty() {
            return Err(DecodeFailure::Malformed("missing image data".to_string()));
        }

        debug!(
            "Decoded {} frames on a {}x{} screen",
            animation.len(),
            animation.screen().0,
            animation.screen().1
        );
        Ok(animation)
    }

    fn encode_all(&self, sink: &mut dyn Write, sequence: &FrameSequence) -> Result<(), EncodeError> {
        let (width, height) = sequence.check_encodable()?;

        let mut encoder = gif::Encoder::new(sink, width, height, &[]).map_err(codec_error)?;
        encoder.set_repeat(gif::Repeat::Infinite).map_err(codec_error)?;

        for (frame, delay) in sequence.iter() {
            let raw = frame.as_gif();

            let mut out = gif::Frame::default();
            out.delay = delay;
            out.dispose = raw.dispose;
            out.transparent = raw.transparent;
            out.needs_user_input = raw.needs_user_input;
            out.left = raw.left;
            out.top = raw.top;
            out.width = raw.width;
            out.height = raw.height;
            out.interlaced = raw.interlaced;
            out.palette = raw.palette.clone();
            out.buffer = Cow::Borrowed(&raw.buffer[..]);

            encoder.write_frame(&out).map_err(codec_error)?;
        }

        // Writes the trailer
        encoder
            .into_inner()
            .map_err(|e| EncodeError::Codec { source: e.into() })?;
        Ok(())
    }
}

fn codec_error(err: gif::EncodingError) -> EncodeError {
    EncodeError::Codec {
        source: EncodeFailure::Gif(err),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    /// Black, red, green, blue
    pub(crate) const TEST_PALETTE: [u8; 12] = [0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255];

    /// Encode a solid-color animation: one frame per `(color index, delay)` pair
    pub(crate) fn gif_bytes(width: u16, height: u16, frames: &[(u8, u16)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = gif::Encoder::new(&mut bytes, width, height, &TEST_PALETTE).unwrap();
            for &(color, delay) in frames {
                let mut frame = gif::Frame::default();
                frame.width = width;
                frame.height = height;
                frame.delay = delay;
                frame.buffer = Cow::Owned(vec![color; usize::from(width) * usize::from(height)]);
                encoder.write_frame(&frame).unwrap();
            }
        }
        bytes
    }

    #[test]
    fn test_decode_reads_frames_and_delays() {
        let bytes = gif_bytes(4, 3, &[(1, 10), (2, 20), (3, 30)]);
        let decoded = GifCodec::new().decode_all(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(decoded.screen(), (4, 3));
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded.delays(), &[10, 20, 30]);
        assert_eq!(decoded.frames()[1].pixels(), &[2u8; 12][..]);
    }

    #[test]
    fn test_decode_copies_global_palette_into_frames() {
        let bytes = gif_bytes(2, 2, &[(1, 5)]);
        let decoded = GifCodec::new().decode_all(&mut Cursor::new(bytes)).unwrap();

        let palette = decoded.frames()[0].palette().expect("palette");
        assert_eq!(&palette[..TEST_PALETTE.len()], &TEST_PALETTE[..]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = GifCodec::new().decode_all(&mut Cursor::new(b"definitely not a gif".to_vec()));
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_then_decode_keeps_order_and_timing() {
        let codec = GifCodec::new();
        let decoded = codec
            .decode_all(&mut Cursor::new(gif_bytes(3, 3, &[(1, 7), (3, 9)])))
            .unwrap();

        let mut sequence = FrameSequence::new();
        sequence.append(&decoded);
        sequence.append(&decoded);

        let mut out = Vec::new();
        codec.encode_all(&mut out, &sequence).unwrap();

        let merged = codec.decode_all(&mut Cursor::new(out)).unwrap();
        assert_eq!(merged.screen(), (3, 3));
        assert_eq!(merged.delays(), &[7, 9, 7, 9]);
        let colors: Vec<u8> = merged.frames().iter().map(|f| f.pixels()[0]).collect();
        assert_eq!(colors, vec![1, 3, 1, 3]);
    }

    #[test]
    fn test_encode_empty_sequence_fails() {
        let mut out = Vec::new();
        let result = GifCodec::new().encode_all(&mut out, &FrameSequence::new());
        assert!(matches!(result, Err(EncodeError::Empty)));
        assert!(out.is_empty());
    }
}
