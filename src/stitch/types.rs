use std::borrow::Cow;
use std::rc::Rc;

use crate::error::EncodeError;

/// One decoded GIF frame
///
/// Holds indexed pixel data together with the frame's geometry and the
/// palette it is drawn with. Cloning is cheap: clones share the decoded data,
/// so a file repeated `n` times is stored once.
#[derive(Clone, Debug)]
pub struct Frame {
    raw: Rc<gif::Frame<'static>>,
}

impl Frame {
    /// Wrap a frame produced by the `gif` decoder
    pub fn new(raw: gif::Frame<'static>) -> Self {
        Self { raw: Rc::new(raw) }
    }

    /// Create a frame covering `width` x `height` at the origin from indexed pixels
    pub fn from_indexed(width: u16, height: u16, palette: Vec<u8>, pixels: Vec<u8>) -> Self {
        let mut raw = gif::Frame::default();
        raw.width = width;
        raw.height = height;
        raw.palette = Some(palette);
        raw.buffer = Cow::Owned(pixels);
        Self::new(raw)
    }

    /// Right edge of the frame on the logical screen
    pub fn right(&self) -> u32 {
        u32::from(self.raw.left) + u32::from(self.raw.width)
    }

    /// Bottom edge of the frame on the logical screen
    pub fn bottom(&self) -> u32 {
        u32::from(self.raw.top) + u32::from(self.raw.height)
    }

    /// Color table (RGB triplets) the frame is drawn with
    pub fn palette(&self) -> Option<&[u8]> {
        self.raw.palette.as_deref()
    }

    /// Indexed pixel data, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.raw.buffer
    }

    /// Get the underlying `gif` frame
    pub fn as_gif(&self) -> &gif::Frame<'static> {
        &self.raw
    }

    /// Whether both frames point at the same decoded data
    pub fn shares_data_with(&self, other: &Frame) -> bool {
        Rc::ptr_eq(&self.raw, &other.raw)
    }
}

/// Everything decoded from one input file
///
/// Transient: lives for the duration of one task and is dropped once its
/// frames have been appended to a [`FrameSequence`].
#[derive(Debug, Clone)]
pub struct DecodedAnimation {
    width: u16,
    height: u16,
    frames: Vec<Frame>,
    delays: Vec<u16>,
}

impl DecodedAnimation {
    /// Create an empty animation with the given logical screen size
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            frames: Vec::new(),
            delays: Vec::new(),
        }
    }

    /// Add a frame and its delay (hundredths of a second)
    pub fn push(&mut self, frame: Frame, delay: u16) {
        self.frames.push(frame);
        self.delays.push(delay);
    }

    /// Logical screen size declared by the file
    pub fn screen(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Decoded frames in file order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Per-frame delays (hundredths of a second)
    pub fn delays(&self) -> &[u16] {
        &self.delays
    }

    /// Number of frames decoded
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the file held no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// The accumulated output animation
///
/// Frames and delays only ever grow together, so `frames().len()` always
/// equals `delays().len()`.
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    delays: Vec<u16>,
    screen: Option<(u16, u16)>,
}

impl FrameSequence {
    /// Create a new empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every frame and delay of `decoded`, in order
    ///
    /// The first non-empty animation appended fixes the output screen size.
    pub fn append(&mut self, decoded: &DecodedAnimation) {
        if decoded.is_empty() {
            return;
        }

        self.screen.get_or_insert(decoded.screen());
        self.frames.extend(decoded.frames.iter().cloned());
        self.delays.extend_from_slice(&decoded.delays);

        debug_assert_eq!(self.frames.len(), self.delays.len());
    }

    /// Get all frames in output order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Get all delays in output order (hundredths of a second)
    pub fn delays(&self) -> &[u16] {
        &self.delays
    }

    /// Iterate over `(frame, delay)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Frame, u16)> {
        self.frames.iter().zip(self.delays.iter().copied())
    }

    /// Output logical screen size, once any frames have been appended
    pub fn screen(&self) -> Option<(u16, u16)> {
        self.screen
    }

    /// Get the total number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total play time of one loop, in hundredths of a second
    pub fn duration_centis(&self) -> u64 {
        self.delays.iter().map(|&d| u64::from(d)).sum()
    }

    /// Check that the sequence can be written as one GIF
    ///
    /// Returns the output screen size. Fails if there is nothing to write or
    /// if a frame would be drawn outside the screen.
    pub fn check_encodable(&self) -> Result<(u16, u16), EncodeError> {
        let (width, height) = match self.screen {
            Some(screen) if !self.is_empty() => screen,
            _ => return Err(EncodeError::Empty),
        };

        for (index, frame) in self.frames.iter().enumerate() {
            if frame.right() > u32::from(width) || frame.bottom() > u32::from(height) {
                return Err(EncodeError::FrameOutOfBounds {
                    index,
                    right: frame.right(),
                    bottom: frame.bottom(),
                    width,
                    height,
                });
            }
        }

        Ok((width, height))
    }
}
