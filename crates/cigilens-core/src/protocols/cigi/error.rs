use thiserror::Error;

/// Framing errors raised while walking the sub-packets of a frame buffer.
///
/// Fatal for the current buffer only: sub-packets decoded before the error
/// stand, and subsequent buffers are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FramingError {
    #[error("truncated sub-packet header at offset {offset}: {available} byte(s) remaining")]
    Truncated { offset: usize, available: usize },
    #[error(
        "sub-packet at offset {offset} (opcode {opcode}) declares size {declared} below the protocol minimum {minimum}"
    )]
    SizeBelowMinimum {
        offset: usize,
        opcode: u8,
        declared: usize,
        minimum: usize,
    },
    #[error(
        "sub-packet at offset {offset} (opcode {opcode}) declares size {declared} but only {remaining} byte(s) remain"
    )]
    SizeBeyondBuffer {
        offset: usize,
        opcode: u8,
        declared: usize,
        remaining: usize,
    },
}
