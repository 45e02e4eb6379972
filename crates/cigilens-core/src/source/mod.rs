use thiserror::Error;

use crate::TransportInfo;

/// One raw frame handed over by the capture collaborator.
#[derive(Debug, Clone)]
pub struct FrameEvent {
    /// Capture timestamp in seconds since the Unix epoch, when known.
    pub ts: Option<f64>,
    pub data: Vec<u8>,
    pub transport: Option<TransportInfo>,
}

/// Ordered supplier of per-frame byte buffers.
///
/// Capture itself (live interface or stored file) lives outside this crate;
/// implementors hand over already-demuxed CIGI frame buffers, optionally
/// annotated with a timestamp and transport provenance.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<FrameEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture source error: {0}")]
    Capture(String),
}

/// In-memory source over a pre-collected frame sequence.
pub struct BufferSource {
    frames: std::vec::IntoIter<FrameEvent>,
}

impl BufferSource {
    pub fn new(frames: Vec<FrameEvent>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }

    /// Convenience over bare buffers with no timestamps or transport.
    pub fn from_buffers(buffers: Vec<Vec<u8>>) -> Self {
        Self::new(
            buffers
                .into_iter()
                .map(|data| FrameEvent {
                    ts: None,
                    data,
                    transport: None,
                })
                .collect(),
        )
    }
}

impl FrameSource for BufferSource {
    fn next_frame(&mut self) -> Result<Option<FrameEvent>, SourceError> {
        Ok(self.frames.next())
    }
}

#[cfg(test)]
mod tests {
    use super::{BufferSource, FrameSource};

    #[test]
    fn buffer_source_yields_frames_in_order() {
        let mut source = BufferSource::from_buffers(vec![vec![1], vec![2], vec![3]]);
        assert_eq!(source.next_frame().unwrap().unwrap().data, vec![1]);
        assert_eq!(source.next_frame().unwrap().unwrap().data, vec![2]);
        assert_eq!(source.next_frame().unwrap().unwrap().data, vec![3]);
        assert!(source.next_frame().unwrap().is_none());
    }
}
