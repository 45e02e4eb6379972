//! Frame decoding: sub-packet framing, dispatch and error aggregation.
//!
//! A CIGI frame buffer is walked sub-packet by sub-packet (opcode byte,
//! declared-size byte, body). Known opcodes decode through the layout
//! registry; unknown opcodes are kept opaque. A framing inconsistency stops
//! the walk for the current buffer only — sub-packets decoded before it
//! stand, and subsequent buffers are unaffected.

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::protocols::cigi::error::FramingError;
use crate::protocols::cigi::{Layer, layout, parse_layer};
use crate::source::{FrameEvent, FrameSource, SourceError};
use crate::{
    DEFAULT_GENERATED_AT, FrameRecord, Packet, PacketStream, TransportInfo, UnknownLayer,
    make_empty_stream,
};

mod aggregate;

use aggregate::{roll_up_layer, roll_up_packet};

#[derive(Debug, Error)]
pub enum DecodeStreamError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// One frame's decode outcome: the packet plus the framing error that
/// stopped the walk, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    pub packet: Packet,
    pub framing_error: Option<FramingError>,
}

/// Decode one frame buffer into a packet.
///
/// Pure and stateless: the result is a function of the bytes (and the
/// optional transport annotation) alone.
pub fn decode_frame(data: &[u8], transport: Option<TransportInfo>) -> DecodedFrame {
    let mut packet = Packet {
        transport,
        layers: Vec::new(),
        unknown_layers: Vec::new(),
        packet_error: false,
    };
    let mut framing_error = None;
    let mut offset = 0;

    while offset < data.len() {
        let remaining = &data[offset..];
        if remaining.len() <= layout::SIZE_OFFSET {
            framing_error = Some(FramingError::Truncated {
                offset,
                available: remaining.len(),
            });
            break;
        }
        let opcode = remaining[layout::OPCODE_OFFSET];
        let declared = remaining[layout::SIZE_OFFSET] as usize;
        if declared < layout::MIN_PACKET_SIZE {
            framing_error = Some(FramingError::SizeBelowMinimum {
                offset,
                opcode,
                declared,
                minimum: layout::MIN_PACKET_SIZE,
            });
            break;
        }
        if declared > remaining.len() {
            framing_error = Some(FramingError::SizeBeyondBuffer {
                offset,
                opcode,
                declared,
                remaining: remaining.len(),
            });
            break;
        }

        let sub_packet = &remaining[..declared];
        match layout::descriptor(opcode) {
            Some(desc) => {
                let mut layer = parse_layer(desc, sub_packet);
                roll_up_layer(&mut layer);
                insert_layer(&mut packet.layers, layer);
            }
            None => packet.unknown_layers.push(UnknownLayer {
                opcode,
                data: sub_packet.to_vec(),
            }),
        }
        offset += declared;
    }

    roll_up_packet(&mut packet);
    DecodedFrame {
        packet,
        framing_error,
    }
}

// At most one layer instance per kind: a repeated opcode within a frame
// replaces the earlier instance.
fn insert_layer(layers: &mut Vec<Layer>, layer: Layer) {
    match layers.iter_mut().find(|existing| existing.opcode == layer.opcode) {
        Some(existing) => *existing = layer,
        None => layers.push(layer),
    }
}

/// Drain a frame source into a serializable packet stream, one record per
/// frame. `generated_at` takes the last known frame timestamp.
pub fn decode_stream<S: FrameSource>(mut source: S) -> Result<PacketStream, DecodeStreamError> {
    let mut stream = make_empty_stream();
    let mut last_ts = None;

    while let Some(FrameEvent { ts, data, transport }) = source.next_frame()? {
        stream.frames_total += 1;
        if ts.is_some() {
            last_ts = ts;
        }
        let decoded = decode_frame(&data, transport);
        stream.frames.push(FrameRecord {
            ts: ts_to_rfc3339(ts),
            framing_error: decoded.framing_error.map(|err| err.to_string()),
            packet: decoded.packet,
        });
    }

    stream.generated_at =
        ts_to_rfc3339(last_ts).unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    Ok(stream)
}

fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}
