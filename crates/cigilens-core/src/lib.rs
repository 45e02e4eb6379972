//! CigiLens core library for CIGI frame decoding and validation.
//!
//! This crate implements the decode pipeline used by the CLI: frame sources
//! feed the decode layer, which drives the table-driven CIGI codec
//! (layout/reader/parser/encoder) and folds per-field verdicts into layer
//! and packet error flags. Decoding is byte-oriented and side-effect free;
//! buffer acquisition is isolated behind `source`. The ICD is captured as
//! data in the layout registry, so parsing stays minimal and uniform across
//! all packet kinds.
//!
//! Invariants:
//! - Decoding and validation of a frame is a pure function of its bytes.
//! - Validators run in field-declaration order after full population, so
//!   cross-field rules always observe assigned siblings.
//! - A framing error stops the current buffer only; prior sub-packets and
//!   subsequent buffers are unaffected.
//! - The user-defined packet's verdict never counts against `packet_error`.
//!
//! Version française (résumé):
//! Cette crate fournit le cœur de décodage CIGI : sources -> décodage ->
//! codec table-driven (layout/reader/parser/encoder) -> flux sérialisable.
//! Les E/S restent dans `source`, l'ICD est une table statique. Garanties :
//! décodage pur, validateurs en ordre de déclaration, erreurs de trame
//! limitées au tampon courant, paquet user-defined exclu de l'agrégation.
//!
//! # Examples
//! ```
//! use cigilens_core::decode_frame;
//!
//! // A start-of-frame packet with nothing but zeros past the header.
//! let mut frame = vec![0u8; 24];
//! frame[0] = 101;
//! frame[1] = 24;
//! let decoded = decode_frame(&frame, None);
//! assert!(decoded.framing_error.is_none());
//! assert_eq!(decoded.packet.layers.len(), 1);
//! assert!(!decoded.packet.packet_error);
//! ```

use serde::Serialize;

mod decode;
mod protocols;
mod source;
mod validate;

pub use decode::{DecodeStreamError, DecodedFrame, decode_frame, decode_stream};
pub use protocols::cigi::{EncodeError, FramingError, Layer, encode_layer, encode_packet};
pub use source::{BufferSource, FrameEvent, FrameSource, SourceError};
pub use validate::{FieldValue, ValidatedField};

/// Current interchange schema version.
pub const STREAM_VERSION: u32 = 1;
/// Default timestamp used when no frame time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Serialized decode stream with one record per frame.
///
/// # Examples
/// ```
/// use cigilens_core::make_empty_stream;
///
/// let stream = make_empty_stream();
/// assert_eq!(stream.stream_version, cigilens_core::STREAM_VERSION);
/// assert!(stream.frames.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PacketStream {
    /// Interchange schema version (not the binary version).
    pub stream_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the last frame, or the epoch default.
    pub generated_at: String,
    /// Total frames drained from the source.
    pub frames_total: u64,
    /// One record per frame, in source order.
    pub frames: Vec<FrameRecord>,
}

/// Tool metadata embedded in streams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// One frame's decode record: timestamp, framing verdict, packet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    /// RFC3339 capture timestamp, when the source supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    /// Message of the framing error that stopped this buffer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framing_error: Option<String>,
    pub packet: Packet,
}

/// Sparse set of decoded layers for one frame: at most one instance per
/// packet kind, plus opaque unknown-opcode layers and optional transport
/// provenance.
///
/// # Examples
/// ```
/// use cigilens_core::decode_frame;
///
/// let decoded = decode_frame(&[], None);
/// assert!(decoded.packet.layers.is_empty());
/// assert!(!decoded.packet.packet_error);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Packet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportInfo>,
    pub layers: Vec<Layer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_layers: Vec<UnknownLayer>,
    /// OR of `control_error` over present layers, user-defined excluded.
    pub packet_error: bool,
}

/// Sub-packet with an opcode the registry does not know. Kept verbatim
/// (header included) for forward compatibility; never validated and never
/// counted in `packet_error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownLayer {
    pub opcode: u8,
    #[serde(serialize_with = "serialize_hex")]
    pub data: Vec<u8>,
}

/// Transport provenance attached by the capture collaborator. Pure
/// provenance, not CIGI content: it carries no validators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportInfo {
    pub src_addr: String,
    pub dst_addr: String,
    pub protocol: String,
    pub src_port: u16,
    pub dst_port: u16,
}

/// Build a stream with base fields filled and no frames.
pub fn make_empty_stream() -> PacketStream {
    PacketStream {
        stream_version: STREAM_VERSION,
        tool: ToolInfo {
            name: "cigilens".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        frames_total: 0,
        frames: Vec::new(),
    }
}

fn serialize_hex<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    serializer.serialize_str(&hex)
}
