//! CIGI (Common Image Generator Interface) packet decoding.
//!
//! CIGI frames are sequences of framed sub-packets: one opcode byte, one
//! declared-size byte, then the packet body. The layout registry captures
//! every supported opcode (1–28 host controls, 101–117 IG responses and
//! notifications, 201 user-defined) as a static field table, so a single
//! table-driven parser decodes and validates all of them. Unrecognized
//! opcodes are preserved as opaque layers for forward compatibility.
//!
//! Version française (résumé):
//! Les trames CIGI sont des suites de sous-paquets (opcode, taille, corps).
//! Le registre de layouts décrit chaque opcode comme une table statique ;
//! un seul parseur générique décode et valide tous les paquets. Les opcodes
//! inconnus sont conservés tels quels.

pub mod encoder;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use encoder::{EncodeError, encode_layer, encode_packet};
pub use error::FramingError;
pub use parser::{Layer, parse_layer};
