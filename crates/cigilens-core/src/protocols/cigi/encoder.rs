use thiserror::Error;

use super::layout::{self, FieldCodec, LayerDescriptor, SizeRule};
use super::parser::Layer;
use crate::Packet;
use crate::validate::FieldValue;

/// Errors returned by packet encoding. Fatal for that encode call only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("no layout registered for opcode {opcode}")]
    UnknownOpcode { opcode: u8 },
    #[error("layer `{layer}` field `{field}` has no value")]
    MissingValue { layer: &'static str, field: &'static str },
    #[error("layer `{layer}` field `{field}` holds a value incompatible with its layout")]
    TypeMismatch { layer: &'static str, field: &'static str },
    #[error("layer `{layer}` declares size {declared}, outside the encodable range")]
    InvalidSize { layer: &'static str, declared: usize },
    #[error("layer `{layer}` field `{field}` does not fit in the declared size")]
    FieldOutOfBounds { layer: &'static str, field: &'static str },
}

/// Re-emit a packet as wire bytes: known layers from their descriptors,
/// unknown layers verbatim.
pub fn encode_packet(packet: &Packet) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    for layer in &packet.layers {
        out.extend(encode_layer(layer)?);
    }
    for unknown in &packet.unknown_layers {
        out.extend_from_slice(&unknown.data);
    }
    Ok(out)
}

/// Encode one layer from its layout descriptor.
pub fn encode_layer(layer: &Layer) -> Result<Vec<u8>, EncodeError> {
    let desc = layout::descriptor(layer.opcode)
        .ok_or(EncodeError::UnknownOpcode { opcode: layer.opcode })?;
    let declared = declared_size(layer, desc)?;

    let mut buf = vec![0u8; declared];
    buf[layout::OPCODE_OFFSET] = layer.opcode;
    buf[layout::SIZE_OFFSET] = declared as u8;

    for def in desc.fields {
        let field = layer.field(def.name).ok_or(EncodeError::MissingValue {
            layer: desc.name,
            field: def.name,
        })?;
        let value = field.value.as_ref().ok_or(EncodeError::MissingValue {
            layer: desc.name,
            field: def.name,
        })?;
        write_value(&mut buf, def.codec, value).map_err(|kind| match kind {
            WriteError::TypeMismatch => EncodeError::TypeMismatch {
                layer: desc.name,
                field: def.name,
            },
            WriteError::OutOfBounds => EncodeError::FieldOutOfBounds {
                layer: desc.name,
                field: def.name,
            },
        })?;
    }
    Ok(buf)
}

fn declared_size(layer: &Layer, desc: &LayerDescriptor) -> Result<usize, EncodeError> {
    let declared = match layer.control_size.value.as_ref() {
        Some(value) => value
            .as_f64()
            .map(|v| v as usize)
            .ok_or(EncodeError::TypeMismatch {
                layer: desc.name,
                field: "control_size",
            })?,
        None => match desc.size {
            SizeRule::Fixed(n) => n,
            SizeRule::MessageText | SizeRule::DataBlocks => {
                return Err(EncodeError::MissingValue {
                    layer: desc.name,
                    field: "control_size",
                });
            }
        },
    };
    if !(layout::MIN_PACKET_SIZE..=u8::MAX as usize).contains(&declared) {
        return Err(EncodeError::InvalidSize {
            layer: desc.name,
            declared,
        });
    }
    Ok(declared)
}

enum WriteError {
    TypeMismatch,
    OutOfBounds,
}

fn write_value(buf: &mut [u8], codec: FieldCodec, value: &FieldValue) -> Result<(), WriteError> {
    match codec {
        FieldCodec::U8 { offset } => {
            let FieldValue::U8(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            put(buf, offset, &[*v])
        }
        FieldCodec::I8 { offset } => {
            let FieldValue::I8(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            put(buf, offset, &[*v as u8])
        }
        FieldCodec::U16 { offset } => {
            let FieldValue::U16(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            put(buf, offset, &v.to_be_bytes())
        }
        FieldCodec::U32 { offset } => {
            let FieldValue::U32(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            put(buf, offset, &v.to_be_bytes())
        }
        FieldCodec::F32 { offset } => {
            let FieldValue::F32(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            put(buf, offset, &v.to_be_bytes())
        }
        FieldCodec::F64 { offset } => {
            let FieldValue::F64(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            put(buf, offset, &v.to_be_bytes())
        }
        FieldCodec::Bits { offset, lsb, width } => {
            let FieldValue::U8(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            let mask = ((1u16 << width) - 1) as u8;
            let byte = buf.get_mut(offset).ok_or(WriteError::OutOfBounds)?;
            *byte |= (v & mask) << lsb;
            Ok(())
        }
        FieldCodec::Bytes { start, end } => {
            let FieldValue::Bytes(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            let slot = buf.get_mut(start..end).ok_or(WriteError::OutOfBounds)?;
            if v.len() != slot.len() {
                return Err(WriteError::TypeMismatch);
            }
            slot.copy_from_slice(v);
            Ok(())
        }
        FieldCodec::BytesTail { offset } => {
            let FieldValue::Bytes(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            let slot = buf.get_mut(offset..).ok_or(WriteError::OutOfBounds)?;
            if v.len() != slot.len() {
                return Err(WriteError::TypeMismatch);
            }
            slot.copy_from_slice(v);
            Ok(())
        }
        FieldCodec::AsciiTail { offset } => {
            let FieldValue::Ascii(v) = value else {
                return Err(WriteError::TypeMismatch);
            };
            let slot = buf.get_mut(offset..).ok_or(WriteError::OutOfBounds)?;
            if v.len() > slot.len() {
                return Err(WriteError::TypeMismatch);
            }
            slot[..v.len()].copy_from_slice(v.as_bytes());
            Ok(())
        }
    }
}

fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) -> Result<(), WriteError> {
    let end = offset.checked_add(bytes.len()).ok_or(WriteError::OutOfBounds)?;
    let slot = buf.get_mut(offset..end).ok_or(WriteError::OutOfBounds)?;
    slot.copy_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{EncodeError, encode_layer};
    use crate::protocols::cigi::layout::descriptor;
    use crate::protocols::cigi::parser::parse_layer;

    fn start_of_frame_payload() -> Vec<u8> {
        let mut payload = vec![0u8; 24];
        payload[0] = 101;
        payload[1] = 24;
        payload[2] = 5; // db_number
        payload[4] = 0b0010_0101; // ig_mode 1, timestamp_valid 1, minor 2
        payload[8..12].copy_from_slice(&99u32.to_be_bytes());
        payload
    }

    #[test]
    fn encode_reverses_parse() {
        let desc = descriptor(101).expect("start_of_frame layout");
        let payload = start_of_frame_payload();
        let layer = parse_layer(desc, &payload);
        let encoded = encode_layer(&layer).expect("encode");
        assert_eq!(encoded, payload);
    }

    #[test]
    fn encode_missing_value_fails() {
        let desc = descriptor(101).expect("start_of_frame layout");
        let mut layer = parse_layer(desc, &start_of_frame_payload());
        layer.fields[0].value = None;
        let err = encode_layer(&layer).unwrap_err();
        assert_eq!(
            err,
            EncodeError::MissingValue {
                layer: "start_of_frame",
                field: "db_number",
            }
        );
    }

    #[test]
    fn encode_undersized_declaration_reports_out_of_bounds() {
        use crate::validate::FieldValue;

        let desc = descriptor(2).expect("entity_control layout");
        let mut payload = vec![0u8; 48];
        payload[0] = 2;
        payload[1] = 48;
        let mut layer = parse_layer(desc, &payload);
        // A declared size the layout cannot fit into.
        layer.control_size.value = Some(FieldValue::U8(16));
        let err = encode_layer(&layer).unwrap_err();
        assert!(matches!(err, EncodeError::FieldOutOfBounds { .. }), "{err}");
    }

    #[test]
    fn encode_variable_size_from_control_size() {
        let desc = descriptor(201).expect("user_defined layout");
        let payload = vec![201, 12, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8];
        let layer = parse_layer(desc, &payload);
        let encoded = encode_layer(&layer).expect("encode");
        assert_eq!(encoded, payload);
    }
}
