use serde::Serialize;

use super::layout::{FieldCodec, LayerDescriptor};
use super::reader::CigiReader;
use crate::validate::{FieldValue, ValidatedField};

/// One decoded CIGI sub-packet with per-field verdicts.
///
/// Layers are generic over their layout descriptor: every packet kind is
/// the same type, distinguished by `name`/`opcode` and the field list the
/// registry declared for it. `control_error` is filled by the aggregation
/// pass after parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: &'static str,
    pub opcode: u8,
    pub control_size: ValidatedField,
    pub fields: Vec<ValidatedField>,
    pub control_error: bool,
}

impl Layer {
    /// Look up a field by its layout name.
    pub fn field(&self, name: &str) -> Option<&ValidatedField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Decode one framed sub-packet against its layout descriptor.
///
/// Every field is populated before any rule runs; `control_size` is then
/// validated first and the fields in declaration order, so cross-field
/// rules always observe already-assigned siblings. A field the declared
/// size cannot cover decodes as null and fails its null check instead of
/// aborting the layer.
pub fn parse_layer(desc: &'static LayerDescriptor, payload: &[u8]) -> Layer {
    let reader = CigiReader::new(payload);
    let declared = payload.len();

    let mut control_size =
        ValidatedField::new("control_size", Some(FieldValue::U8(declared as u8)));
    if let Some(message) = desc.size.check(declared) {
        control_size.mark_invalid(message);
    }

    let mut fields: Vec<ValidatedField> = desc
        .fields
        .iter()
        .map(|def| ValidatedField::new(def.name, read_value(&reader, def.codec)))
        .collect();

    for (index, def) in desc.fields.iter().enumerate() {
        if let Some(message) = def.rule.check(&fields[index], &fields) {
            fields[index].mark_invalid(message);
        }
    }

    Layer {
        name: desc.name,
        opcode: desc.opcode,
        control_size,
        fields,
        control_error: false,
    }
}

fn read_value(reader: &CigiReader<'_>, codec: FieldCodec) -> Option<FieldValue> {
    match codec {
        FieldCodec::U8 { offset } => reader.read_u8(offset).map(FieldValue::U8),
        FieldCodec::I8 { offset } => reader.read_i8(offset).map(FieldValue::I8),
        FieldCodec::U16 { offset } => reader.read_u16_be(offset).map(FieldValue::U16),
        FieldCodec::U32 { offset } => reader.read_u32_be(offset).map(FieldValue::U32),
        FieldCodec::F32 { offset } => reader.read_f32_be(offset).map(FieldValue::F32),
        FieldCodec::F64 { offset } => reader.read_f64_be(offset).map(FieldValue::F64),
        FieldCodec::Bits { offset, lsb, width } => {
            reader.read_bits(offset, lsb, width).map(FieldValue::U8)
        }
        FieldCodec::Bytes { start, end } => reader
            .read_slice(start..end)
            .map(|bytes| FieldValue::Bytes(bytes.to_vec())),
        FieldCodec::BytesTail { offset } => reader
            .read_tail(offset)
            .map(|bytes| FieldValue::Bytes(bytes.to_vec())),
        FieldCodec::AsciiTail { offset } => reader.read_tail(offset).map(|bytes| {
            FieldValue::Ascii(
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\0')
                    .to_string(),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_layer;
    use crate::protocols::cigi::layout::descriptor;
    use crate::validate::FieldValue;

    fn ig_control_payload() -> Vec<u8> {
        let mut payload = vec![0u8; 24];
        payload[0] = 1;
        payload[1] = 24;
        payload[3] = 5; // db_number
        // ig_mode = 1, timestamp_valid = 1, minor_version = 2
        payload[4] = 0b0010_0101;
        payload[8..12].copy_from_slice(&42u32.to_be_bytes());
        payload
    }

    #[test]
    fn parse_valid_ig_control() {
        let desc = descriptor(1).expect("ig_control layout");
        let layer = parse_layer(desc, &ig_control_payload());

        assert!(layer.control_size.valid);
        assert_eq!(
            layer.field("db_number").and_then(|f| f.value.clone()),
            Some(FieldValue::I8(5))
        );
        assert_eq!(
            layer.field("ig_mode").and_then(|f| f.value.clone()),
            Some(FieldValue::U8(1))
        );
        assert_eq!(
            layer.field("timestamp_valid").and_then(|f| f.value.clone()),
            Some(FieldValue::U8(1))
        );
        assert_eq!(
            layer.field("minor_version").and_then(|f| f.value.clone()),
            Some(FieldValue::U8(2))
        );
        assert_eq!(
            layer.field("host_frame_number").and_then(|f| f.value.clone()),
            Some(FieldValue::U32(42))
        );
        assert!(layer.fields.iter().all(|field| field.valid));
    }

    #[test]
    fn parse_ig_control_out_of_range_db_number() {
        let desc = descriptor(1).expect("ig_control layout");
        let mut payload = ig_control_payload();
        payload[3] = 200; // decodes as i8 -56, outside [0, 127]
        let layer = parse_layer(desc, &payload);

        let db_number = layer.field("db_number").expect("db_number");
        assert!(!db_number.valid);
        assert!(
            db_number.error.as_deref().unwrap_or_default().contains("[0, 127]"),
            "{:?}",
            db_number.error
        );
    }

    #[test]
    fn parse_view_definition_pins_the_dependent_field() {
        let desc = descriptor(21).expect("view_definition layout");
        let mut payload = vec![0u8; 32];
        payload[0] = 21;
        payload[1] = 32;
        payload[8..12].copy_from_slice(&10.0f32.to_be_bytes()); // near
        payload[12..16].copy_from_slice(&5.0f32.to_be_bytes()); // far < near
        payload[16..20].copy_from_slice(&(-30.0f32).to_be_bytes()); // left
        payload[20..24].copy_from_slice(&30.0f32.to_be_bytes()); // right
        payload[24..28].copy_from_slice(&20.0f32.to_be_bytes()); // top
        payload[28..32].copy_from_slice(&(-20.0f32).to_be_bytes()); // bottom
        let layer = parse_layer(desc, &payload);

        assert!(layer.field("near").expect("near").valid);
        let far = layer.field("far").expect("far");
        assert!(!far.valid, "far must carry the near/far violation");
        assert!(layer.field("left").expect("left").valid);
        assert!(layer.field("right").expect("right").valid);
        assert!(layer.field("top").expect("top").valid);
        assert!(layer.field("bottom").expect("bottom").valid);
    }

    #[test]
    fn parse_undersized_layer_yields_null_fields() {
        let desc = descriptor(2).expect("entity_control layout");
        // Entity control declares 48 bytes; hand it 16.
        let mut payload = vec![0u8; 16];
        payload[0] = 2;
        payload[1] = 16;
        let layer = parse_layer(desc, &payload);

        assert!(!layer.control_size.valid);
        let pitch = layer.field("pitch").expect("pitch");
        assert_eq!(pitch.value, None);
        assert!(!pitch.valid);
        assert_eq!(pitch.error.as_deref(), Some("value is null"));
        // Fields inside the buffer still decode and validate normally.
        assert!(layer.field("entity_id").expect("entity_id").valid);
    }

    #[test]
    fn parse_image_generator_message_text() {
        let desc = descriptor(117).expect("ig message layout");
        let mut payload = vec![0u8; 16];
        payload[0] = 117;
        payload[1] = 16;
        payload[2..4].copy_from_slice(&7u16.to_be_bytes());
        payload[4..13].copy_from_slice(b"IG online");
        let layer = parse_layer(desc, &payload);

        assert!(layer.control_size.valid);
        assert_eq!(
            layer.field("message").and_then(|f| f.value.clone()),
            Some(FieldValue::Ascii("IG online".to_string()))
        );
    }

    #[test]
    fn parse_user_defined_odd_size_fails_the_size_check() {
        let desc = descriptor(201).expect("user_defined layout");
        let payload = vec![201, 10, 0, 0, 1, 2, 3, 4, 5, 6];
        let layer = parse_layer(desc, &payload);

        assert!(!layer.control_size.valid);
        assert_eq!(
            layer.field("data").and_then(|f| f.value.clone()),
            Some(FieldValue::Bytes(vec![1, 2, 3, 4, 5, 6]))
        );
    }
}
