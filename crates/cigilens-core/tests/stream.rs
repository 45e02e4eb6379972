use cigilens_core::{
    BufferSource, FieldValue, TransportInfo, decode_frame, decode_stream, encode_packet,
};

fn ig_control(db_number: u8) -> Vec<u8> {
    let mut packet = vec![0u8; 24];
    packet[0] = 1;
    packet[1] = 24;
    packet[3] = db_number;
    packet[4] = 0b0010_0101; // ig_mode 1, timestamp_valid 1, minor version 2
    packet[8..12].copy_from_slice(&7u32.to_be_bytes());
    packet
}

fn start_of_frame() -> Vec<u8> {
    let mut packet = vec![0u8; 24];
    packet[0] = 101;
    packet[1] = 24;
    packet[2] = 5; // db_number
    packet[4] = 0b0010_0101;
    packet
}

fn view_definition(near: f32, far: f32) -> Vec<u8> {
    let mut packet = vec![0u8; 32];
    packet[0] = 21;
    packet[1] = 32;
    packet[8..12].copy_from_slice(&near.to_be_bytes());
    packet[12..16].copy_from_slice(&far.to_be_bytes());
    packet[16..20].copy_from_slice(&(-45.0f32).to_be_bytes()); // left
    packet[20..24].copy_from_slice(&45.0f32.to_be_bytes()); // right
    packet[24..28].copy_from_slice(&30.0f32.to_be_bytes()); // top
    packet[28..32].copy_from_slice(&(-30.0f32).to_be_bytes()); // bottom
    packet
}

fn user_defined_odd() -> Vec<u8> {
    // Size 10 is not 4 + 4*n, so the layer's own size check fails.
    vec![201, 10, 0, 0, 1, 2, 3, 4, 5, 6]
}

#[test]
fn ig_control_within_ranges_is_clean() {
    let decoded = decode_frame(&ig_control(5), None);

    assert!(decoded.framing_error.is_none());
    let layer = &decoded.packet.layers[0];
    assert_eq!(layer.name, "ig_control");
    assert!(layer.control_size.valid);
    assert!(layer.fields.iter().all(|field| field.valid));
    assert!(!layer.control_error);
    assert!(!decoded.packet.packet_error);
}

#[test]
fn ig_control_out_of_range_taints_field_layer_and_packet() {
    // Byte 200 decodes as -56, outside db_number's [0, 127].
    let decoded = decode_frame(&ig_control(200), None);

    let layer = &decoded.packet.layers[0];
    let db_number = layer.field("db_number").expect("db_number");
    assert!(!db_number.valid);
    assert!(layer.control_error);
    assert!(decoded.packet.packet_error);
}

#[test]
fn view_definition_near_far_violation_pins_far() {
    let decoded = decode_frame(&view_definition(10.0, 5.0), None);

    let layer = &decoded.packet.layers[0];
    assert_eq!(layer.name, "view_definition");
    assert!(layer.field("near").expect("near").valid);
    assert!(!layer.field("far").expect("far").valid);
    let invalid: Vec<_> = layer.fields.iter().filter(|field| !field.valid).collect();
    assert_eq!(invalid.len(), 1, "exactly the dependent field is pinned");
    assert!(layer.control_error);
}

#[test]
fn truncated_packet_after_a_good_one_reports_and_stops() {
    let mut frame = start_of_frame();
    frame.extend_from_slice(&[1, 24, 0, 0]); // declares 24 with 4 left
    let decoded = decode_frame(&frame, None);

    assert_eq!(decoded.packet.layers.len(), 1);
    assert_eq!(decoded.packet.layers[0].name, "start_of_frame");
    let message = decoded.framing_error.expect("framing error").to_string();
    assert!(message.contains("declares size 24"), "{message}");

    // An independent buffer decodes untouched.
    let next = decode_frame(&start_of_frame(), None);
    assert!(next.framing_error.is_none());
}

#[test]
fn user_defined_errors_stay_out_of_the_packet_flag() {
    let mut frame = start_of_frame();
    frame.extend_from_slice(&user_defined_odd());
    let decoded = decode_frame(&frame, None);

    let user = decoded
        .packet
        .layers
        .iter()
        .find(|layer| layer.name == "user_defined")
        .expect("user_defined layer");
    assert!(user.control_error);
    assert!(!decoded.packet.packet_error, "carve-out must hold");
}

#[test]
fn packet_error_is_the_or_over_non_user_layers() {
    let mut frame = start_of_frame();
    frame.extend_from_slice(&ig_control(200));
    frame.extend_from_slice(&user_defined_odd());
    let decoded = decode_frame(&frame, None);

    assert_eq!(decoded.packet.layers.len(), 3);
    assert!(decoded.packet.packet_error);

    let clean = decode_frame(&start_of_frame(), None);
    assert!(!clean.packet.packet_error);
}

#[test]
fn decode_encode_round_trip_for_fixed_layouts() {
    let buffers = [
        ig_control(5),
        start_of_frame(),
        view_definition(1.0, 1000.0),
        {
            // Sensor response with populated gates.
            let mut packet = vec![0u8; 24];
            packet[0] = 106;
            packet[1] = 24;
            packet[2..4].copy_from_slice(&2u16.to_be_bytes());
            packet[6..8].copy_from_slice(&64u16.to_be_bytes());
            packet[8..10].copy_from_slice(&48u16.to_be_bytes());
            packet
        },
    ];

    for buffer in buffers {
        let first = decode_frame(&buffer, None);
        let encoded = encode_packet(&first.packet).expect("encode");
        assert_eq!(encoded, buffer, "byte-for-byte re-emission");
        let second = decode_frame(&encoded, None);
        assert_eq!(second.packet, first.packet, "round-trip law");
    }
}

#[test]
fn unknown_layers_survive_the_round_trip() {
    let mut frame = start_of_frame();
    frame.extend_from_slice(&[42, 8, 0xde, 0xad, 0xbe, 0xef, 0, 0]);
    let first = decode_frame(&frame, None);
    assert_eq!(first.packet.unknown_layers.len(), 1);

    let encoded = encode_packet(&first.packet).expect("encode");
    let second = decode_frame(&encoded, None);
    assert_eq!(second.packet, first.packet);
}

#[test]
fn stream_serialization_carries_no_behavior_values() {
    let transport = TransportInfo {
        src_addr: "10.0.0.1".to_string(),
        dst_addr: "10.0.0.2".to_string(),
        protocol: "udp".to_string(),
        src_port: 8004,
        dst_port: 8004,
    };
    let source = BufferSource::new(vec![cigilens_core::FrameEvent {
        ts: Some(1_700_000_000.5),
        data: ig_control(200),
        transport: Some(transport),
    }]);
    let stream = decode_stream(source).expect("stream");
    let value = serde_json::to_value(&stream).expect("stream json");

    let frame = &value["frames"][0];
    assert_eq!(frame["packet"]["transport"]["protocol"], "udp");
    assert_eq!(frame["packet"]["packet_error"], true);
    let layer = &frame["packet"]["layers"][0];
    assert_eq!(layer["name"], "ig_control");
    assert_eq!(layer["control_size"]["value"], 24);

    // Rules live in the static registry; no validator ever serializes.
    assert_no_key(&value, "validator");
    assert_no_key(&value, "rule");
}

fn assert_no_key(value: &serde_json::Value, needle: &str) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                assert_ne!(key, needle, "serialized behavior value");
                assert_no_key(nested, needle);
            }
        }
        serde_json::Value::Array(items) => {
            for nested in items {
                assert_no_key(nested, needle);
            }
        }
        _ => {}
    }
}

#[test]
fn stream_preserves_frame_order_and_counts() {
    let stream = decode_stream(BufferSource::from_buffers(vec![
        start_of_frame(),
        ig_control(5),
        ig_control(200),
    ]))
    .expect("stream");

    assert_eq!(stream.frames_total, 3);
    assert_eq!(stream.frames.len(), 3);
    assert_eq!(stream.frames[0].packet.layers[0].name, "start_of_frame");
    assert_eq!(stream.frames[1].packet.layers[0].name, "ig_control");
    assert!(!stream.frames[1].packet.packet_error);
    assert!(stream.frames[2].packet.packet_error);
}

#[test]
fn field_values_keep_their_wire_types() {
    let decoded = decode_frame(&start_of_frame(), None);
    let layer = &decoded.packet.layers[0];
    assert_eq!(
        layer.field("db_number").and_then(|f| f.value.clone()),
        Some(FieldValue::I8(5))
    );
    assert_eq!(
        layer.field("ig_frame_number").and_then(|f| f.value.clone()),
        Some(FieldValue::U32(0))
    );
}
