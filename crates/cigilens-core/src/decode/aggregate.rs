use crate::Packet;
use crate::protocols::cigi::Layer;
use crate::protocols::cigi::layout;

/// Fold field verdicts into the layer flag: any invalid field, the size
/// check included, taints the layer.
pub(crate) fn roll_up_layer(layer: &mut Layer) {
    layer.control_error =
        !layer.control_size.valid || layer.fields.iter().any(|field| !field.valid);
}

/// Fold layer flags into the packet flag. The user-defined layer is
/// validated like any other but never counts against the packet: its
/// payload is vendor-private, not public ICD content. Unknown layers carry
/// no verdict at all.
pub(crate) fn roll_up_packet(packet: &mut Packet) {
    packet.packet_error = packet
        .layers
        .iter()
        .any(|layer| layer.opcode != layout::USER_DEFINED_OPCODE && layer.control_error);
}

#[cfg(test)]
mod tests {
    use super::{roll_up_layer, roll_up_packet};
    use crate::Packet;
    use crate::protocols::cigi::layout::descriptor;
    use crate::protocols::cigi::parser::parse_layer;

    fn packet_with(layers: Vec<crate::protocols::cigi::Layer>) -> Packet {
        Packet {
            transport: None,
            layers,
            unknown_layers: Vec::new(),
            packet_error: false,
        }
    }

    #[test]
    fn layer_flag_is_the_or_of_field_verdicts() {
        let desc = descriptor(1).expect("ig_control layout");
        let mut payload = vec![0u8; 24];
        payload[0] = 1;
        payload[1] = 24;
        let mut layer = parse_layer(desc, &payload);
        roll_up_layer(&mut layer);
        assert!(!layer.control_error);

        payload[3] = 0xC8; // db_number -56
        let mut layer = parse_layer(desc, &payload);
        roll_up_layer(&mut layer);
        assert!(layer.control_error);
    }

    #[test]
    fn size_verdict_taints_the_layer() {
        let desc = descriptor(1).expect("ig_control layout");
        let mut payload = vec![0u8; 16];
        payload[0] = 1;
        payload[1] = 16;
        let mut layer = parse_layer(desc, &payload);
        roll_up_layer(&mut layer);
        assert!(layer.control_error);
    }

    #[test]
    fn packet_flag_excludes_the_user_defined_layer() {
        let user_desc = descriptor(201).expect("user_defined layout");
        // Odd size: 4 + 4*n cannot produce 10, so the layer is tainted.
        let mut user = parse_layer(user_desc, &[201, 10, 0, 0, 1, 2, 3, 4, 5, 6]);
        roll_up_layer(&mut user);
        assert!(user.control_error);

        let mut packet = packet_with(vec![user]);
        roll_up_packet(&mut packet);
        assert!(!packet.packet_error, "user-defined carve-out");
    }

    #[test]
    fn packet_flag_includes_every_other_layer() {
        let desc = descriptor(1).expect("ig_control layout");
        let mut payload = vec![0u8; 24];
        payload[0] = 1;
        payload[1] = 24;
        payload[3] = 0xC8;
        let mut bad = parse_layer(desc, &payload);
        roll_up_layer(&mut bad);

        let mut packet = packet_with(vec![bad]);
        roll_up_packet(&mut packet);
        assert!(packet.packet_error);
    }
}
