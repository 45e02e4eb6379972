//! CIGI byte layout tables: the ICD as data.
//!
//! Every supported opcode maps to a [`LayerDescriptor`] listing its fields
//! in declaration order with their byte placement and legality rule. The
//! parser and encoder both walk these tables; nothing else in the crate
//! indexes packet bytes directly.
//!
//! Conventions: opcode at byte 0, declared size at byte 1, multi-byte
//! fields big-endian, discrete flags packed as bit fields. The two
//! variable-length packets (ImageGeneratorMessage, UserDefinedData)
//! validate their declared size against a formula instead of a constant.

use crate::validate::Rule;

pub const OPCODE_OFFSET: usize = 0;
pub const SIZE_OFFSET: usize = 1;
/// Smallest legal CIGI packet; smaller declared sizes are framing errors.
pub const MIN_PACKET_SIZE: usize = 8;

/// The user-defined packet: validated like any other kind but excluded from
/// packet-level error aggregation.
pub const USER_DEFINED_OPCODE: u8 = 201;

/// Byte placement of one field inside a sub-packet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldCodec {
    U8 { offset: usize },
    I8 { offset: usize },
    U16 { offset: usize },
    U32 { offset: usize },
    F32 { offset: usize },
    F64 { offset: usize },
    /// Bit field inside a single byte: `width` bits starting at `lsb`.
    Bits { offset: usize, lsb: u8, width: u8 },
    Bytes { start: usize, end: usize },
    /// Remainder of the packet from `offset` to the declared size.
    BytesTail { offset: usize },
    /// NUL-padded ASCII from `offset` to the declared size.
    AsciiTail { offset: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub codec: FieldCodec,
    pub rule: Rule,
}

/// Expected value of the declared-size byte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeRule {
    Fixed(usize),
    /// 4 header bytes plus message text; legal in 8..=104.
    MessageText,
    /// 4 header bytes plus 4-byte data blocks; legal when >= 8 and 4 + 4*n.
    DataBlocks,
}

impl SizeRule {
    /// Check a declared size, returning the violation message if illegal.
    pub fn check(&self, declared: usize) -> Option<String> {
        match self {
            SizeRule::Fixed(expected) => (declared != *expected)
                .then(|| format!("size {declared} not found in {{{expected}}}")),
            SizeRule::MessageText => (!(MIN_PACKET_SIZE..=104).contains(&declared))
                .then(|| format!("message size {declared} outside [8, 104]")),
            SizeRule::DataBlocks => (declared < MIN_PACKET_SIZE || (declared - 4) % 4 != 0)
                .then(|| format!("size {declared} is not 4 + 4*n data blocks")),
        }
    }
}

/// Layout of one CIGI packet kind. The opcode is a per-kind constant, not a
/// validated field.
#[derive(Debug)]
pub struct LayerDescriptor {
    pub name: &'static str,
    pub opcode: u8,
    pub size: SizeRule,
    pub fields: &'static [FieldDef],
}

/// Look up the layout for an opcode. `None` means an unknown (vendor or
/// future) packet kind.
pub fn descriptor(opcode: u8) -> Option<&'static LayerDescriptor> {
    REGISTRY.iter().find(|desc| desc.opcode == opcode)
}

const fn u8f(name: &'static str, offset: usize, rule: Rule) -> FieldDef {
    FieldDef { name, codec: FieldCodec::U8 { offset }, rule }
}

const fn i8f(name: &'static str, offset: usize, rule: Rule) -> FieldDef {
    FieldDef { name, codec: FieldCodec::I8 { offset }, rule }
}

const fn u16f(name: &'static str, offset: usize, rule: Rule) -> FieldDef {
    FieldDef { name, codec: FieldCodec::U16 { offset }, rule }
}

const fn u32f(name: &'static str, offset: usize, rule: Rule) -> FieldDef {
    FieldDef { name, codec: FieldCodec::U32 { offset }, rule }
}

const fn f32f(name: &'static str, offset: usize, rule: Rule) -> FieldDef {
    FieldDef { name, codec: FieldCodec::F32 { offset }, rule }
}

const fn f64f(name: &'static str, offset: usize, rule: Rule) -> FieldDef {
    FieldDef { name, codec: FieldCodec::F64 { offset }, rule }
}

const fn bits(name: &'static str, offset: usize, lsb: u8, width: u8, rule: Rule) -> FieldDef {
    FieldDef { name, codec: FieldCodec::Bits { offset, lsb, width }, rule }
}

const fn bytes(name: &'static str, start: usize, end: usize) -> FieldDef {
    FieldDef { name, codec: FieldCodec::Bytes { start, end }, rule: Rule::None }
}

const fn bytes_tail(name: &'static str, offset: usize) -> FieldDef {
    FieldDef { name, codec: FieldCodec::BytesTail { offset }, rule: Rule::None }
}

const fn ascii_tail(name: &'static str, offset: usize) -> FieldDef {
    FieldDef { name, codec: FieldCodec::AsciiTail { offset }, rule: Rule::None }
}

const fn incl(lo: f64, hi: f64) -> Rule {
    Rule::Inclusive { lo: Some(lo), hi: Some(hi) }
}

const fn at_least(lo: f64) -> Rule {
    Rule::Inclusive { lo: Some(lo), hi: None }
}

const fn strictly_above(lo: f64) -> Rule {
    Rule::Exclusive { lo: Some(lo), hi: None }
}

const fn above_sibling(sibling: &'static str) -> Rule {
    Rule::AboveSibling { sibling, hi: None }
}

const fn above_sibling_below(sibling: &'static str, hi: f64) -> Rule {
    Rule::AboveSibling { sibling, hi: Some(hi) }
}

/// Enable/valid style flag.
const FLAG: Rule = Rule::Discrete(&[0.0, 1.0]);
/// No bounds, but a missing value is still a violation.
const NON_NULL: Rule = Rule::Inclusive { lo: None, hi: None };
const NONE: Rule = Rule::None;

static IG_CONTROL_FIELDS: &[FieldDef] = &[
    i8f("db_number", 3, incl(0.0, 127.0)),
    bits("ig_mode", 4, 0, 2, incl(0.0, 2.0)),
    bits("timestamp_valid", 4, 2, 1, FLAG),
    bits("extrapolation_enable", 4, 3, 1, FLAG),
    bits("minor_version", 4, 4, 4, NONE),
    u32f("host_frame_number", 8, NONE),
    u32f("timestamp", 12, NONE),
    u32f("last_ig_frame_number", 16, NONE),
];

static ENTITY_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NON_NULL),
    bits("entity_state", 4, 0, 2, incl(0.0, 2.0)),
    bits("attach_state", 4, 2, 1, FLAG),
    bits("coll_det_request", 4, 3, 1, FLAG),
    bits("inherit_alpha", 4, 4, 1, FLAG),
    bits("ground_ocean_clamp", 4, 5, 2, incl(0.0, 2.0)),
    bits("animation_dir", 5, 0, 1, FLAG),
    bits("animation_loop_mode", 5, 1, 1, FLAG),
    bits("animation_state", 5, 2, 2, incl(0.0, 3.0)),
    bits("extrapolation_enable", 5, 4, 1, FLAG),
    u8f("alpha", 6, NONE),
    u16f("entity_type", 8, NONE),
    u16f("parent_id", 10, NONE),
    f32f("roll", 12, incl(-180.0, 180.0)),
    f32f("pitch", 16, incl(-90.0, 90.0)),
    f32f("yaw", 20, incl(0.0, 360.0)),
    f64f("lat_xoff", 24, incl(-90.0, 90.0)),
    f64f("lon_yoff", 32, incl(-180.0, 180.0)),
    f64f("alt_zoff", 40, NONE),
];

static CONFORMAL_CLAMPED_ENTITY_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    f32f("yaw", 4, incl(0.0, 360.0)),
    f64f("latitude", 8, incl(-90.0, 90.0)),
    f64f("longitude", 16, incl(-180.0, 180.0)),
];

static COMPONENT_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("component_id", 2, NONE),
    u16f("instance_id", 4, NONE),
    bits("component_class", 6, 0, 6, incl(0.0, 63.0)),
    u8f("component_state", 7, NONE),
    bytes("component_data", 8, 32),
];

static SHORT_COMPONENT_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("component_id", 2, NONE),
    u16f("instance_id", 4, NONE),
    bits("component_class", 6, 0, 6, incl(0.0, 63.0)),
    u8f("component_state", 7, NONE),
    bytes("component_data", 8, 16),
];

static ARTICULATED_PART_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    u8f("part_id", 4, NONE),
    bits("articulated_part_enable", 5, 0, 1, FLAG),
    bits("x_offset_enable", 5, 1, 1, FLAG),
    bits("y_offset_enable", 5, 2, 1, FLAG),
    bits("z_offset_enable", 5, 3, 1, FLAG),
    bits("roll_enable", 5, 4, 1, FLAG),
    bits("pitch_enable", 5, 5, 1, FLAG),
    bits("yaw_enable", 5, 6, 1, FLAG),
    f32f("x_offset", 8, NONE),
    f32f("y_offset", 12, NONE),
    f32f("z_offset", 16, NONE),
    f32f("roll", 20, incl(-180.0, 180.0)),
    f32f("pitch", 24, incl(-90.0, 90.0)),
    f32f("yaw", 28, incl(0.0, 360.0)),
];

static SHORT_ARTICULATED_PART_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    u8f("part_id_1", 4, NONE),
    u8f("part_id_2", 5, NONE),
    bits("dof_select_1", 6, 0, 3, incl(0.0, 6.0)),
    bits("dof_select_2", 6, 3, 3, incl(0.0, 6.0)),
    bits("part_enable_1", 6, 6, 1, FLAG),
    bits("part_enable_2", 6, 7, 1, FLAG),
    f32f("dof_1", 8, NONE),
    f32f("dof_2", 12, NONE),
];

static RATE_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    u8f("part_id", 4, NONE),
    bits("apply_to_part", 5, 0, 1, FLAG),
    bits("coordinate_system", 5, 1, 1, FLAG),
    f32f("x_rate", 8, NONE),
    f32f("y_rate", 12, NONE),
    f32f("z_rate", 16, NONE),
    f32f("roll_rate", 20, NONE),
    f32f("pitch_rate", 24, NONE),
    f32f("yaw_rate", 28, NONE),
];

static CELESTIAL_SPHERE_CONTROL_FIELDS: &[FieldDef] = &[
    u8f("hour", 2, incl(0.0, 23.0)),
    u8f("minute", 3, incl(0.0, 59.0)),
    bits("ephemeris_enable", 4, 0, 1, FLAG),
    bits("sun_enable", 4, 1, 1, FLAG),
    bits("moon_enable", 4, 2, 1, FLAG),
    bits("star_enable", 4, 3, 1, FLAG),
    bits("date_time_valid", 4, 4, 1, FLAG),
    u32f("date", 8, NONE),
    f32f("star_intensity", 12, incl(0.0, 100.0)),
];

static ATMOSPHERE_CONTROL_FIELDS: &[FieldDef] = &[
    bits("atmospheric_model_enable", 2, 0, 1, FLAG),
    u8f("humidity", 3, incl(0.0, 100.0)),
    f32f("air_temp", 4, NONE),
    f32f("visibility_range", 8, at_least(0.0)),
    f32f("horiz_wind", 12, at_least(0.0)),
    f32f("vert_wind", 16, NONE),
    f32f("wind_direction", 20, incl(0.0, 360.0)),
    f32f("barometric_pressure", 24, at_least(0.0)),
];

static ENVIRONMENTAL_REGION_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("region_id", 2, NONE),
    bits("region_state", 4, 0, 2, incl(0.0, 2.0)),
    bits("merge_weather_properties", 4, 2, 1, FLAG),
    bits("merge_aerosol_concentrations", 4, 3, 1, FLAG),
    bits("merge_maritime_surface_conditions", 4, 4, 1, FLAG),
    bits("merge_terrestrial_surface_conditions", 4, 5, 1, FLAG),
    f64f("latitude", 8, incl(-90.0, 90.0)),
    f64f("longitude", 16, incl(-180.0, 180.0)),
    f32f("size_x", 24, at_least(0.0)),
    f32f("size_y", 28, at_least(0.0)),
    f32f("corner_radius", 32, NONE),
    f32f("rotation", 36, incl(-180.0, 180.0)),
    f32f("transition_perimeter", 40, at_least(0.0)),
];

static WEATHER_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("entity_region_id", 2, NONE),
    u8f("layer_id", 4, incl(0.0, 255.0)),
    u8f("humidity", 5, incl(0.0, 100.0)),
    bits("weather_enable", 6, 0, 1, FLAG),
    bits("scud_enable", 6, 1, 1, FLAG),
    bits("random_winds_enable", 6, 2, 1, FLAG),
    bits("random_lightning_enable", 6, 3, 1, FLAG),
    bits("cloud_type", 6, 4, 4, incl(0.0, 15.0)),
    bits("scope", 7, 0, 2, incl(0.0, 2.0)),
    bits("severity", 7, 2, 3, incl(0.0, 5.0)),
    f32f("air_temp", 8, NONE),
    f32f("visibility_range", 12, NONE),
    f32f("scud_frequency", 16, incl(0.0, 100.0)),
    f32f("coverage", 20, incl(0.0, 100.0)),
    f32f("base_elevation", 24, NONE),
    f32f("thickness", 28, NONE),
    f32f("transition_band", 32, NONE),
    f32f("horiz_wind", 36, at_least(0.0)),
    f32f("vert_wind", 40, NONE),
    f32f("wind_direction", 44, incl(0.0, 360.0)),
    f32f("barometric_pressure", 48, at_least(0.0)),
    f32f("aerosol_concentration", 52, at_least(0.0)),
];

static MARITIME_SURFACE_CONDITIONS_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    bits("surface_conditions_enable", 4, 0, 1, FLAG),
    bits("whitecap_enable", 4, 1, 1, FLAG),
    bits("scope", 4, 2, 2, incl(0.0, 2.0)),
    f32f("sea_surface_height", 8, NONE),
    f32f("surface_water_temperature", 12, NONE),
    f32f("surface_clarity", 16, incl(0.0, 100.0)),
];

static WAVE_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    u8f("wave_id", 4, NONE),
    bits("wave_enable", 5, 0, 1, FLAG),
    bits("scope", 5, 1, 2, incl(0.0, 2.0)),
    bits("breaker_type", 5, 3, 2, incl(0.0, 2.0)),
    f32f("wave_height", 8, at_least(0.0)),
    f32f("wavelength", 12, at_least(0.0)),
    f32f("period", 16, at_least(0.0)),
    f32f("direction", 20, incl(0.0, 360.0)),
    f32f("phase_offset", 24, incl(-360.0, 3600.0)),
    f32f("leading", 28, incl(-180.0, 180.0)),
];

static TERRESTRIAL_SURFACE_CONDITIONS_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    u16f("surface_condition_id", 4, at_least(0.0)),
    bits("severity", 6, 0, 5, incl(0.0, 31.0)),
    bits("surface_condition_enable", 6, 5, 1, FLAG),
    bits("scope", 6, 6, 2, incl(0.0, 2.0)),
    u8f("coverage", 7, incl(0.0, 100.0)),
];

static VIEW_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("view_id", 2, NONE),
    u8f("group_id", 4, incl(0.0, 255.0)),
    bits("xoff_enable", 5, 0, 1, FLAG),
    bits("yoff_enable", 5, 1, 1, FLAG),
    bits("zoff_enable", 5, 2, 1, FLAG),
    bits("roll_enable", 5, 3, 1, FLAG),
    bits("pitch_enable", 5, 4, 1, FLAG),
    bits("yaw_enable", 5, 5, 1, FLAG),
    u16f("entity_id", 6, NONE),
    f32f("xoff", 8, NONE),
    f32f("yoff", 12, NONE),
    f32f("zoff", 16, NONE),
    f32f("roll", 20, incl(-180.0, 180.0)),
    f32f("pitch", 24, incl(-90.0, 90.0)),
    f32f("yaw", 28, incl(0.0, 360.0)),
];

static SENSOR_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("view_id", 2, NONE),
    u8f("sensor_id", 4, NONE),
    bits("track_mode", 5, 0, 3, incl(0.0, 7.0)),
    bits("sensor_on_off", 5, 3, 1, FLAG),
    bits("polarity", 5, 4, 1, FLAG),
    bits("line_by_line_dropout_enable", 5, 5, 1, FLAG),
    bits("automatic_gain", 5, 6, 1, FLAG),
    bits("track_white_black", 5, 7, 1, FLAG),
    bits("response_type", 6, 0, 1, FLAG),
    f32f("gain", 8, incl(0.0, 1.0)),
    f32f("level", 12, incl(0.0, 1.0)),
    f32f("ac_coupling", 16, at_least(0.0)),
    f32f("noise", 20, incl(0.0, 1.0)),
];

static MOTION_TRACKER_CONTROL_FIELDS: &[FieldDef] = &[
    u16f("view_id", 2, NONE),
    u8f("tracker_id", 4, NONE),
    bits("tracker_enable", 5, 0, 1, FLAG),
    bits("boresight_enable", 5, 1, 1, FLAG),
    bits("x_enable", 5, 2, 1, FLAG),
    bits("y_enable", 5, 3, 1, FLAG),
    bits("z_enable", 5, 4, 1, FLAG),
    bits("roll_enable", 5, 5, 1, FLAG),
    bits("pitch_enable", 5, 6, 1, FLAG),
    bits("yaw_enable", 5, 7, 1, FLAG),
    bits("view_select", 6, 0, 1, FLAG),
];

static EARTH_REFERENCE_MODEL_DEFINITION_FIELDS: &[FieldDef] = &[
    bits("custom_erm_enable", 2, 0, 1, FLAG),
    f64f("equatorial_radius", 8, NONE),
    f64f("flattening", 16, NONE),
];

static TRAJECTORY_DEFINITION_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    f32f("acceleration_x", 4, NONE),
    f32f("acceleration_y", 8, NONE),
    f32f("acceleration_z", 12, NONE),
    f32f("retardation_rate", 16, NONE),
    f32f("terminal_velocity", 20, NONE),
];

static VIEW_DEFINITION_FIELDS: &[FieldDef] = &[
    u16f("view_id", 2, NONE),
    u8f("group_id", 4, incl(0.0, 255.0)),
    bits("near_enable", 5, 0, 1, FLAG),
    bits("far_enable", 5, 1, 1, FLAG),
    bits("left_enable", 5, 2, 1, FLAG),
    bits("right_enable", 5, 3, 1, FLAG),
    bits("top_enable", 5, 4, 1, FLAG),
    bits("bottom_enable", 5, 5, 1, FLAG),
    bits("mirror_mode", 5, 6, 2, incl(0.0, 3.0)),
    bits("pixel_replication_mode", 6, 0, 3, incl(0.0, 7.0)),
    bits("projection_type", 6, 3, 1, FLAG),
    bits("reorder", 6, 4, 1, FLAG),
    bits("view_type", 7, 0, 3, incl(0.0, 7.0)),
    f32f("near", 8, strictly_above(0.0)),
    f32f("far", 12, above_sibling("near")),
    f32f("left", 16, strictly_above(-90.0)),
    f32f("right", 20, above_sibling_below("left", 90.0)),
    f32f("top", 24, above_sibling_below("bottom", 90.0)),
    f32f("bottom", 28, strictly_above(-90.0)),
];

static COLLISION_DETECTION_SEGMENT_DEFINITION_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    u8f("segment_id", 4, NONE),
    bits("segment_enable", 5, 0, 1, FLAG),
    f32f("x1", 8, NONE),
    f32f("y1", 12, NONE),
    f32f("z1", 16, NONE),
    f32f("x2", 20, NONE),
    f32f("y2", 24, NONE),
    f32f("z2", 28, NONE),
    u32f("material_mask", 32, NONE),
];

static COLLISION_DETECTION_VOLUME_DEFINITION_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    u8f("volume_id", 4, NONE),
    bits("volume_enable", 5, 0, 1, FLAG),
    bits("volume_type", 5, 1, 1, FLAG),
    f32f("x", 8, NONE),
    f32f("y", 12, NONE),
    f32f("z", 16, NONE),
    f32f("height", 20, strictly_above(0.0)),
    f32f("width", 24, strictly_above(0.0)),
    f32f("depth", 28, strictly_above(0.0)),
    f32f("roll", 32, incl(-180.0, 180.0)),
    f32f("pitch", 36, incl(-90.0, 90.0)),
    f32f("yaw", 40, incl(0.0, 360.0)),
];

static HAT_HOT_REQUEST_FIELDS: &[FieldDef] = &[
    u16f("hat_hot_id", 2, NONE),
    bits("type", 4, 0, 2, incl(0.0, 2.0)),
    bits("coordinate_system", 4, 2, 1, FLAG),
    u8f("update_period", 5, at_least(0.0)),
    u16f("entity_id", 6, NONE),
    f64f("lat_xoff", 8, incl(-90.0, 90.0)),
    f64f("lon_yoff", 16, incl(-180.0, 180.0)),
    f64f("alt_zoff", 24, NONE),
];

static LINE_OF_SIGHT_SEGMENT_REQUEST_FIELDS: &[FieldDef] = &[
    u16f("los_id", 2, NONE),
    bits("type", 4, 0, 1, FLAG),
    bits("source_coord", 4, 1, 1, FLAG),
    bits("destination_coord", 4, 2, 1, FLAG),
    bits("response_coord", 4, 3, 1, FLAG),
    bits("destination_entity_id_valid", 4, 4, 1, FLAG),
    u8f("alpha", 5, NONE),
    u16f("entity_id", 6, NONE),
    f64f("source_lat_xoff", 8, incl(-90.0, 90.0)),
    f64f("source_lon_yoff", 16, incl(-180.0, 180.0)),
    f64f("source_alt_zoff", 24, NONE),
    f64f("destination_lat_xoff", 32, incl(-90.0, 90.0)),
    f64f("destination_lon_xoff", 40, incl(-180.0, 180.0)),
    f64f("destination_alt_xoff", 48, NONE),
    u32f("material_mask", 56, NONE),
    u8f("update_period", 60, at_least(0.0)),
    u16f("destination_entity_id", 62, NONE),
];

static LINE_OF_SIGHT_VECTOR_REQUEST_FIELDS: &[FieldDef] = &[
    u16f("los_id", 2, NONE),
    bits("type", 4, 0, 1, FLAG),
    bits("source_coord", 4, 1, 1, FLAG),
    bits("response_coord", 4, 2, 1, FLAG),
    u8f("alpha", 5, NONE),
    u16f("entity_id", 6, NONE),
    f32f("azimuth", 8, incl(-180.0, 180.0)),
    f32f("elevation", 12, incl(-90.0, 90.0)),
    f32f("min_range", 16, at_least(0.0)),
    f32f("max_range", 20, above_sibling("min_range")),
    f64f("source_lat_xoff", 24, incl(-90.0, 90.0)),
    f64f("source_lon_yoff", 32, incl(-180.0, 180.0)),
    f64f("source_alt_zoff", 40, NONE),
    u32f("material_mask", 48, NONE),
    u8f("update_period", 52, at_least(0.0)),
];

static POSITION_REQUEST_FIELDS: &[FieldDef] = &[
    u16f("object_id", 2, NONE),
    u8f("part_id", 4, NONE),
    bits("update_mode", 5, 0, 1, FLAG),
    bits("object_class", 5, 1, 3, incl(0.0, 4.0)),
    bits("coord_system", 5, 4, 2, incl(0.0, 2.0)),
];

static ENVIRONMENTAL_CONDITIONS_REQUEST_FIELDS: &[FieldDef] = &[
    u8f("request_id", 2, NONE),
    u8f("type", 3, Rule::Discrete(&[1.0, 2.0, 4.0, 8.0])),
    f64f("lat", 8, incl(-90.0, 90.0)),
    f64f("lon", 16, incl(-180.0, 180.0)),
    f64f("alt", 24, NONE),
];

static START_OF_FRAME_FIELDS: &[FieldDef] = &[
    i8f("db_number", 2, incl(-128.0, 127.0)),
    u8f("ig_status", 3, incl(0.0, 255.0)),
    bits("ig_mode", 4, 0, 2, incl(0.0, 3.0)),
    bits("timestamp_valid", 4, 2, 1, FLAG),
    bits("earth_reference_model", 4, 3, 1, FLAG),
    bits("minor_version", 4, 4, 4, NONE),
    u32f("ig_frame_number", 8, NONE),
    u32f("timestamp", 12, NONE),
    u32f("last_host_frame_number", 16, NONE),
];

static HAT_HOT_RESPONSE_FIELDS: &[FieldDef] = &[
    u16f("hat_hot_id", 2, NONE),
    bits("valid", 4, 0, 1, FLAG),
    bits("type", 4, 1, 1, FLAG),
    bits("host_frame_number_lsn", 4, 4, 4, NONE),
    f64f("height", 8, NONE),
];

static HAT_HOT_EXTENDED_RESPONSE_FIELDS: &[FieldDef] = &[
    u16f("hat_hot_id", 2, NONE),
    bits("valid", 4, 0, 1, FLAG),
    bits("host_frame_number_lsn", 4, 4, 4, NONE),
    f64f("hat", 8, NONE),
    f64f("hot", 16, NONE),
    u32f("material_code", 24, NONE),
    f32f("normal_vector_azimuth", 28, incl(-180.0, 180.0)),
    f32f("normal_vector_elevation", 32, incl(-90.0, 90.0)),
];

static LINE_OF_SIGHT_RESPONSE_FIELDS: &[FieldDef] = &[
    u16f("los_id", 2, NONE),
    bits("valid", 4, 0, 1, FLAG),
    bits("entity_id_valid", 4, 1, 1, FLAG),
    bits("visible", 4, 2, 1, FLAG),
    bits("host_frame_number_lsn", 4, 4, 4, NONE),
    u16f("entity_id", 6, NONE),
    f64f("range", 8, NONE),
];

static LINE_OF_SIGHT_EXTENDED_RESPONSE_FIELDS: &[FieldDef] = &[
    u16f("los_id", 2, NONE),
    bits("valid", 4, 0, 1, FLAG),
    bits("entity_id_valid", 4, 1, 1, FLAG),
    bits("range_valid", 4, 2, 1, FLAG),
    bits("visible", 4, 3, 1, FLAG),
    bits("host_frame_number_lsn", 4, 4, 4, NONE),
    u8f("response_count", 5, NONE),
    u16f("entity_id", 6, NONE),
    f64f("range", 8, NONE),
    f64f("lat_xoff", 16, incl(-90.0, 90.0)),
    f64f("lon_yoff", 24, incl(-180.0, 180.0)),
    f64f("alt_zoff", 32, NONE),
    u8f("red", 40, NONE),
    u8f("green", 41, NONE),
    u8f("blue", 42, NONE),
    u8f("alpha", 43, NONE),
    u32f("material_code", 44, NONE),
    f32f("normal_vector_azimuth", 48, incl(-180.0, 180.0)),
    f32f("normal_vector_elevation", 52, incl(-90.0, 90.0)),
];

static SENSOR_RESPONSE_FIELDS: &[FieldDef] = &[
    u16f("view_id", 2, NONE),
    u8f("sensor_id", 4, NONE),
    bits("sensor_status", 5, 0, 2, incl(0.0, 3.0)),
    u16f("gate_x_size", 6, NONE),
    u16f("gate_y_size", 8, NONE),
    u16f("gate_x_position", 10, NONE),
    u16f("gate_y_position", 12, NONE),
    u32f("host_frame_number", 16, NONE),
];

static SENSOR_EXTENDED_RESPONSE_FIELDS: &[FieldDef] = &[
    u16f("view_id", 2, NONE),
    u8f("sensor_id", 4, NONE),
    bits("sensor_status", 5, 0, 2, incl(0.0, 3.0)),
    bits("entity_id_valid", 5, 2, 1, FLAG),
    u16f("entity_id", 6, NONE),
    u16f("gate_x_size", 8, NONE),
    u16f("gate_y_size", 10, NONE),
    f32f("gate_x_offset", 12, NONE),
    f32f("gate_y_offset", 16, NONE),
    u32f("host_frame_number", 20, NONE),
    f64f("track_point_latitude", 24, incl(-90.0, 90.0)),
    f64f("track_point_longitude", 32, incl(-180.0, 180.0)),
    f64f("track_point_altitude", 40, NONE),
];

static POSITION_RESPONSE_FIELDS: &[FieldDef] = &[
    u16f("object_id", 2, NONE),
    u8f("part_id", 4, NONE),
    bits("object_class", 5, 0, 3, incl(0.0, 4.0)),
    bits("coordinate_system", 5, 3, 2, incl(0.0, 2.0)),
    f64f("lat_xoff", 8, incl(-90.0, 90.0)),
    f64f("lon_yoff", 16, incl(-180.0, 180.0)),
    f64f("alt_zoff", 24, NONE),
    f32f("roll", 32, incl(-180.0, 180.0)),
    f32f("pitch", 36, incl(-90.0, 90.0)),
    f32f("yaw", 40, incl(0.0, 360.0)),
];

static WEATHER_CONDITIONS_RESPONSE_FIELDS: &[FieldDef] = &[
    u8f("request_id", 2, NONE),
    u8f("humidity", 3, incl(0.0, 100.0)),
    f32f("air_temp", 4, NONE),
    f32f("visibility_range", 8, at_least(0.0)),
    f32f("horiz_wind", 12, at_least(0.0)),
    f32f("vert_wind", 16, NONE),
    f32f("wind_direction", 20, incl(0.0, 360.0)),
    f32f("barometric_pressure", 24, at_least(0.0)),
];

static AEROSOL_CONDITIONS_RESPONSE_FIELDS: &[FieldDef] = &[
    u8f("request_id", 2, NONE),
    u8f("layer_id", 3, NONE),
    f32f("aerosol_concentration", 4, at_least(0.0)),
];

static MARITIME_SURFACE_CONDITIONS_RESPONSE_FIELDS: &[FieldDef] = &[
    u8f("request_id", 2, NONE),
    f32f("sea_surface_height", 4, NONE),
    f32f("surface_water_temperature", 8, NONE),
    f32f("surface_clarity", 12, incl(0.0, 100.0)),
];

static TERRESTRIAL_SURFACE_CONDITIONS_RESPONSE_FIELDS: &[FieldDef] = &[
    u8f("request_id", 2, NONE),
    u16f("surface_condition_id", 4, incl(0.0, 65535.0)),
];

static COLLISION_DETECTION_SEGMENT_NOTIFICATION_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    u8f("segment_id", 4, NONE),
    bits("collision_type", 5, 0, 1, FLAG),
    u16f("contacted_entity_id", 6, NONE),
    u32f("material_code", 8, NONE),
    f32f("intersection_distance", 12, NONE),
];

static COLLISION_DETECTION_VOLUME_NOTIFICATION_FIELDS: &[FieldDef] = &[
    u16f("entity_id", 2, NONE),
    u8f("volume_id", 4, NONE),
    bits("collision_type", 5, 0, 1, FLAG),
    u16f("contacted_entity_id", 6, NONE),
    u8f("contacted_volume_id", 8, NONE),
];

static ANIMATION_STOP_NOTIFICATION_FIELDS: &[FieldDef] = &[u16f("entity_id", 2, NONE)];

static EVENT_NOTIFICATION_FIELDS: &[FieldDef] = &[
    u16f("event_id", 2, NONE),
    bytes("event_data", 4, 16),
];

static IMAGE_GENERATOR_MESSAGE_FIELDS: &[FieldDef] = &[
    u16f("message_id", 2, NONE),
    ascii_tail("message", 4),
];

static USER_DEFINED_FIELDS: &[FieldDef] = &[bytes_tail("data", 4)];

const fn desc(
    name: &'static str,
    opcode: u8,
    size: SizeRule,
    fields: &'static [FieldDef],
) -> LayerDescriptor {
    LayerDescriptor { name, opcode, size, fields }
}

/// Every supported opcode, ascending.
pub static REGISTRY: &[LayerDescriptor] = &[
    desc("ig_control", 1, SizeRule::Fixed(24), IG_CONTROL_FIELDS),
    desc("entity_control", 2, SizeRule::Fixed(48), ENTITY_CONTROL_FIELDS),
    desc(
        "conformal_clamped_entity_control",
        3,
        SizeRule::Fixed(24),
        CONFORMAL_CLAMPED_ENTITY_CONTROL_FIELDS,
    ),
    desc("component_control", 4, SizeRule::Fixed(32), COMPONENT_CONTROL_FIELDS),
    desc(
        "short_component_control",
        5,
        SizeRule::Fixed(16),
        SHORT_COMPONENT_CONTROL_FIELDS,
    ),
    desc(
        "articulated_part_control",
        6,
        SizeRule::Fixed(32),
        ARTICULATED_PART_CONTROL_FIELDS,
    ),
    desc(
        "short_articulated_part_control",
        7,
        SizeRule::Fixed(16),
        SHORT_ARTICULATED_PART_CONTROL_FIELDS,
    ),
    desc("rate_control", 8, SizeRule::Fixed(32), RATE_CONTROL_FIELDS),
    desc(
        "celestial_sphere_control",
        9,
        SizeRule::Fixed(16),
        CELESTIAL_SPHERE_CONTROL_FIELDS,
    ),
    desc("atmosphere_control", 10, SizeRule::Fixed(32), ATMOSPHERE_CONTROL_FIELDS),
    desc(
        "environmental_region_control",
        11,
        SizeRule::Fixed(48),
        ENVIRONMENTAL_REGION_CONTROL_FIELDS,
    ),
    desc("weather_control", 12, SizeRule::Fixed(56), WEATHER_CONTROL_FIELDS),
    desc(
        "maritime_surface_conditions_control",
        13,
        SizeRule::Fixed(24),
        MARITIME_SURFACE_CONDITIONS_CONTROL_FIELDS,
    ),
    desc("wave_control", 14, SizeRule::Fixed(32), WAVE_CONTROL_FIELDS),
    desc(
        "terrestrial_surface_conditions_control",
        15,
        SizeRule::Fixed(8),
        TERRESTRIAL_SURFACE_CONDITIONS_CONTROL_FIELDS,
    ),
    desc("view_control", 16, SizeRule::Fixed(32), VIEW_CONTROL_FIELDS),
    desc("sensor_control", 17, SizeRule::Fixed(24), SENSOR_CONTROL_FIELDS),
    desc(
        "motion_tracker_control",
        18,
        SizeRule::Fixed(8),
        MOTION_TRACKER_CONTROL_FIELDS,
    ),
    desc(
        "earth_reference_model_definition",
        19,
        SizeRule::Fixed(24),
        EARTH_REFERENCE_MODEL_DEFINITION_FIELDS,
    ),
    desc(
        "trajectory_definition",
        20,
        SizeRule::Fixed(24),
        TRAJECTORY_DEFINITION_FIELDS,
    ),
    desc("view_definition", 21, SizeRule::Fixed(32), VIEW_DEFINITION_FIELDS),
    desc(
        "collision_detection_segment_definition",
        22,
        SizeRule::Fixed(40),
        COLLISION_DETECTION_SEGMENT_DEFINITION_FIELDS,
    ),
    desc(
        "collision_detection_volume_definition",
        23,
        SizeRule::Fixed(48),
        COLLISION_DETECTION_VOLUME_DEFINITION_FIELDS,
    ),
    desc("hat_hot_request", 24, SizeRule::Fixed(32), HAT_HOT_REQUEST_FIELDS),
    desc(
        "line_of_sight_segment_request",
        25,
        SizeRule::Fixed(64),
        LINE_OF_SIGHT_SEGMENT_REQUEST_FIELDS,
    ),
    desc(
        "line_of_sight_vector_request",
        26,
        SizeRule::Fixed(56),
        LINE_OF_SIGHT_VECTOR_REQUEST_FIELDS,
    ),
    desc("position_request", 27, SizeRule::Fixed(8), POSITION_REQUEST_FIELDS),
    desc(
        "environmental_conditions_request",
        28,
        SizeRule::Fixed(32),
        ENVIRONMENTAL_CONDITIONS_REQUEST_FIELDS,
    ),
    desc("start_of_frame", 101, SizeRule::Fixed(24), START_OF_FRAME_FIELDS),
    desc("hat_hot_response", 102, SizeRule::Fixed(16), HAT_HOT_RESPONSE_FIELDS),
    desc(
        "hat_hot_extended_response",
        103,
        SizeRule::Fixed(40),
        HAT_HOT_EXTENDED_RESPONSE_FIELDS,
    ),
    desc(
        "line_of_sight_response",
        104,
        SizeRule::Fixed(16),
        LINE_OF_SIGHT_RESPONSE_FIELDS,
    ),
    desc(
        "line_of_sight_extended_response",
        105,
        SizeRule::Fixed(56),
        LINE_OF_SIGHT_EXTENDED_RESPONSE_FIELDS,
    ),
    desc("sensor_response", 106, SizeRule::Fixed(24), SENSOR_RESPONSE_FIELDS),
    desc(
        "sensor_extended_response",
        107,
        SizeRule::Fixed(48),
        SENSOR_EXTENDED_RESPONSE_FIELDS,
    ),
    desc("position_response", 108, SizeRule::Fixed(48), POSITION_RESPONSE_FIELDS),
    desc(
        "weather_conditions_response",
        109,
        SizeRule::Fixed(32),
        WEATHER_CONDITIONS_RESPONSE_FIELDS,
    ),
    desc(
        "aerosol_conditions_response",
        110,
        SizeRule::Fixed(8),
        AEROSOL_CONDITIONS_RESPONSE_FIELDS,
    ),
    desc(
        "maritime_surface_conditions_response",
        111,
        SizeRule::Fixed(16),
        MARITIME_SURFACE_CONDITIONS_RESPONSE_FIELDS,
    ),
    desc(
        "terrestrial_surface_conditions_response",
        112,
        SizeRule::Fixed(8),
        TERRESTRIAL_SURFACE_CONDITIONS_RESPONSE_FIELDS,
    ),
    desc(
        "collision_detection_segment_notification",
        113,
        SizeRule::Fixed(16),
        COLLISION_DETECTION_SEGMENT_NOTIFICATION_FIELDS,
    ),
    desc(
        "collision_detection_volume_notification",
        114,
        SizeRule::Fixed(16),
        COLLISION_DETECTION_VOLUME_NOTIFICATION_FIELDS,
    ),
    desc(
        "animation_stop_notification",
        115,
        SizeRule::Fixed(8),
        ANIMATION_STOP_NOTIFICATION_FIELDS,
    ),
    desc("event_notification", 116, SizeRule::Fixed(16), EVENT_NOTIFICATION_FIELDS),
    desc(
        "image_generator_message",
        117,
        SizeRule::MessageText,
        IMAGE_GENERATOR_MESSAGE_FIELDS,
    ),
    desc("user_defined", 201, SizeRule::DataBlocks, USER_DEFINED_FIELDS),
];
