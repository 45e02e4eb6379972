use serde::{Serialize, Serializer};

/// Typed scalar decoded from the wire.
///
/// Numeric variants compare against rule bounds through [`FieldValue::as_f64`];
/// `Ascii` and `Bytes` are non-numeric and only ever carry `Rule::None`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    U8(u8),
    I8(i8),
    U16(u16),
    U32(u32),
    F32(f32),
    F64(f64),
    Ascii(String),
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Numeric view used by range and membership rules.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::U8(v) => Some(f64::from(*v)),
            FieldValue::I8(v) => Some(f64::from(*v)),
            FieldValue::U16(v) => Some(f64::from(*v)),
            FieldValue::U32(v) => Some(f64::from(*v)),
            FieldValue::F32(v) => Some(f64::from(*v)),
            FieldValue::F64(v) => Some(*v),
            FieldValue::Ascii(_) | FieldValue::Bytes(_) => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::U8(v) => serializer.serialize_u8(*v),
            FieldValue::I8(v) => serializer.serialize_i8(*v),
            FieldValue::U16(v) => serializer.serialize_u16(*v),
            FieldValue::U32(v) => serializer.serialize_u32(*v),
            FieldValue::F32(v) => serializer.serialize_f32(*v),
            FieldValue::F64(v) => serializer.serialize_f64(*v),
            FieldValue::Ascii(v) => serializer.serialize_str(v),
            FieldValue::Bytes(v) => serializer.serialize_str(&to_hex(v)),
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decoded field with its post-validation verdict.
///
/// `value` is `None` when the declared packet size left the field outside
/// the buffer. `valid` and `error` are meaningful only after the layer's
/// validation pass has run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedField {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidatedField {
    pub fn new(name: &'static str, value: Option<FieldValue>) -> Self {
        Self {
            name,
            value,
            valid: true,
            error: None,
        }
    }

    pub(crate) fn mark_invalid(&mut self, message: String) {
        self.valid = false;
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldValue, ValidatedField};

    #[test]
    fn as_f64_numeric_variants() {
        assert_eq!(FieldValue::U8(7).as_f64(), Some(7.0));
        assert_eq!(FieldValue::I8(-56).as_f64(), Some(-56.0));
        assert_eq!(FieldValue::U16(65535).as_f64(), Some(65535.0));
        assert_eq!(FieldValue::F32(-1.5).as_f64(), Some(-1.5));
        assert_eq!(FieldValue::F64(0.25).as_f64(), Some(0.25));
    }

    #[test]
    fn as_f64_non_numeric_variants() {
        assert_eq!(FieldValue::Ascii("IG online".to_string()).as_f64(), None);
        assert_eq!(FieldValue::Bytes(vec![1, 2]).as_f64(), None);
    }

    #[test]
    fn serialize_scalars_and_hex_bytes() {
        let value = serde_json::to_value(FieldValue::U16(24)).expect("u16 json");
        assert_eq!(value, serde_json::json!(24));

        let value = serde_json::to_value(FieldValue::Bytes(vec![0xde, 0xad])).expect("bytes json");
        assert_eq!(value, serde_json::json!("dead"));
    }

    #[test]
    fn serialize_omits_empty_value_and_error() {
        let field = ValidatedField::new("db_number", None);
        let value = serde_json::to_value(&field).expect("field json");
        assert!(value.get("value").is_none());
        assert!(value.get("error").is_none());
        assert_eq!(value["valid"], serde_json::json!(true));
    }
}
