use super::value::{FieldValue, ValidatedField};

/// Legality rule attached to a field in the layout registry.
///
/// Range rules treat a missing value as a violation ("value is null");
/// a rule with no configured bounds otherwise accepts everything. Cross
/// rules read sibling fields of the same layer and therefore only run once
/// every field has been populated.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    None,
    Inclusive { lo: Option<f64>, hi: Option<f64> },
    Exclusive { lo: Option<f64>, hi: Option<f64> },
    Discrete(&'static [f64]),
    /// Strictly greater than a named sibling, optionally strictly below `hi`.
    AboveSibling {
        sibling: &'static str,
        hi: Option<f64>,
    },
}

impl Rule {
    /// Check `field` against the rule, reading `siblings` for cross rules.
    ///
    /// Returns the violation message, or `None` when the field is legal.
    pub fn check(&self, field: &ValidatedField, siblings: &[ValidatedField]) -> Option<String> {
        match self {
            Rule::None => None,
            Rule::Inclusive { lo, hi } => check_range(field, *lo, *hi, false),
            Rule::Exclusive { lo, hi } => check_range(field, *lo, *hi, true),
            Rule::Discrete(set) => check_discrete(field, set),
            Rule::AboveSibling { sibling, hi } => check_above_sibling(field, sibling, *hi, siblings),
        }
    }
}

fn numeric(field: &ValidatedField) -> Result<f64, String> {
    match &field.value {
        None => Err("value is null".to_string()),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| "value is not numeric".to_string()),
    }
}

fn check_range(field: &ValidatedField, lo: Option<f64>, hi: Option<f64>, strict: bool) -> Option<String> {
    let value = match numeric(field) {
        Ok(value) => value,
        Err(message) => return Some(message),
    };
    if lo.is_none() && hi.is_none() {
        return None;
    }
    let below = lo.is_some_and(|lo| if strict { value <= lo } else { value < lo });
    let above = hi.is_some_and(|hi| if strict { value >= hi } else { value > hi });
    if below || above {
        let kind = if strict { "exclusive" } else { "inclusive" };
        return Some(format!(
            "value {value} outside {kind} range {}",
            format_bounds(lo, hi)
        ));
    }
    None
}

fn check_discrete(field: &ValidatedField, set: &[f64]) -> Option<String> {
    if set.is_empty() {
        return None;
    }
    let member = field
        .value
        .as_ref()
        .and_then(FieldValue::as_f64)
        .is_some_and(|value| set.iter().any(|allowed| *allowed == value));
    if member {
        None
    } else {
        Some(format!("value not found in {}", format_set(set)))
    }
}

fn check_above_sibling(
    field: &ValidatedField,
    sibling: &str,
    hi: Option<f64>,
    siblings: &[ValidatedField],
) -> Option<String> {
    let value = match numeric(field) {
        Ok(value) => value,
        Err(message) => return Some(message),
    };
    let other = match siblings.iter().find(|candidate| candidate.name == sibling) {
        Some(other) => other,
        None => return Some(format!("sibling `{sibling}` is missing")),
    };
    let other_value = match other.value.as_ref().and_then(FieldValue::as_f64) {
        Some(other_value) => other_value,
        None => return Some(format!("sibling `{sibling}` is null")),
    };
    if value <= other_value {
        return Some(format!(
            "value {value} is not greater than `{sibling}` ({other_value})"
        ));
    }
    if let Some(hi) = hi {
        if value >= hi {
            return Some(format!("value {value} is not below {hi}"));
        }
    }
    None
}

fn format_bounds(lo: Option<f64>, hi: Option<f64>) -> String {
    let lo = lo.map_or_else(|| "-inf".to_string(), |v| format!("{v}"));
    let hi = hi.map_or_else(|| "inf".to_string(), |v| format!("{v}"));
    format!("[{lo}, {hi}]")
}

fn format_set(set: &[f64]) -> String {
    let members: Vec<String> = set.iter().map(|v| format!("{v}")).collect();
    format!("{{{}}}", members.join(", "))
}
