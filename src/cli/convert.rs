//! JSON -> property value conversion

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::CliError;

/// Parse a JSON object of property values
pub fn parse_values(json_str: &str) -> Result<BTreeMap<String, Option<Decimal>>, CliError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;
    json_to_values(json_value)
}

/// Convert a JSON object to a property-value map.
///
/// Numbers and numeric strings become values; `null` and `""` mean the
/// property has no value. Names not in the object are unknown properties.
pub fn json_to_values(
    v: serde_json::Value,
) -> Result<BTreeMap<String, Option<Decimal>>, CliError> {
    let serde_json::Value::Object(obj) = v else {
        return Err(CliError::InvalidValue {
            name: "$".to_string(),
            reason: "expected a JSON object of property values".to_string(),
        });
    };

    obj.into_iter()
        .map(|(name, value)| {
            let converted = json_to_decimal(&name, value)?;
            Ok((name, converted))
        })
        .collect()
}

fn json_to_decimal(name: &str, v: serde_json::Value) -> Result<Option<Decimal>, CliError> {
    let invalid = |reason: String| CliError::InvalidValue {
        name: name.to_string(),
        reason,
    };

    match v {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(Some)
                .map_err(|e| invalid(e.to_string()))
        }
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => Decimal::from_str(s.trim())
            .map(Some)
            .map_err(|_| invalid(format!("'{}' is not a number", s))),
        other => Err(invalid(format!("expected a number, got {}", other))),
    }
}
