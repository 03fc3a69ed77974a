use crate::{ModelError, Result};
use apollo_compiler::ast;

/// A JSON-compatible literal used for default values and directive arguments.
///
/// Object entries keep their source order.
pub type Value = serde_json::Value;

/// Converts a constant literal from the source schema.
pub(crate) fn from_ast(value: &ast::Value) -> Result<Value> {
    Ok(match value {
        ast::Value::Null => Value::Null,
        ast::Value::Boolean(b) => Value::Bool(*b),
        ast::Value::String(s) => Value::String(s.clone()),
        ast::Value::Enum(name) => Value::String(name.to_string()),
        ast::Value::Int(int) => {
            let raw = int.as_str();
            let parsed: i64 = raw.parse().map_err(|_| ModelError::UnsupportedValue {
                kind: "Int",
                raw: raw.to_string(),
            })?;
            Value::from(parsed)
        }
        ast::Value::Float(float) => {
            let raw = float.as_str();
            raw.parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| ModelError::UnsupportedValue {
                    kind: "Float",
                    raw: raw.to_string(),
                })?
        }
        ast::Value::List(items) => Value::Array(
            items
                .iter()
                .map(|item| from_ast(item))
                .collect::<Result<_>>()?,
        ),
        ast::Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(name, item)| Ok((name.to_string(), from_ast(item)?)))
                .collect::<Result<_>>()?,
        ),
        ast::Value::Variable(name) => {
            return Err(ModelError::UnsupportedValue {
                kind: "Variable",
                raw: format!("${name}"),
            })
        }
    })
}
