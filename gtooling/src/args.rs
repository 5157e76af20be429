//! Argument coercion and the validated argument set handed to handlers.
//!
//! ```rust
//! use gtooling::{ArgValue, ParameterKind, coerce_value};
//! use serde_json::json;
//!
//! assert_eq!(coerce_value(ParameterKind::Integer, &json!("42")), Ok(ArgValue::Integer(42)));
//! assert_eq!(coerce_value(ParameterKind::Boolean, &json!("yes")), Ok(ArgValue::Boolean(true)));
//! assert!(coerce_value(ParameterKind::String, &json!(7)).is_err());
//! ```

use serde_json::{Map, Number, Value};

use crate::{ParameterKind, ToolError, ToolSchema};

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl ArgValue {
    pub fn kind(&self) -> Option<ParameterKind> {
        match self {
            Self::String(_) => Some(ParameterKind::String),
            Self::Integer(_) => Some(ParameterKind::Integer),
            Self::Float(_) => Some(ParameterKind::Float),
            Self::Boolean(_) => Some(ParameterKind::Boolean),
            Self::Null => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().map_or("null", ParameterKind::as_str)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::String(value) => Value::String(value.clone()),
            Self::Integer(value) => Value::Number((*value).into()),
            Self::Float(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::Boolean(value) => Value::Bool(*value),
            Self::Null => Value::Null,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerces one raw JSON value to `kind`, returning a human-readable detail on
/// failure.
pub fn coerce_value(kind: ParameterKind, value: &Value) -> Result<ArgValue, String> {
    let mismatch = || format!("expected {kind}, got {}", json_type_name(value));

    match (kind, value) {
        (ParameterKind::String, Value::String(text)) => Ok(ArgValue::String(text.clone())),
        (ParameterKind::Integer, Value::Number(number)) => {
            if let Some(integer) = number.as_i64() {
                return Ok(ArgValue::Integer(integer));
            }
            match number.as_f64() {
                Some(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
                    Ok(ArgValue::Integer(float as i64))
                }
                _ => Err(format!("expected integer, got non-integral number {number}")),
            }
        }
        (ParameterKind::Integer, Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map(ArgValue::Integer)
            .map_err(|_| format!("expected integer, got string {text:?}")),
        (ParameterKind::Float, Value::Number(number)) => {
            number.as_f64().map(ArgValue::Float).ok_or_else(mismatch)
        }
        (ParameterKind::Float, Value::String(text)) => match text.trim().parse::<f64>() {
            Ok(float) if float.is_finite() => Ok(ArgValue::Float(float)),
            _ => Err(format!("expected float, got string {text:?}")),
        },
        (ParameterKind::Boolean, Value::Bool(flag)) => Ok(ArgValue::Boolean(*flag)),
        (ParameterKind::Boolean, Value::Number(number)) => match number.as_i64() {
            Some(0) => Ok(ArgValue::Boolean(false)),
            Some(1) => Ok(ArgValue::Boolean(true)),
            _ => Err(format!("expected boolean, got number {number}")),
        },
        (ParameterKind::Boolean, Value::String(text)) => {
            match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(ArgValue::Boolean(true)),
                "false" | "0" | "no" | "off" => Ok(ArgValue::Boolean(false)),
                _ => Err(format!("expected boolean, got string {text:?}")),
            }
        }
        _ => Err(mismatch()),
    }
}

/// What to do with argument keys the descriptor does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownArguments {
    #[default]
    Reject,
    Ignore,
}

/// Validates `raw` against `schema` and produces the typed, ordered argument set.
pub fn bind_arguments(
    schema: &ToolSchema,
    raw: &Map<String, Value>,
    unknown: UnknownArguments,
) -> Result<ToolArguments, ToolError> {
    let mut bound = ToolArguments::new();

    for parameter in &schema.parameters {
        match raw.get(&parameter.name) {
            Some(value) if !value.is_null() => {
                let coerced = coerce_value(parameter.kind, value).map_err(|detail| {
                    ToolError::invalid_arguments(format!(
                        "invalid argument {}: {detail}",
                        parameter.name
                    ))
                })?;
                bound.values.push((parameter.name.clone(), coerced));
            }
            _ if parameter.required => {
                return Err(ToolError::invalid_arguments(format!(
                    "missing required argument {}",
                    parameter.name
                )));
            }
            _ => {
                let default = parameter.default.clone().unwrap_or(ArgValue::Null);
                bound.values.push((parameter.name.clone(), default));
            }
        }
    }

    if unknown == UnknownArguments::Reject
        && let Some(key) = raw.keys().find(|key| schema.parameter(key).is_none())
    {
        return Err(ToolError::invalid_arguments(format!(
            "unexpected argument {key}"
        )));
    }

    Ok(bound)
}

/// Validated arguments in declared parameter order.
///
/// Typed accessors fail with `InvalidArguments` so handlers can use `?`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Vec<(String, ArgValue)>,
}

impl ToolArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.values.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn string(&self, name: &str) -> Result<&str, ToolError> {
        self.optional_string(name)?
            .ok_or_else(|| missing(name))
    }

    pub fn optional_string(&self, name: &str) -> Result<Option<&str>, ToolError> {
        self.typed(name, ParameterKind::String, |value| match value {
            ArgValue::String(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn integer(&self, name: &str) -> Result<i64, ToolError> {
        self.optional_integer(name)?.ok_or_else(|| missing(name))
    }

    pub fn optional_integer(&self, name: &str) -> Result<Option<i64>, ToolError> {
        self.typed(name, ParameterKind::Integer, |value| match value {
            ArgValue::Integer(integer) => Some(*integer),
            _ => None,
        })
    }

    pub fn float(&self, name: &str) -> Result<f64, ToolError> {
        self.typed(name, ParameterKind::Float, |value| match value {
            ArgValue::Float(float) => Some(*float),
            _ => None,
        })?
        .ok_or_else(|| missing(name))
    }

    pub fn boolean(&self, name: &str) -> Result<bool, ToolError> {
        self.typed(name, ParameterKind::Boolean, |value| match value {
            ArgValue::Boolean(flag) => Some(*flag),
            _ => None,
        })?
        .ok_or_else(|| missing(name))
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        kind: ParameterKind,
        extract: impl FnOnce(&'a ArgValue) -> Option<T>,
    ) -> Result<Option<T>, ToolError> {
        match self.get(name) {
            None | Some(ArgValue::Null) => Ok(None),
            Some(value) => extract(value).map(Some).ok_or_else(|| {
                ToolError::invalid_arguments(format!(
                    "argument {name} is {}, expected {kind}",
                    value.type_name()
                ))
            }),
        }
    }
}

fn missing(name: &str) -> ToolError {
    ToolError::invalid_arguments(format!("missing required argument {name}"))
}
