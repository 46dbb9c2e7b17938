//! Field normalisation for list endpoints.
//!
//! Transaction lists come back as flat objects of camelCase keys and
//! string values. A [`Record`] renames the keys to snake_case and gives
//! each value a type: flags (`is_*`, `*_status`) become booleans, empty
//! strings become null and digit strings become integers.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Rename an API field to snake_case.
pub fn to_snake_case(name: &str) -> String {
    match name {
        "timeStamp" => return "timestamp".to_owned(),
        "txreceipt_status" => return "tx_receipt_status".to_owned(),
        _ => {}
    }

    let chars: Vec<char> = name.chars().collect();
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let ends_word = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let starts_word = chars.get(i + 1).is_some_and(|next| next.is_ascii_lowercase());
            if prev != '_' && (ends_word || starts_word) {
                snake.push('_');
            }
        }
        snake.push(c.to_ascii_lowercase());
    }
    snake
}

/// Interpret a flag value. `0`, `false`, `none`, `null`, `n/a` and the empty
/// string are false, anything else is true.
pub fn parse_flag(text: &str) -> bool {
    !matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "none" | "null" | "n/a" | ""
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Flag(bool),
    Integer(u128),
    Text(String),
}

impl FieldValue {
    fn flag(value: Value) -> Self {
        let flag = match value {
            Value::Null => false,
            Value::Bool(flag) => flag,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(text) => parse_flag(&text),
            Value::Array(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
        };
        FieldValue::Flag(flag)
    }

    fn plain(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(flag) => FieldValue::Flag(flag),
            Value::Number(n) => match n.as_u64() {
                Some(n) => FieldValue::Integer(n.into()),
                None => FieldValue::Text(n.to_string()),
            },
            Value::String(text) if text.is_empty() => FieldValue::Null,
            Value::String(text) if text.bytes().all(|b| b.is_ascii_digit()) => match text.parse() {
                Ok(n) => FieldValue::Integer(n),
                // wider than u128
                Err(_) => FieldValue::Text(text),
            },
            Value::String(text) => FieldValue::Text(text),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    pub fn from_raw(raw: serde_json::Map<String, Value>) -> Self {
        raw.into_iter().collect()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn integer(&self, key: &str) -> Option<u128> {
        match self.0.get(key)? {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(key, value)| {
                let key = to_snake_case(&key);
                let value = if key.starts_with("is_") || key.ends_with("_status") {
                    FieldValue::flag(value)
                } else {
                    FieldValue::plain(value)
                };
                (key, value)
            })
            .collect();
        Self(fields)
    }
}
