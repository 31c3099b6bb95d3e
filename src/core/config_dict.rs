// Configuration Dictionary
// Key/value protocol used to read and write widget options

use serde_yaml::{Mapping, Value};

/// Dictionary of option names to values
///
/// Keys are plain strings (`"closable"`, `"reorderable"`, `"label"`, ...).
/// Values keep whatever type the caller supplied and are coerced on read.
pub type ConfigDict = Mapping;

/// Options specific to one widget kind, read and written through a [`ConfigDict`]
pub trait ExtraConfig {
    /// Apply every recognised key present in `dict`; absent keys leave the option untouched
    fn set_extra_config(&mut self, dict: &ConfigDict);

    /// Write every option this kind owns into `dict`
    fn get_extra_config(&self, dict: &mut ConfigDict);
}

/// Truthiness of a configuration value
///
/// Null, `false`, zero, the empty string and empty collections are false;
/// everything else is true.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => to_bool(&tagged.value),
    }
}

/// Read `key` as a boolean, if present
pub fn get_bool(dict: &ConfigDict, key: &str) -> Option<bool> {
    dict.get(key).map(to_bool)
}

/// Read `key` as a string, if present and a string
pub fn get_str<'a>(dict: &'a ConfigDict, key: &str) -> Option<&'a str> {
    dict.get(key).and_then(Value::as_str)
}

/// Read `key` as an integer, accepting whole floats
pub fn get_int(dict: &ConfigDict, key: &str) -> Option<i64> {
    let value = dict.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

pub fn set_bool(dict: &mut ConfigDict, key: &str, value: bool) {
    dict.insert(Value::String(key.to_string()), Value::Bool(value));
}

pub fn set_str(dict: &mut ConfigDict, key: &str, value: &str) {
    dict.insert(Value::String(key.to_string()), Value::String(value.to_string()));
}

pub fn set_int(dict: &mut ConfigDict, key: &str, value: i64) {
    dict.insert(Value::String(key.to_string()), Value::Number(value.into()));
}

pub fn set_null(dict: &mut ConfigDict, key: &str) {
    dict.insert(Value::String(key.to_string()), Value::Null);
}
