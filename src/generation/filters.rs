//! Generic Tera filters with no descriptor awareness.

use std::collections::HashMap;

use tera::{Result, Tera, Value};

use crate::core::utils;
use crate::descriptor::views;

/// Register every generic filter on `tera`.
pub fn register(tera: &mut Tera) {
    tera.register_filter("snake_case", snake_case);
    tera.register_filter("proper_case", proper_case);
    tera.register_filter("pascal_case", proper_case);
    tera.register_filter("camel_case", camel_case);
    tera.register_filter("kebab_case", kebab_case);
    tera.register_filter("trim_ext", trim_ext);
    tera.register_filter("base", base);
    tera.register_filter("short_type", short_type);
    tera.register_filter("clean_label", clean_label);
    tera.register_filter("clean_type", clean_type);
    tera.register_filter("anchor", anchor);
}

fn as_str<'a>(value: &'a Value, filter: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{filter} filter expects a string")))
}

pub(crate) fn snake_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(utils::to_snake_case(as_str(value, "snake_case")?)))
}

pub(crate) fn proper_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(utils::to_proper_case(as_str(value, "proper_case")?)))
}

pub(crate) fn camel_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(utils::to_camel_case(as_str(value, "camel_case")?)))
}

pub(crate) fn kebab_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(utils::to_kebab_case(as_str(value, "kebab_case")?)))
}

pub(crate) fn trim_ext(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(utils::trim_ext(as_str(value, "trim_ext")?).to_string()))
}

pub(crate) fn base(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(utils::base_name(as_str(value, "base")?).to_string()))
}

pub(crate) fn short_type(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(views::short_type(as_str(value, "short_type")?).to_string()))
}

pub(crate) fn clean_label(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(views::clean_label(as_str(value, "clean_label")?)))
}

pub(crate) fn clean_type(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(views::clean_type(as_str(value, "clean_type")?)))
}

pub(crate) fn anchor(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(views::anchor_for(as_str(value, "anchor")?)))
}
