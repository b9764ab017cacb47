//! Typed field access over a JSON snapshot.
//!
//! Every lookup either yields the expected type or a `MalformedSnapshot`
//! error naming the dotted path of the missing field, so checks can use `?`
//! throughout and never emit a partial result.

use serde_json::Value;

use crate::utils::{AuditError, Result};

#[derive(Debug, Clone)]
pub struct Fields<'a> {
    value: &'a Value,
    device: &'a str,
    command: &'a str,
    path: String,
}

impl<'a> Fields<'a> {
    pub fn root(value: &'a Value, device: &'a str, command: &'a str) -> Self {
        Self { value, device, command, path: String::new() }
    }

    fn child(&self, key: &str, value: &'a Value) -> Fields<'a> {
        let path = if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        };
        Fields { value, device: self.device, command: self.command, path }
    }

    fn missing(&self, key: &str) -> AuditError {
        let field = if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        };
        AuditError::malformed(self.device, self.command, field)
    }

    fn wrong_shape(&self) -> AuditError {
        let field = if self.path.is_empty() { "<root>".to_string() } else { self.path.clone() };
        AuditError::malformed(self.device, self.command, field)
    }

    pub fn get(&self, key: &str) -> Option<Fields<'a>> {
        self.value.get(key).map(|v| self.child(key, v))
    }

    pub fn field(&self, key: &str) -> Result<Fields<'a>> {
        self.get(key).ok_or_else(|| self.missing(key))
    }

    pub fn str(&self, key: &str) -> Result<&'a str> {
        self.value
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing(key))
    }

    /// Strings verbatim, numbers in their JSON spelling.
    pub fn text(&self, key: &str) -> Result<String> {
        match self.value.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(self.missing(key)),
        }
    }

    pub fn f64(&self, key: &str) -> Result<f64> {
        self.value
            .get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| self.missing(key))
    }

    /// Integral value; floats are truncated toward zero.
    pub fn i64(&self, key: &str) -> Result<i64> {
        let v = self.value.get(key).ok_or_else(|| self.missing(key))?;
        v.as_i64()
            .or_else(|| v.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| self.missing(key))
    }

    pub fn bool(&self, key: &str) -> Result<bool> {
        self.value
            .get(key)
            .and_then(Value::as_bool)
            .ok_or_else(|| self.missing(key))
    }

    /// Object members in document order.
    pub fn as_entries(&self) -> Result<Vec<(&'a str, Fields<'a>)>> {
        let map = self.value.as_object().ok_or_else(|| self.wrong_shape())?;
        Ok(map
            .iter()
            .map(|(k, v)| (k.as_str(), self.child(k, v)))
            .collect())
    }

    pub fn as_items(&self) -> Result<Vec<Fields<'a>>> {
        let arr = self.value.as_array().ok_or_else(|| self.wrong_shape())?;
        Ok(arr
            .iter()
            .enumerate()
            .map(|(i, v)| self.child(&i.to_string(), v))
            .collect())
    }

    pub fn entries(&self, key: &str) -> Result<Vec<(&'a str, Fields<'a>)>> {
        self.field(key)?.as_entries()
    }

    pub fn items(&self, key: &str) -> Result<Vec<Fields<'a>>> {
        self.field(key)?.as_items()
    }

    pub fn first(&self) -> Result<Fields<'a>> {
        self.as_items()?
            .into_iter()
            .next()
            .ok_or_else(|| self.missing("0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn missing_field(err: AuditError) -> String {
        match err {
            AuditError::MalformedSnapshot { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_missing_field_reports_full_path() {
        let doc = json!({"powerSupplySlots": {"1": {"name": "PWR-500AC-R"}}});
        let root = Fields::root(&doc, "leaf1", "show inventory");
        let slots = root.entries("powerSupplySlots").unwrap();
        let (_, slot) = &slots[0];
        assert_eq!(slot.str("name").unwrap(), "PWR-500AC-R");
        assert_eq!(missing_field(slot.str("serialNum").unwrap_err()), "powerSupplySlots.1.serialNum");
    }

    #[test]
    fn entries_keep_document_order() {
        let doc = json!({"vrfs": {"prod": {}, "default": {}, "mgmt": {}}});
        let root = Fields::root(&doc, "d", "c");
        let names: Vec<&str> = root.entries("vrfs").unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["prod", "default", "mgmt"]);
    }

    #[test]
    fn wrong_type_counts_as_missing() {
        let doc = json!({"alertCount": "zero", "sensors": {}});
        let root = Fields::root(&doc, "d", "c");
        assert_eq!(missing_field(root.i64("alertCount").unwrap_err()), "alertCount");
        assert_eq!(missing_field(root.items("sensors").unwrap_err()), "sensors");
    }

    #[test]
    fn numbers_render_as_text_and_truncate() {
        let doc = json!({"asn": 65001, "maxTemperature": 41.9, "negative": -3.7});
        let root = Fields::root(&doc, "d", "c");
        assert_eq!(root.text("asn").unwrap(), "65001");
        assert_eq!(root.i64("maxTemperature").unwrap(), 41);
        assert_eq!(root.i64("negative").unwrap(), -3);
    }
}
