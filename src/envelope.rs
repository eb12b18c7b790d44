//! The common shape of every message posted by the surface:
//! `{ "command": <string>, "data"?: <anything> }`.

use serde_json::Value;

/// Borrowed view of a message that passed the envelope check. `data` is still
/// unvalidated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope<'a> {
    pub command: &'a str,
    pub data: Option<&'a Value>,
}

impl<'a> Envelope<'a> {
    /// `Some` iff `value` is an object whose `command` member is a string.
    /// Other members are ignored. A `null` data member counts as absent.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        let command = obj.get("command")?.as_str()?;
        let data = obj.get("data").filter(|d| !d.is_null());
        Some(Envelope { command, data })
    }
}

/// True iff `value` has the envelope shape.
pub fn is_envelope(value: &Value) -> bool {
    Envelope::from_value(value).is_some()
}
