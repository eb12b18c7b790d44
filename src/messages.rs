//! Typed messages the surface may post to the host, one guard per command.
//!
//! Every guard runs the same pipeline: envelope check, exact command match,
//! then payload validation. Payload fields must be present with their exact JSON
//! type; enum fields must match one of their literals exactly (case-sensitive).
//! Unknown members on the envelope or payload are ignored, so the surface may
//! send newer optional fields to an older host.
//!
//! Catalog (version [`CATALOG_VERSION`]):
//!
//! | command          | data                                                                    |
//! |------------------|-------------------------------------------------------------------------|
//! | `ready`          | none                                                                    |
//! | `saveConnection` | `name`, `host`, `port` (0-65535), `authMethod`, `username?`, `remember?`  |
//! | `action`         | `action`, `eventData?` (string map)                                     |
//! | `submitForm`     | `formId`, `values` (string map)                                         |
//! | `openLink`       | `url`, `target?` (`internal` / `external`)                              |
//! | `log`            | `level` (`debug` / `info` / `warn` / `error`), `message`                |
//! | `cancel`         | none                                                                    |

use crate::envelope::Envelope;
use crate::error::GuardError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Bumped whenever a field is tightened or removed. Adding optional fields does
/// not change it.
pub const CATALOG_VERSION: u32 = 1;

/// Every command the host accepts.
pub const COMMANDS: &[&str] = &[
    ReadyMessage::COMMAND,
    SaveConnectionMessage::COMMAND,
    ActionMessage::COMMAND,
    SubmitFormMessage::COMMAND,
    OpenLinkMessage::COMMAND,
    LogMessage::COMMAND,
    CancelMessage::COMMAND,
];

/// Validates and narrows a raw value to one typed message.
pub trait CommandGuard: Sized {
    /// The exact `command` literal this guard accepts.
    const COMMAND: &'static str;

    /// Validate the payload of an envelope already known to carry `COMMAND`.
    fn from_data(data: Option<&Value>) -> Result<Self, GuardError>;

    /// Full pipeline: envelope, command literal, payload.
    fn narrow(value: &Value) -> Result<Self, GuardError> {
        let envelope = Envelope::from_value(value).ok_or(GuardError::NotAnEnvelope)?;
        Self::narrow_envelope(&envelope)
    }

    fn narrow_envelope(envelope: &Envelope<'_>) -> Result<Self, GuardError> {
        if envelope.command != Self::COMMAND {
            return Err(GuardError::CommandMismatch {
                expected: Self::COMMAND.to_string(),
                found: envelope.command.to_string(),
            });
        }
        Self::from_data(envelope.data)
    }

    /// Boolean view of [`CommandGuard::narrow`].
    fn matches(value: &Value) -> bool {
        Self::narrow(value).is_ok()
    }
}

/// Deserialize an object payload. No coercion: serde_json refuses a number
/// where a string is declared, a float where an integer is declared, and any
/// enum literal outside the declared set.
fn payload<T: DeserializeOwned>(command: &str, data: Option<&Value>) -> Result<T, GuardError> {
    let data = match data {
        Some(d @ Value::Object(_)) => d,
        _ => {
            return Err(GuardError::MissingData {
                command: command.to_string(),
            })
        }
    };
    T::deserialize(data).map_err(|e| GuardError::InvalidPayload {
        command: command.to_string(),
        reason: e.to_string(),
    })
}

/// Closed set of string literals. Deserializes only from a JSON string that
/// equals one literal exactly; objects, numbers, booleans and `null` are
/// rejected before the literal lookup.
macro_rules! literal_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $lit:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Accepted wire literals.
            pub const LITERALS: &'static [&'static str] = &[$($lit),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $lit),+
                }
            }

            pub fn from_literal(s: &str) -> Option<Self> {
                match s {
                    $($lit => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $name::from_literal(&s)
                    .ok_or_else(|| serde::de::Error::unknown_variant(&s, $name::LITERALS))
            }
        }
    };
}

literal_enum! {
    /// Authentication methods a saved connection may use.
    AuthMethod {
        Password => "password",
        PublicKey => "publicKey",
        Agent => "agent",
        Token => "token",
    }
}

literal_enum! {
    LinkTarget {
        Internal => "internal",
        External => "external",
    }
}

literal_enum! {
    LogLevel {
        Debug => "debug",
        Info => "info",
        Warn => "warn",
        Error => "error",
    }
}

/// The surface finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadyMessage;

impl CommandGuard for ReadyMessage {
    const COMMAND: &'static str = "ready";

    fn from_data(_data: Option<&Value>) -> Result<Self, GuardError> {
        Ok(ReadyMessage)
    }
}

/// Save a connection profile entered in a form on the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConnectionMessage {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub auth_method: AuthMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember: Option<bool>,
}

impl CommandGuard for SaveConnectionMessage {
    const COMMAND: &'static str = "saveConnection";

    fn from_data(data: Option<&Value>) -> Result<Self, GuardError> {
        payload(Self::COMMAND, data)
    }
}

/// A button with a `data-action` was clicked. `event_data` carries the
/// element's `data-*` attributes without the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMessage {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_data: Option<HashMap<String, String>>,
}

impl CommandGuard for ActionMessage {
    const COMMAND: &'static str = "action";

    fn from_data(data: Option<&Value>) -> Result<Self, GuardError> {
        payload(Self::COMMAND, data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormMessage {
    pub form_id: String,
    pub values: HashMap<String, String>,
}

impl CommandGuard for SubmitFormMessage {
    const COMMAND: &'static str = "submitForm";

    fn from_data(data: Option<&Value>) -> Result<Self, GuardError> {
        payload(Self::COMMAND, data)
    }
}

/// Request to open a link. Whether and how to open it is up to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenLinkMessage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<LinkTarget>,
}

impl CommandGuard for OpenLinkMessage {
    const COMMAND: &'static str = "openLink";

    fn from_data(data: Option<&Value>) -> Result<Self, GuardError> {
        payload(Self::COMMAND, data)
    }
}

/// Diagnostic line forwarded from the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

impl CommandGuard for LogMessage {
    const COMMAND: &'static str = "log";

    fn from_data(data: Option<&Value>) -> Result<Self, GuardError> {
        payload(Self::COMMAND, data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CancelMessage;

impl CommandGuard for CancelMessage {
    const COMMAND: &'static str = "cancel";

    fn from_data(_data: Option<&Value>) -> Result<Self, GuardError> {
        Ok(CancelMessage)
    }
}

pub fn is_ready_message(value: &Value) -> bool {
    ReadyMessage::matches(value)
}

pub fn is_save_connection_message(value: &Value) -> bool {
    SaveConnectionMessage::matches(value)
}

pub fn is_action_message(value: &Value) -> bool {
    ActionMessage::matches(value)
}

pub fn is_submit_form_message(value: &Value) -> bool {
    SubmitFormMessage::matches(value)
}

pub fn is_open_link_message(value: &Value) -> bool {
    OpenLinkMessage::matches(value)
}

pub fn is_log_message(value: &Value) -> bool {
    LogMessage::matches(value)
}

pub fn is_cancel_message(value: &Value) -> bool {
    CancelMessage::matches(value)
}
