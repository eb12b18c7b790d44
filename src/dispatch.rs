//! Routes guarded surface messages to host handlers.

use crate::envelope::Envelope;
use crate::error::{BridgeResult, GuardError};
use crate::messages::*;
use serde_json::Value;

/// Every message the surface can send, after validation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceMessage {
    Ready(ReadyMessage),
    SaveConnection(SaveConnectionMessage),
    Action(ActionMessage),
    SubmitForm(SubmitFormMessage),
    OpenLink(OpenLinkMessage),
    Log(LogMessage),
    Cancel(CancelMessage),
}

impl SurfaceMessage {
    /// Pick the guard named by the envelope's command and run it.
    pub fn from_value(value: &Value) -> Result<Self, GuardError> {
        let envelope = Envelope::from_value(value).ok_or(GuardError::NotAnEnvelope)?;
        let message = match envelope.command {
            ReadyMessage::COMMAND => {
                SurfaceMessage::Ready(ReadyMessage::narrow_envelope(&envelope)?)
            }
            SaveConnectionMessage::COMMAND => {
                SurfaceMessage::SaveConnection(SaveConnectionMessage::narrow_envelope(&envelope)?)
            }
            ActionMessage::COMMAND => {
                SurfaceMessage::Action(ActionMessage::narrow_envelope(&envelope)?)
            }
            SubmitFormMessage::COMMAND => {
                SurfaceMessage::SubmitForm(SubmitFormMessage::narrow_envelope(&envelope)?)
            }
            OpenLinkMessage::COMMAND => {
                SurfaceMessage::OpenLink(OpenLinkMessage::narrow_envelope(&envelope)?)
            }
            LogMessage::COMMAND => SurfaceMessage::Log(LogMessage::narrow_envelope(&envelope)?),
            CancelMessage::COMMAND => {
                SurfaceMessage::Cancel(CancelMessage::narrow_envelope(&envelope)?)
            }
            other => {
                return Err(GuardError::UnknownCommand {
                    command: other.to_string(),
                })
            }
        };
        Ok(message)
    }

    pub fn command(&self) -> &'static str {
        match self {
            SurfaceMessage::Ready(_) => ReadyMessage::COMMAND,
            SurfaceMessage::SaveConnection(_) => SaveConnectionMessage::COMMAND,
            SurfaceMessage::Action(_) => ActionMessage::COMMAND,
            SurfaceMessage::SubmitForm(_) => SubmitFormMessage::COMMAND,
            SurfaceMessage::OpenLink(_) => OpenLinkMessage::COMMAND,
            SurfaceMessage::Log(_) => LogMessage::COMMAND,
            SurfaceMessage::Cancel(_) => CancelMessage::COMMAND,
        }
    }
}

/// Parse message text received from the surface.
pub fn parse_message(raw: &str) -> BridgeResult<Value> {
    Ok(serde_json::from_str(raw)?)
}

/// Host-side handlers, one per command. Only called with validated payloads.
pub trait SurfaceHandler {
    fn on_ready(&mut self) {}

    fn on_save_connection(&mut self, message: SaveConnectionMessage);

    fn on_action(&mut self, message: ActionMessage);

    fn on_submit_form(&mut self, message: SubmitFormMessage);

    fn on_open_link(&mut self, message: OpenLinkMessage);

    fn on_log(&mut self, message: LogMessage) {
        match message.level {
            LogLevel::Debug => tracing::debug!(target: "surface", "{}", message.message),
            LogLevel::Info => tracing::info!(target: "surface", "{}", message.message),
            LogLevel::Warn => tracing::warn!(target: "surface", "{}", message.message),
            LogLevel::Error => tracing::error!(target: "surface", "{}", message.message),
        }
    }

    fn on_cancel(&mut self) {}
}

/// What [`dispatch`] did with a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The handler for this command ran.
    Handled(&'static str),
    /// Known command (or no envelope at all), invalid shape. No handler ran.
    Rejected(GuardError),
    /// Well-formed envelope naming a command nobody handles. No handler ran.
    Unknown(String),
}

/// Validate `value` and hand it to exactly one handler method.
pub fn dispatch<H: SurfaceHandler + ?Sized>(value: &Value, handler: &mut H) -> Dispatch {
    let message = match SurfaceMessage::from_value(value) {
        Ok(message) => message,
        Err(GuardError::UnknownCommand { command }) => {
            tracing::debug!(command = %command, "dropping message with unknown command");
            return Dispatch::Unknown(command);
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected surface message");
            return Dispatch::Rejected(e);
        }
    };

    let command = message.command();
    match message {
        SurfaceMessage::Ready(_) => handler.on_ready(),
        SurfaceMessage::SaveConnection(m) => handler.on_save_connection(m),
        SurfaceMessage::Action(m) => handler.on_action(m),
        SurfaceMessage::SubmitForm(m) => handler.on_submit_form(m),
        SurfaceMessage::OpenLink(m) => handler.on_open_link(m),
        SurfaceMessage::Log(m) => handler.on_log(m),
        SurfaceMessage::Cancel(_) => handler.on_cancel(),
    }
    Dispatch::Handled(command)
}

/// Parse raw text and dispatch it. Text that is not JSON is rejected as a
/// non-envelope.
pub fn dispatch_text<H: SurfaceHandler + ?Sized>(raw: &str, handler: &mut H) -> Dispatch {
    match parse_message(raw) {
        Ok(value) => dispatch(&value, handler),
        Err(e) => {
            tracing::debug!(error = %e, "surface message is not valid JSON");
            Dispatch::Rejected(GuardError::NotAnEnvelope)
        }
    }
}
