//! # NullTrace surface bridge
//!
//! The safety layer between the client (trusted host) and the sandboxed page
//! surface it renders into an iframe.
//!
//! ## Features
//! - Markup escaping and a trusted [`Fragment`] type that is never re-escaped
//! - `markup!` templates that escape every interpolated value and nest safely
//! - Helpers for joining fragments, conditional markup and attribute lists
//! - A document shell with a restrictive Content-Security-Policy
//! - Guards that narrow messages posted by the surface to typed commands
//! - A dispatcher over the closed set of commands
//!
//! ## Example: building markup
//! ```ignore
//! use nulltrace_bridge::{markup, render_attributes, render_document, DocumentConfig};
//!
//! let name = "<img src=x onerror=alert(1)>";
//! let body = markup!(
//!     "<button {}>Hello {}</button>",
//!     render_attributes(vec![("data-action", "greet")]),
//!     name,
//! );
//! let html = render_document(&DocumentConfig::default(), body);
//! ```
//!
//! ## Example: handling a message
//! ```ignore
//! use nulltrace_bridge::{dispatch_text, Dispatch};
//!
//! match dispatch_text(raw_json, &mut handler) {
//!     Dispatch::Handled(command) => { /* handler ran */ }
//!     Dispatch::Rejected(reason) => { /* malformed, nothing ran */ }
//!     Dispatch::Unknown(command) => { /* no handler for this command */ }
//! }
//! ```

pub mod dispatch;
pub mod document;
pub mod envelope;
pub mod error;
pub mod escape;
pub mod fragment;
pub mod helpers;
pub mod messages;
pub mod template;

// --- Markup ---
pub use document::{render_document, DocumentConfig, DEFAULT_CONTENT_SECURITY_POLICY};
pub use escape::{escape, escape_opt};
pub use fragment::{Fragment, Interpolation};
pub use helpers::{
    is_valid_attribute_name, join_fragments, render_attributes, render_if, render_if_with,
    AttrValue,
};
pub use template::{compose, compose_template};

// --- Messages ---
pub use dispatch::{dispatch, dispatch_text, parse_message, Dispatch, SurfaceHandler, SurfaceMessage};
pub use envelope::{is_envelope, Envelope};
pub use error::{BridgeError, BridgeResult, GuardError};
pub use messages::{
    is_action_message, is_cancel_message, is_log_message, is_open_link_message,
    is_ready_message, is_save_connection_message, is_submit_form_message, ActionMessage,
    AuthMethod, CancelMessage, CommandGuard, LinkTarget, LogLevel, LogMessage, OpenLinkMessage,
    ReadyMessage, SaveConnectionMessage, SubmitFormMessage, CATALOG_VERSION, COMMANDS,
};

/// Validate and narrow a raw message to one of the known commands.
pub fn narrow_message(value: &serde_json::Value) -> Result<SurfaceMessage, GuardError> {
    SurfaceMessage::from_value(value)
}
