//! Template composition: literal segments interleaved with escaped values.
//!
//! A template is a list of literal segments and one fewer interpolated values.
//! Every value is escaped unless it is already a [`Fragment`], and the result is
//! itself a `Fragment`, so templates nest without double escaping:
//!
//! ```ignore
//! use nulltrace_bridge::markup;
//!
//! let items = vec!["<one>", "two"];
//! let list = markup!(
//!     "<ul>{}</ul>",
//!     items.iter().map(|i| markup!("<li>{}</li>", *i)).collect::<Vec<_>>()
//! );
//! assert_eq!(list.as_str(), "<ul><li>&lt;one&gt;</li><li>two</li></ul>");
//! ```

use crate::error::{BridgeError, BridgeResult};
use crate::escape::escape;
use crate::fragment::{Fragment, Interpolation};

/// Compose `segments` and `values` into a fragment.
///
/// `segments` must hold exactly `values.len() + 1` entries; anything else is a
/// caller bug and returns [`BridgeError::TemplateArity`]. Values never cause an
/// error.
pub fn compose(segments: &[&str], values: &[Interpolation]) -> BridgeResult<Fragment> {
    if segments.len() != values.len() + 1 {
        return Err(BridgeError::TemplateArity {
            segments: segments.len(),
            values: values.len(),
        });
    }

    let mut out = String::with_capacity(segments.iter().map(|s| s.len()).sum());
    out.push_str(segments[0]);
    for (value, segment) in values.iter().zip(&segments[1..]) {
        resolve_into(value, &mut out);
        out.push_str(segment);
    }
    Ok(Fragment::mark_trusted(out))
}

/// Split a format-style template at its `{}` slots and compose it.
///
/// `{{` and `}}` stand for literal braces, as in `format!`.
pub fn compose_template(template: &str, values: &[Interpolation]) -> BridgeResult<Fragment> {
    let segments = split_template(template);
    let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
    compose(&refs, values)
}

/// Resolve one slot. Fragments are checked before sequences, and sequences
/// recurse through the same rules.
fn resolve_into(value: &Interpolation, out: &mut String) {
    match value {
        Interpolation::Absent => {}
        Interpolation::Fragment(f) => out.push_str(f.as_str()),
        Interpolation::Sequence(items) => {
            for item in items {
                resolve_into(item, out);
            }
        }
        scalar => {
            if let Some(text) = scalar.scalar_text() {
                out.push_str(&escape(&text));
            }
        }
    }
}

/// Split `template` at `{}` slots. Always returns at least one segment.
pub fn split_template(template: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('}')) => {
                chars.next();
                segments.push(std::mem::take(&mut current));
            }
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
                current.push(c);
            }
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments
}

/// Build a [`Fragment`] from a `{}` template and values, escaping every value
/// that is not itself a fragment.
///
/// # Panics
///
/// Panics when the number of `{}` slots differs from the number of values. That
/// is a mistake in the calling code, like a wrong argument count to `format!`.
#[macro_export]
macro_rules! markup {
    ($template:expr $(,)?) => {
        match $crate::template::compose_template($template, &[]) {
            Ok(fragment) => fragment,
            Err(e) => panic!("markup!: {}", e),
        }
    };
    ($template:expr, $($value:expr),+ $(,)?) => {
        match $crate::template::compose_template(
            $template,
            &[$($crate::fragment::Interpolation::from($value)),+],
        ) {
            Ok(fragment) => fragment,
            Err(e) => panic!("markup!: {}", e),
        }
    };
}
