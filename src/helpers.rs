//! Small composition helpers on top of the template composer.

use crate::escape::escape;
use crate::fragment::Fragment;
use regex::Regex;
use std::sync::OnceLock;

/// Concatenate already-trusted fragments. No items gives an empty fragment.
pub fn join_fragments<I>(fragments: I) -> Fragment
where
    I: IntoIterator<Item = Fragment>,
{
    let mut out = String::new();
    for f in fragments {
        out.push_str(f.as_str());
    }
    Fragment::mark_trusted(out)
}

/// `fragment` when `condition` holds, otherwise an empty fragment.
pub fn render_if(condition: bool, fragment: Fragment) -> Fragment {
    if condition {
        fragment
    } else {
        Fragment::empty()
    }
}

/// Like [`render_if`] but only builds the fragment when it is needed.
pub fn render_if_with<F>(condition: bool, build: F) -> Fragment
where
    F: FnOnce() -> Fragment,
{
    if condition {
        build()
    } else {
        Fragment::empty()
    }
}

/// Value of one attribute in [`render_attributes`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Absent,
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        AttrValue::Text(s.clone())
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Integer(n as i64)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Integer(n)
    }
}

impl From<u32> for AttrValue {
    fn from(n: u32) -> Self {
        AttrValue::Integer(n as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Float(n)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(AttrValue::Absent)
    }
}

fn attribute_name_regex() -> &'static Regex {
    static ATTR_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTR_NAME_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z_:][A-Za-z0-9_:.\-]*$").unwrap())
}

/// Whether `name` can be written as an attribute name without escaping.
pub fn is_valid_attribute_name(name: &str) -> bool {
    attribute_name_regex().is_match(name)
}

/// Render attributes as `name="value"` pairs separated by single spaces.
///
/// - `false` and absent values are left out entirely
/// - `true` renders the bare name
/// - anything else renders `name="escaped value"`
///
/// Names are not escaped, so names that are not valid markup names are dropped
/// with a warning. Output follows the iteration order of `attrs`.
pub fn render_attributes<I, K, V>(attrs: I) -> Fragment
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<AttrValue>,
{
    let mut parts: Vec<String> = Vec::new();
    for (name, value) in attrs {
        let name = name.as_ref();
        let rendered = match value.into() {
            AttrValue::Absent | AttrValue::Bool(false) => continue,
            AttrValue::Bool(true) => None,
            AttrValue::Text(s) => Some(escape(&s)),
            AttrValue::Integer(n) => Some(n.to_string()),
            AttrValue::Float(n) => Some(escape(&n.to_string())),
        };
        if !is_valid_attribute_name(name) {
            tracing::warn!(attribute = name, "dropping attribute with invalid name");
            continue;
        }
        match rendered {
            None => parts.push(name.to_string()),
            Some(v) => parts.push(format!("{}=\"{}\"", name, v)),
        }
    }
    Fragment::mark_trusted(parts.join(" "))
}
