//! Trusted markup fragments and the values that can be interpolated into templates.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Markup that is already safe to embed verbatim.
///
/// The payload is private. A `Fragment` comes out of [`crate::compose`], the
/// helpers built on it, or [`Fragment::mark_trusted`]. No `From<String>` or
/// `Deserialize`: text received from the surface never becomes a fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    /// Empty fragment.
    pub fn empty() -> Self {
        Fragment(String::new())
    }

    /// Mark `html` as trusted markup without escaping it.
    ///
    /// Only for markup produced by the host itself (static snippets, output of a
    /// sanitizer). Never call this on text that came from the surface or a user.
    pub fn mark_trusted(html: impl Into<String>) -> Self {
        Fragment(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A runtime value placed in a template slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpolation {
    /// Renders nothing.
    Absent,
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    /// Embedded verbatim.
    Fragment(Fragment),
    /// Each element resolved in turn and concatenated with no separator.
    Sequence(Vec<Interpolation>),
}

impl Interpolation {
    /// True when this slot holds trusted markup and will not be escaped.
    pub fn is_fragment(&self) -> bool {
        matches!(self, Interpolation::Fragment(_))
    }

    /// Plain-text form of a scalar. `None` for the variants the composer
    /// handles structurally (absent, fragments, sequences).
    pub(crate) fn scalar_text(&self) -> Option<String> {
        match self {
            Interpolation::Text(s) => Some(s.clone()),
            Interpolation::Integer(n) => Some(n.to_string()),
            Interpolation::Unsigned(n) => Some(n.to_string()),
            Interpolation::Float(n) => Some(n.to_string()),
            Interpolation::Bool(b) => Some(b.to_string()),
            Interpolation::Absent | Interpolation::Fragment(_) | Interpolation::Sequence(_) => None,
        }
    }
}

impl From<&str> for Interpolation {
    fn from(s: &str) -> Self {
        Interpolation::Text(s.to_string())
    }
}

impl From<String> for Interpolation {
    fn from(s: String) -> Self {
        Interpolation::Text(s)
    }
}

impl From<&String> for Interpolation {
    fn from(s: &String) -> Self {
        Interpolation::Text(s.clone())
    }
}

impl From<char> for Interpolation {
    fn from(c: char) -> Self {
        Interpolation::Text(c.to_string())
    }
}

macro_rules! interpolation_from_int {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Interpolation {
                fn from(n: $t) -> Self {
                    Interpolation::$variant(n as $target)
                }
            }
        )*
    };
}

interpolation_from_int!(Integer as i64: i8, i16, i32, i64, isize);
interpolation_from_int!(Unsigned as u64: u8, u16, u32, u64, usize);

impl From<f32> for Interpolation {
    fn from(n: f32) -> Self {
        Interpolation::Float(n as f64)
    }
}

impl From<f64> for Interpolation {
    fn from(n: f64) -> Self {
        Interpolation::Float(n)
    }
}

impl From<bool> for Interpolation {
    fn from(b: bool) -> Self {
        Interpolation::Bool(b)
    }
}

impl From<Fragment> for Interpolation {
    fn from(f: Fragment) -> Self {
        Interpolation::Fragment(f)
    }
}

impl From<&Fragment> for Interpolation {
    fn from(f: &Fragment) -> Self {
        Interpolation::Fragment(f.clone())
    }
}

impl<T: Into<Interpolation>> From<Option<T>> for Interpolation {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Interpolation::Absent)
    }
}

impl<T: Into<Interpolation>> From<Vec<T>> for Interpolation {
    fn from(items: Vec<T>) -> Self {
        Interpolation::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// JSON values are always untrusted: an object that happens to look like a
/// serialized fragment is rendered as escaped JSON text, never verbatim.
impl From<&Value> for Interpolation {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => Interpolation::Absent,
            Value::Bool(b) => Interpolation::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Interpolation::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Interpolation::Unsigned(u)
                } else {
                    Interpolation::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Interpolation::Text(s.clone()),
            Value::Array(items) => {
                Interpolation::Sequence(items.iter().map(Interpolation::from).collect())
            }
            Value::Object(_) => Interpolation::Text(v.to_string()),
        }
    }
}

impl From<Value> for Interpolation {
    fn from(v: Value) -> Self {
        Interpolation::from(&v)
    }
}
