//! Parameter trees and their bracket-notation form encoding.
//!
//! # Design
//! `ParamValue` is a tagged tree (scalar / sequence / mapping); mappings are
//! insertion-ordered `Vec<(String, ParamValue)>` pairs so serialization output
//! is deterministic for a given construction order. `serialize` renders the
//! tree with the bracket convention (`a[b][c]=v`, `a[]=v1&a[]=v2`) used for
//! query strings and form bodies alike.
//!
//! Values are joined literally, without percent-encoding. A value containing
//! `&` or `=` will corrupt the encoded string; callers who need those
//! characters must encode them beforehand.

use chrono::{Datelike, NaiveDate};

use crate::error::Error;

/// Nesting cap for `serialize`. A tree deeper than this fails with
/// [`Error::Serialization`] instead of exhausting the stack.
const MAX_DEPTH: usize = 64;

/// A single node of a parameter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Calendar date, rendered as `{year}-{month}-{day}` with no zero padding.
    Date(NaiveDate),
    Seq(Vec<ParamValue>),
    Map(Vec<(String, ParamValue)>),
}

impl ParamValue {
    /// Build a mapping node from key/value pairs, preserving order.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ParamValue)>,
    {
        ParamValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a sequence node.
    pub fn seq<V, I>(items: I) -> Self
    where
        V: Into<ParamValue>,
        I: IntoIterator<Item = V>,
    {
        ParamValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        ParamValue::Date(value)
    }
}

/// Top-level query/form parameters: an insertion-ordered mapping from key to
/// [`ParamValue`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    pub fn new() -> Self {
        Params(Vec::new())
    }

    /// Set a key, replacing any existing entry with the same key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Render a parameter tree as a bracket-notation encoded string.
///
/// An empty `Params` yields an empty string. Key order follows insertion
/// order at every level.
pub fn serialize(params: &Params) -> Result<String, Error> {
    let mut pairs = Vec::new();
    for (key, value) in params.iter() {
        encode_value(key, value, 0, &mut pairs)?;
    }
    Ok(pairs.join("&"))
}

fn encode_value(
    key: &str,
    value: &ParamValue,
    depth: usize,
    out: &mut Vec<String>,
) -> Result<(), Error> {
    if depth > MAX_DEPTH {
        return Err(Error::Serialization(format!(
            "parameter tree under key `{key}` exceeds {MAX_DEPTH} levels"
        )));
    }
    match value {
        ParamValue::Seq(items) => {
            let key = format!("{key}[]");
            for item in items {
                encode_value(&key, item, depth + 1, out)?;
            }
        }
        ParamValue::Map(entries) => {
            for (child, item) in entries {
                encode_value(&format!("{key}[{child}]"), item, depth + 1, out)?;
            }
        }
        ParamValue::Null => out.push(format!("{key}=null")),
        ParamValue::Bool(b) => out.push(format!("{key}={b}")),
        ParamValue::Int(n) => out.push(format!("{key}={n}")),
        ParamValue::Float(x) => out.push(format!("{key}={x}")),
        ParamValue::Str(s) => out.push(format!("{key}={s}")),
        ParamValue::Date(d) => {
            out.push(format!("{key}={}-{}-{}", d.year(), d.month(), d.day()));
        }
    }
    Ok(())
}
