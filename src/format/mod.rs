//! Message templates: `"Build {0} took {1:.2}s"`.
//!
//! A template is split into literal text and property placeholders. `{{` and
//! `}}` stand for literal braces. A placeholder holds an argument index or a
//! name, optionally followed by a `:spec` (see [`spec::FormatSpec`]). Named
//! placeholders bind to arguments by their order of appearance among the
//! named placeholders of the template.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::LogError;

pub mod parser;
pub mod spec;

pub use parser::Tokens;
pub use spec::FormatSpec;

/// Where a placeholder reads its argument from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey<'a> {
    Index(usize),
    Name { name: &'a str, ordinal: usize },
}

impl PropertyKey<'_> {
    pub fn argument_index(&self) -> usize {
        match self {
            PropertyKey::Index(index) => *index,
            PropertyKey::Name { ordinal, .. } => *ordinal,
        }
    }
}

impl std::fmt::Display for PropertyKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKey::Index(index) => write!(f, "{}", index),
            PropertyKey::Name { name, .. } => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyToken<'a> {
    pub key: PropertyKey<'a>,
    pub spec: Option<FormatSpec>,
    /// The placeholder as written, braces included
    pub raw: &'a str,
    /// Byte offset of the opening brace
    pub position: usize,
}

impl PropertyToken<'_> {
    pub fn render<'s>(&self, args: &'s [Value]) -> Result<Cow<'s, str>, LogError> {
        let arg = args
            .get(self.key.argument_index())
            .ok_or_else(|| LogError::ArgumentMissing {
                position: self.position,
                key: self.key.to_string(),
                supplied: args.len(),
            })?;

        Ok(match &self.spec {
            None => value_text(arg),
            Some(spec) => Cow::Owned(spec.apply(arg)),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormatToken<'a> {
    Literal(Cow<'a, str>),
    Property(PropertyToken<'a>),
}

impl<'a> FormatToken<'a> {
    pub fn is_property(&self) -> bool {
        matches!(self, FormatToken::Property(_))
    }

    /// Text of this token for the given arguments
    pub fn render<'s>(&'s self, args: &'s [Value]) -> Result<Cow<'s, str>, LogError> {
        match self {
            FormatToken::Literal(text) => Ok(Cow::Borrowed(text.as_ref())),
            FormatToken::Property(property) => property.render(args),
        }
    }
}

/// Tokenize a template. Nothing is parsed until the iterator is advanced.
pub fn parse(template: &str) -> Tokens<'_> {
    Tokens::new(template)
}

/// Parse and render a whole template into one string
pub fn render(template: &str, args: &[Value]) -> Result<String, LogError> {
    let mut out = String::with_capacity(template.len());
    for token in parse(template) {
        out.push_str(&token?.render(args)?);
    }
    Ok(out)
}

/// Turn arbitrary text into a template that renders back to the same text.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['{', '}']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace('{', "{{").replace('}', "}}"))
}

/// Plain text form of an argument: strings unquoted, null empty, arrays and
/// objects as compact JSON.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}
