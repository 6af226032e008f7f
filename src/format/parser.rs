use std::borrow::Cow;

use super::spec::FormatSpec;
use super::{FormatToken, PropertyKey, PropertyToken};
use crate::error::LogError;

/// Lazy token stream over a template.
///
/// A clone continues from the same position; call [`super::parse`] again to
/// start over. The stream is fused after the first error.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    template: &'a str,
    pos: usize,
    named_seen: usize,
    failed: bool,
}

impl<'a> Tokens<'a> {
    pub(super) fn new(template: &'a str) -> Self {
        Tokens {
            template,
            pos: 0,
            named_seen: 0,
            failed: false,
        }
    }

    /// Literal text up to the next unescaped `{`, with `{{`/`}}` collapsed.
    /// Borrows from the template unless an escape had to be removed.
    fn literal(&mut self) -> Cow<'a, str> {
        let bytes = self.template.as_bytes();
        let start = self.pos;
        let mut span_start = start;
        let mut owned: Option<String> = None;
        let mut i = start;

        while i < bytes.len() {
            match bytes[i] {
                b'{' | b'}' if bytes.get(i + 1) == Some(&bytes[i]) => {
                    // keep one brace of the pair
                    owned
                        .get_or_insert_with(String::new)
                        .push_str(&self.template[span_start..=i]);
                    i += 2;
                    span_start = i;
                }
                b'{' => break,
                _ => i += 1,
            }
        }
        self.pos = i;

        match owned {
            None => Cow::Borrowed(&self.template[start..i]),
            Some(mut text) => {
                text.push_str(&self.template[span_start..i]);
                Cow::Owned(text)
            }
        }
    }

    fn property(&mut self) -> Result<PropertyToken<'a>, LogError> {
        let bytes = self.template.as_bytes();
        let open = self.pos;
        let mut close = open + 1;

        loop {
            match bytes.get(close) {
                Some(b'}') => break,
                Some(b'{') => {
                    return Err(LogError::format(
                        open,
                        "placeholder is not closed before the next '{'",
                    ))
                }
                Some(_) => close += 1,
                None => return Err(LogError::format(open, "unclosed placeholder")),
            }
        }

        let inner = &self.template[open + 1..close];
        self.pos = close + 1;

        let (key_text, spec_text) = match inner.split_once(':') {
            Some((key, spec)) => (key, Some(spec)),
            None => (inner, None),
        };

        let key = self.parse_key(open, key_text)?;
        let spec = spec_text
            .map(FormatSpec::parse)
            .transpose()
            .map_err(|message| LogError::format(open, message))?;

        Ok(PropertyToken {
            key,
            spec,
            raw: &self.template[open..=close],
            position: open,
        })
    }

    fn parse_key(&mut self, position: usize, key: &'a str) -> Result<PropertyKey<'a>, LogError> {
        if key.is_empty() {
            return Err(LogError::format(position, "empty placeholder"));
        }

        if key.bytes().all(|b| b.is_ascii_digit()) {
            return key
                .parse::<usize>()
                .map(PropertyKey::Index)
                .map_err(|_| LogError::format(position, format!("index '{}' is too large", key)));
        }

        let mut chars = key.chars();
        let valid = chars
            .next()
            .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(LogError::format(
                position,
                format!("invalid placeholder name '{}'", key),
            ));
        }

        let ordinal = self.named_seen;
        self.named_seen += 1;
        Ok(PropertyKey::Name { name: key, ordinal })
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<FormatToken<'a>, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.template.len() {
            return None;
        }

        let rest = &self.template.as_bytes()[self.pos..];
        if rest[0] == b'{' && rest.get(1) != Some(&b'{') {
            let token = self.property();
            if token.is_err() {
                self.failed = true;
            }
            return Some(token.map(FormatToken::Property));
        }

        Some(Ok(FormatToken::Literal(self.literal())))
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    fn collect(template: &str) -> Vec<FormatToken<'_>> {
        parse(template).collect::<Result<Vec<_>, _>>().unwrap()
    }

    fn error_position(template: &str) -> usize {
        match parse(template).find_map(Result::err) {
            Some(LogError::Format { position, .. }) => position,
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_template_has_no_tokens() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_literal_only() {
        let tokens = collect("Build succeeded");
        assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            FormatToken::Literal(Cow::Borrowed(text)) => assert_eq!(*text, "Build succeeded"),
            other => panic!("expected borrowed literal, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_property_literal() {
        let tokens = collect("Build {0} succeeded");
        assert_eq!(tokens.len(), 3);
        assert!(matches!(&tokens[0], FormatToken::Literal(t) if t == "Build "));
        match &tokens[1] {
            FormatToken::Property(p) => {
                assert_eq!(p.key, PropertyKey::Index(0));
                assert_eq!(p.raw, "{0}");
                assert_eq!(p.position, 6);
                assert!(p.spec.is_none());
            }
            other => panic!("expected property, got {:?}", other),
        }
        assert!(matches!(&tokens[2], FormatToken::Literal(t) if t == " succeeded"));
    }

    #[test]
    fn test_escaped_braces_collapse_into_one_literal() {
        let tokens = collect("a {{b}} c");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(&tokens[0], FormatToken::Literal(Cow::Owned(t)) if t == "a {b} c"));
    }

    #[test]
    fn test_escape_directly_before_property() {
        let tokens = collect("{{{0}}}");
        assert_eq!(tokens.len(), 3);
        assert!(matches!(&tokens[0], FormatToken::Literal(t) if t == "{"));
        assert!(matches!(&tokens[1], FormatToken::Property(_)));
        assert!(matches!(&tokens[2], FormatToken::Literal(t) if t == "}"));
    }

    #[test]
    fn test_lone_closing_brace_is_literal() {
        let tokens = collect("a } b");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(&tokens[0], FormatToken::Literal(t) if t == "a } b"));
    }

    #[test]
    fn test_named_placeholders_take_ordinals() {
        let tokens = collect("{first} {1} {second:>4}");
        let keys: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t {
                FormatToken::Property(p) => Some(p.key.clone()),
                FormatToken::Literal(_) => None,
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                PropertyKey::Name { name: "first", ordinal: 0 },
                PropertyKey::Index(1),
                PropertyKey::Name { name: "second", ordinal: 1 },
            ]
        );
    }

    #[test]
    fn test_unclosed_placeholder_reports_position() {
        assert_eq!(error_position("abc {0"), 4);
        assert_eq!(error_position("x {0 {1}"), 2);
    }

    #[test]
    fn test_bad_keys_fail() {
        assert_eq!(error_position("{}"), 0);
        assert_eq!(error_position("ok {1x}"), 3);
        assert_eq!(error_position("{a-b}"), 0);
        assert_eq!(error_position("{0:zz}"), 0);
    }

    #[test]
    fn test_stream_is_fused_after_error() {
        let mut tokens = parse("a {0 b");
        assert!(matches!(tokens.next(), Some(Ok(FormatToken::Literal(_)))));
        assert!(matches!(tokens.next(), Some(Err(_))));
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let tokens = collect("größe {{ü}} {0} ✓");
        assert!(matches!(&tokens[0], FormatToken::Literal(t) if t == "größe {ü} "));
        assert!(matches!(&tokens[2], FormatToken::Literal(t) if t == " ✓"));
    }
}
