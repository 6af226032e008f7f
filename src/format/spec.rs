use serde_json::Value;

use super::value_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// Presentation type of a placeholder, the trailing char of its spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecType {
    LowerHex,
    UpperHex,
    Octal,
    Binary,
    LowerExp,
    UpperExp,
}

/// Parsed `:spec` suffix of a placeholder.
///
/// Grammar: `[[fill]align][width][.precision][type]` where align is one of
/// `<`, `>`, `^` and type is one of `x`, `X`, `o`, `b`, `e`, `E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub spec_type: Option<SpecType>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        FormatSpec {
            fill: ' ',
            align: None,
            width: None,
            precision: None,
            spec_type: None,
        }
    }
}

/// Largest width or precision a spec may ask for
pub const MAX_COUNT: usize = u16::MAX as usize;

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        _ => None,
    }
}

impl FormatSpec {
    /// Parse the text after the `:` of a placeholder. Errors are plain
    /// messages; the tokenizer attaches the placeholder position.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let chars: Vec<char> = spec.chars().collect();
        let mut parsed = FormatSpec::default();
        let mut i = 0;

        if let Some(align) = chars.get(1).and_then(|c| align_of(*c)) {
            parsed.fill = chars[0];
            parsed.align = Some(align);
            i = 2;
        } else if let Some(align) = chars.first().and_then(|c| align_of(*c)) {
            parsed.align = Some(align);
            i = 1;
        }

        let (width, next) = Self::digits(&chars, i)?;
        parsed.width = width;
        i = next;

        if chars.get(i) == Some(&'.') {
            let (precision, next) = Self::digits(&chars, i + 1)?;
            if precision.is_none() {
                return Err(format!("missing precision digits in format spec '{}'", spec));
            }
            parsed.precision = precision;
            i = next;
        }

        if let Some(c) = chars.get(i) {
            parsed.spec_type = Some(match c {
                'x' => SpecType::LowerHex,
                'X' => SpecType::UpperHex,
                'o' => SpecType::Octal,
                'b' => SpecType::Binary,
                'e' => SpecType::LowerExp,
                'E' => SpecType::UpperExp,
                other => {
                    return Err(format!(
                        "unknown format type '{}' in format spec '{}'. Supported types: x, X, o, b, e, E",
                        other, spec
                    ))
                }
            });
            i += 1;
        }

        if let Some(c) = chars.get(i) {
            return Err(format!("unexpected '{}' in format spec '{}'", c, spec));
        }

        Ok(parsed)
    }

    fn digits(chars: &[char], start: usize) -> Result<(Option<usize>, usize), String> {
        let mut end = start;
        while chars.get(end).is_some_and(|c| c.is_ascii_digit()) {
            end += 1;
        }
        if end == start {
            return Ok((None, start));
        }
        let text: String = chars[start..end].iter().collect();
        match text.parse::<usize>() {
            Ok(n) if n <= MAX_COUNT => Ok((Some(n), end)),
            _ => Err(format!(
                "number '{}' in format spec is larger than {}",
                text, MAX_COUNT
            )),
        }
    }

    /// Format a value according to this spec.
    ///
    /// A type that does not apply to the value (hex on a string, say) is
    /// ignored and the plain text form is used instead.
    pub fn apply(&self, value: &Value) -> String {
        let body = match value {
            Value::Number(n) => match self.spec_type {
                Some(spec_type) => {
                    Self::typed_number(n, spec_type, self.precision).unwrap_or_else(|| n.to_string())
                }
                None => match (self.precision, n.as_f64()) {
                    (Some(p), Some(f)) => format!("{:.*}", p, f),
                    _ => n.to_string(),
                },
            },
            Value::String(s) => match self.precision {
                Some(p) => s.chars().take(p).collect(),
                None => s.clone(),
            },
            other => value_text(other).into_owned(),
        };

        let default_align = if value.is_number() {
            Align::Right
        } else {
            Align::Left
        };
        self.pad(body, default_align)
    }

    fn typed_number(
        n: &serde_json::Number,
        spec_type: SpecType,
        precision: Option<usize>,
    ) -> Option<String> {
        match spec_type {
            SpecType::LowerExp | SpecType::UpperExp => {
                let f = n.as_f64()?;
                let text = match precision {
                    Some(p) => format!("{:.*e}", p, f),
                    None => format!("{:e}", f),
                };
                Some(if spec_type == SpecType::UpperExp {
                    text.to_uppercase()
                } else {
                    text
                })
            }
            radix => {
                let (negative, magnitude) = if let Some(i) = n.as_i64() {
                    (i < 0, i.unsigned_abs())
                } else {
                    (false, n.as_u64()?)
                };
                let digits = match radix {
                    SpecType::LowerHex => format!("{:x}", magnitude),
                    SpecType::UpperHex => format!("{:X}", magnitude),
                    SpecType::Octal => format!("{:o}", magnitude),
                    _ => format!("{:b}", magnitude),
                };
                Some(if negative {
                    format!("-{}", digits)
                } else {
                    digits
                })
            }
        }
    }

    fn pad(&self, body: String, default_align: Align) -> String {
        let Some(width) = self.width else {
            return body;
        };
        let len = body.chars().count();
        if len >= width {
            return body;
        }

        let pad = width - len;
        let (left, right) = match self.align.unwrap_or(default_align) {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
            Align::Center => (pad / 2, pad - pad / 2),
        };

        let capacity = body.len() + pad.saturating_mul(self.fill.len_utf8());
        let mut padded = String::with_capacity(capacity);
        padded.extend(std::iter::repeat(self.fill).take(left));
        padded.push_str(&body);
        padded.extend(std::iter::repeat(self.fill).take(right));
        padded
    }
}
