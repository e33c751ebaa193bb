//! Printf-style cell format templates.
//!
//! A template holds literal text and at most one value directive:
//!
//! | Directive | Renders |
//! |-----------|---------|
//! | `%s` | plain text of the value (precision truncates) |
//! | `%d` | integer view of the value |
//! | `%f` | fixed-point view, 6 decimals unless a precision is given |
//! | `%e` | scientific view, exponent with sign and at least two digits |
//! | `%%` | a literal percent sign |
//!
//! Directives accept the flags `-` (left align), `0` (zero pad) and `+`
//! (explicit sign), then an optional width and `.precision`.

use std::fmt;

use tracing::debug;

use crate::cell::CellValue;
use crate::error::{ModelError, Result};

/// A validated format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFormat {
    template: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Value(Directive),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Directive {
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: Conversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Conversion {
    #[default]
    Text,
    Integer,
    Fixed,
    Scientific,
}

impl CellFormat {
    /// Parse and validate a template.
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();
        let mut directives = 0usize;

        while let Some(ch) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }

            let mut directive = Directive::default();
            while let Some(&flag) = chars.peek() {
                match flag {
                    '-' => directive.left_align = true,
                    '0' => directive.zero_pad = true,
                    '+' => directive.plus_sign = true,
                    _ => break,
                }
                chars.next();
            }
            directive.width = take_number(&mut chars);
            if chars.peek() == Some(&'.') {
                chars.next();
                directive.precision = take_number(&mut chars);
                if directive.precision.is_none() {
                    return Err(ModelError::invalid_format(
                        template,
                        "precision must follow '.'",
                    ));
                }
            }
            directive.conversion = match chars.next() {
                Some('s') => Conversion::Text,
                Some('d') => Conversion::Integer,
                Some('f') => Conversion::Fixed,
                Some('e') => Conversion::Scientific,
                Some(other) => {
                    return Err(ModelError::invalid_format(
                        template,
                        format!("unknown conversion '{other}'"),
                    ));
                }
                None => {
                    return Err(ModelError::invalid_format(
                        template,
                        "dangling '%' at end of template",
                    ));
                }
            };
            if directive.conversion == Conversion::Integer && directive.precision.is_some() {
                return Err(ModelError::invalid_format(
                    template,
                    "precision is not allowed for %d",
                ));
            }

            directives += 1;
            if directives > 1 {
                return Err(ModelError::invalid_format(
                    template,
                    "a template formats exactly one value",
                ));
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Value(directive));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The template this format was parsed from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render a value through the template.
    pub fn render<V: CellValue>(&self, value: &V) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Value(directive) => out.push_str(&directive.render(value)),
            }
        }
        out
    }
}

impl fmt::Display for CellFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(&ch) = chars.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        digits.push(ch);
        chars.next();
    }
    digits.parse().ok()
}

impl Directive {
    fn render<V: CellValue>(&self, value: &V) -> String {
        let numeric = match self.conversion {
            Conversion::Text => None,
            Conversion::Integer => value.as_i64().map(|n| n.to_string()),
            Conversion::Fixed => value
                .as_f64()
                .map(|x| format!("{:.*}", self.precision.unwrap_or(6), x)),
            Conversion::Scientific => value
                .as_f64()
                .map(|x| scientific(x, self.precision.unwrap_or(6))),
        };

        match numeric {
            Some(body) => self.pad_number(body),
            None => {
                if self.conversion != Conversion::Text {
                    debug!(
                        value_type = V::TYPE_NAME,
                        "value has no numeric view, rendering as text"
                    );
                }
                let mut text = value.to_text();
                if self.conversion == Conversion::Text
                    && let Some(precision) = self.precision
                {
                    text = text.chars().take(precision).collect();
                }
                self.pad(text)
            }
        }
    }

    fn pad_number(&self, body: String) -> String {
        let (sign, digits) = match body.strip_prefix('-') {
            Some(rest) => ("-", rest.to_string()),
            None if self.plus_sign => ("+", body),
            None => ("", body),
        };
        if self.zero_pad && !self.left_align {
            let width = self.width.unwrap_or(0);
            let used = sign.len() + digits.chars().count();
            let zeros = "0".repeat(width.saturating_sub(used));
            return format!("{sign}{zeros}{digits}");
        }
        self.pad(format!("{sign}{digits}"))
    }

    fn pad(&self, text: String) -> String {
        let width = self.width.unwrap_or(0);
        let len = text.chars().count();
        if len >= width {
            return text;
        }
        let padding: String = std::iter::repeat_n(' ', width - len).collect();
        if self.left_align {
            text + &padding
        } else {
            padding + &text
        }
    }
}

/// Scientific notation with a signed, two-digit minimum exponent (`1.50e+03`).
fn scientific(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => raw,
    }
}
