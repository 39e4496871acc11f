//! Print templates for quantities
//!
//! A template is a small printf-like string with exactly two arguments:
//! the value (`[1]`) and the unit symbol (`[2]`). Supported directives:
//!
//! - `%f` fixed point, `%.4f` with precision (default precision 6)
//! - `%e` scientific with a signed two digit exponent (`1.500000e+03`)
//! - `%g`, `%v` shortest representation
//! - `%s` the symbol (or the value in shortest form), `%.2s` truncates
//! - `%[2]s %.2[1]f` explicit argument indexes, which also allow swapping
//! - `%%` a literal percent sign
//!
//! Without an index, directives consume the arguments in order; after an
//! explicit index the next directive continues with the following argument.

use std::fmt;
use std::str::FromStr;
use std::sync::{LazyLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::UnitError;

/// The default template: value with four decimals, a space, the symbol
pub const DEFAULT_FORMAT: &str = "%.4f %s";

static DEFAULT_TEMPLATE: LazyLock<RwLock<Template>> =
    LazyLock::new(|| RwLock::new(Template::standard()));

/// Which of the two template arguments a directive prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arg {
    Value,
    Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Fixed,
    Exponent,
    Shortest,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Literal(String),
    Directive {
        arg: Arg,
        precision: Option<usize>,
        verb: Verb,
    },
}

/// A parsed print template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

impl Template {
    /// Parse a template string
    pub fn parse(source: &str) -> Result<Self, UnitError> {
        let invalid = |why: &str| UnitError::InvalidTemplate(format!("{}: {}", source, why));

        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut next_arg = 1usize;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }

            let mut index = None;
            let mut precision = None;

            if chars.peek() == Some(&'[') {
                index = Some(parse_index(&mut chars).ok_or_else(|| invalid("bad argument index"))?);
            }
            if chars.peek() == Some(&'.') {
                chars.next();
                precision = Some(take_digits(&mut chars).unwrap_or(0));
            }
            if index.is_none() && chars.peek() == Some(&'[') {
                index = Some(parse_index(&mut chars).ok_or_else(|| invalid("bad argument index"))?);
            }

            let verb = match chars.next() {
                Some('f') | Some('F') => Verb::Fixed,
                Some('e') => Verb::Exponent,
                Some('g') | Some('v') => Verb::Shortest,
                Some('s') => Verb::Text,
                Some(other) => return Err(invalid(&format!("unsupported verb '{}'", other))),
                None => return Err(invalid("dangling '%'")),
            };

            let position = index.unwrap_or(next_arg);
            let arg = match position {
                1 => Arg::Value,
                2 => Arg::Symbol,
                _ => return Err(invalid(&format!("argument index {} out of range 1..=2", position))),
            };
            next_arg = position + 1;

            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Directive { arg, precision, verb });
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Template {
            source: source.to_string(),
            pieces,
        })
    }

    /// The built-in `"%.4f %s"` template
    pub fn standard() -> Self {
        Template {
            source: DEFAULT_FORMAT.to_string(),
            pieces: vec![
                Piece::Directive {
                    arg: Arg::Value,
                    precision: Some(4),
                    verb: Verb::Fixed,
                },
                Piece::Literal(" ".to_string()),
                Piece::Directive {
                    arg: Arg::Symbol,
                    precision: None,
                    verb: Verb::Text,
                },
            ],
        }
    }

    /// The template string this was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render a value and a unit symbol
    pub fn render(&self, value: f64, symbol: &str) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Directive { arg: Arg::Symbol, precision, .. } => match precision {
                    Some(p) => out.extend(symbol.chars().take(*p)),
                    None => out.push_str(symbol),
                },
                Piece::Directive { arg: Arg::Value, precision, verb } => {
                    out.push_str(&render_value(value, *precision, *verb));
                }
            }
        }
        out
    }
}

fn render_value(value: f64, precision: Option<usize>, verb: Verb) -> String {
    match verb {
        Verb::Fixed => format!("{:.*}", precision.unwrap_or(6), value),
        Verb::Exponent => exponent_form(value, precision.unwrap_or(6)),
        Verb::Shortest | Verb::Text => format!("{}", value),
    }
}

/// `1500.0` with precision 2 becomes `1.50e+03`
fn exponent_form(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => raw,
        },
        // NaN and infinities have no exponent part
        None => raw,
    }
}

fn take_digits<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    digits.parse().ok()
}

fn parse_index<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> Option<usize> {
    chars.next(); // '['
    let index = take_digits(chars)?;
    match chars.next() {
        Some(']') => Some(index),
        _ => None,
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Template {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

impl TryFrom<String> for Template {
    type Error = UnitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Template::parse(&s)
    }
}

impl From<Template> for String {
    fn from(t: Template) -> Self {
        t.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Current process-wide default template
pub fn default_template() -> Template {
    DEFAULT_TEMPLATE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide default template, returning the previous one
pub fn set_default_template(template: Template) -> Template {
    let mut guard = DEFAULT_TEMPLATE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, template)
}

/// Render with the process-wide default template
pub fn render_default(value: f64, symbol: &str) -> String {
    DEFAULT_TEMPLATE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .render(value, symbol)
}
