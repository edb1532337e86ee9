//! Step phrase patterns.
//!
//! Patterns use the cucumber expression placeholders the feature files are
//! written against: `{string}` matches a double- or single-quoted string and
//! `{int}` a decimal integer. Everything else is literal text.
//!
//! Inside a quoted string, `\"`, `\'` and `\\` stand for the bare character;
//! any other backslash is kept as written.

use regex::Regex;
use std::fmt;

use crate::result::{StepError, StepResult};

/// Placeholder types a pattern can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// `{string}`
    String,
    /// `{int}`
    Int,
}

impl ParamType {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            _ => None,
        }
    }

    const fn regex(self) -> &'static str {
        match self {
            Self::String => r#"("(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')"#,
            Self::Int => r"(-?\d+)",
        }
    }
}

/// A value extracted from a matched phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// String argument, quotes removed
    Str(String),
    /// Integer argument
    Int(i64),
}

/// Parameters extracted from one phrase, with typed accessors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args<'a> {
    pattern: &'a str,
    params: Vec<Param>,
}

impl<'a> Args<'a> {
    /// Wrap parameters matched by `pattern`
    #[must_use]
    pub fn new(pattern: &'a str, params: Vec<Param>) -> Self {
        Self { pattern, params }
    }

    /// String parameter at `index`
    pub fn string(&self, index: usize) -> StepResult<String> {
        match self.params.get(index) {
            Some(Param::Str(s)) => Ok(s.clone()),
            other => Err(self.invalid(index, "string", other)),
        }
    }

    /// Integer parameter at `index`
    pub fn int(&self, index: usize) -> StepResult<i64> {
        match self.params.get(index) {
            Some(Param::Int(n)) => Ok(*n),
            other => Err(self.invalid(index, "int", other)),
        }
    }

    /// All parameters in order
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    fn invalid(&self, index: usize, expected: &str, found: Option<&Param>) -> StepError {
        StepError::InvalidParameter {
            pattern: self.pattern.to_string(),
            message: format!("expected {expected} at position {index}, found {found:?}"),
        }
    }
}

/// A compiled step pattern
#[derive(Debug, Clone)]
pub struct StepPattern {
    source: String,
    regex: Regex,
    params: Vec<ParamType>,
}

impl StepPattern {
    /// Compile a pattern
    pub fn parse(source: &str) -> StepResult<Self> {
        let invalid = |message: String| StepError::InvalidPattern {
            pattern: source.to_string(),
            message,
        };

        let mut expr = String::from("^");
        let mut params = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find('{') {
            expr.push_str(&regex::escape(&rest[..open]));
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| invalid("unclosed '{'".to_string()))?;
            let name = &after[..close];
            let param = ParamType::parse(name)
                .ok_or_else(|| invalid(format!("unknown parameter type {{{name}}}")))?;
            expr.push_str(param.regex());
            params.push(param);
            rest = &after[close + 1..];
        }
        expr.push_str(&regex::escape(rest));
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            regex,
            params,
        })
    }

    /// Pattern text as registered
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Declared placeholder types, in order
    #[must_use]
    pub fn param_types(&self) -> &[ParamType] {
        &self.params
    }

    /// Whether `phrase` matches this pattern
    #[must_use]
    pub fn is_match(&self, phrase: &str) -> bool {
        self.regex.is_match(phrase)
    }

    /// Match `phrase` and extract its parameters.
    ///
    /// Returns `None` when the phrase does not match, and an error when it
    /// matches but an integer does not fit in `i64`.
    pub fn captures(&self, phrase: &str) -> Option<StepResult<Args<'_>>> {
        let caps = self.regex.captures(phrase)?;
        let params = self
            .params
            .iter()
            .zip(caps.iter().skip(1))
            .map(|(ty, m)| {
                let text = m.map_or("", |m| m.as_str());
                match ty {
                    ParamType::String => Ok(Param::Str(unquote(text))),
                    ParamType::Int => text.parse().map(Param::Int).map_err(|e| {
                        StepError::InvalidParameter {
                            pattern: self.source.clone(),
                            message: format!("{text}: {e}"),
                        }
                    }),
                }
            })
            .collect::<StepResult<Vec<_>>>();
        Some(params.map(|params| Args::new(&self.source, params)))
    }
}

impl fmt::Display for StepPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Render `text` as a double-quoted `{string}` argument
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn unquote(text: &str) -> String {
    let inner = text.get(1..text.len().saturating_sub(1)).unwrap_or("");
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('"' | '\'' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push(c);
                out.push(other);
            }
            None => out.push(c),
        }
    }
    out
}
