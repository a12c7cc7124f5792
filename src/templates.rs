//! Message-template rendering.
//!
//! The formatter does not hard-code its body layout: callers may hand in a
//! template in any of the three placeholder styles common in logging
//! configuration, together with a defaults map for placeholders the record
//! itself cannot answer. Templates are parsed into segments once at
//! construction and rendered for every record, so the per-record cost is a
//! single pass over the segment list.
//!
//! Known placeholders name record attributes: `message`, `name`, `level`
//! (display name), `levelno`, `module`, `function`, `line`, `timestamp`
//! (formatted creation time) and `created` (unix seconds). Anything else is
//! looked up in the defaults map and otherwise passes through as literal
//! text, so rendering never fails.

use std::collections::HashMap;

use crate::record::Record;

/// Placeholder style selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `%(name)s` placeholders.
    Percent,
    /// `{name}` placeholders.
    Brace,
    /// `$name` and `${name}` placeholders.
    Dollar,
}

impl Default for Style {
    fn default() -> Self {
        Style::Percent
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `raw` keeps the spelling from the template so unresolvable
    /// placeholders can be emitted unchanged.
    Placeholder { name: String, raw: String },
}

/// A template parsed once, rendered many times.
#[derive(Debug, Clone)]
pub(crate) struct Template {
    segments: Vec<Segment>,
    wants_time: bool,
    defaults: HashMap<String, String>,
}

impl Template {
    pub(crate) fn parse(
        fmt: &str, style: Style, defaults: Option<HashMap<String, String>>,
    ) -> Self {
        let segments = match style {
            Style::Percent => parse_percent(fmt),
            Style::Brace => parse_brace(fmt),
            Style::Dollar => parse_dollar(fmt),
        };
        let wants_time = segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder { name, .. } if name == "timestamp"));
        Self { segments, wants_time, defaults: defaults.unwrap_or_default() }
    }

    /// Whether rendering needs a formatted creation time. Lets the caller
    /// skip strftime work for the common templates that never show it.
    pub(crate) fn wants_time(&self) -> bool {
        self.wants_time
    }

    pub(crate) fn render(&self, record: &Record, timestamp: Option<&str>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { name, raw } => {
                    match self.lookup(name, record, timestamp) {
                        Some(value) => out.push_str(&value),
                        None => out.push_str(raw),
                    }
                }
            }
        }
        out
    }

    fn lookup(&self, name: &str, record: &Record, timestamp: Option<&str>) -> Option<String> {
        let value = match name {
            "message" => record.message.clone(),
            "name" => record.name.clone(),
            "level" => record.level_name.clone(),
            "levelno" => record.level.to_string(),
            "module" => record.module.clone(),
            "function" => record.function.clone(),
            "line" => record.line.to_string(),
            "timestamp" => timestamp.unwrap_or("").to_string(),
            "created" => record.created.timestamp().to_string(),
            _ => return self.defaults.get(name).cloned(),
        };
        Some(value)
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `%(name)s` with a single trailing conversion character; `%%` escapes.
fn parse_percent(fmt: &str) -> Vec<Segment> {
    let chars: Vec<char> = fmt.chars().collect();
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '%' && i + 1 < chars.len() {
            if chars[i + 1] == '%' {
                literal.push('%');
                i += 2;
                continue;
            }
            if chars[i + 1] == '(' {
                if let Some(close) = chars[i + 2..].iter().position(|&c| c == ')') {
                    let close = i + 2 + close;
                    let name: String = chars[i + 2..close].iter().collect();
                    let conv = chars.get(close + 1).copied();
                    if is_ident(&name) && conv.map_or(false, |c| c.is_ascii_alphabetic()) {
                        flush_literal(&mut segments, &mut literal);
                        let raw: String = chars[i..=close + 1].iter().collect();
                        segments.push(Segment::Placeholder { name, raw });
                        i = close + 2;
                        continue;
                    }
                }
            }
        }
        literal.push(chars[i]);
        i += 1;
    }
    flush_literal(&mut segments, &mut literal);
    segments
}

/// `{name}`; brace pairs holding anything but a plain name pass through.
fn parse_brace(fmt: &str) -> Vec<Segment> {
    let chars: Vec<char> = fmt.chars().collect();
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '{' {
            if let Some(close) = chars[i + 1..].iter().position(|&c| c == '}') {
                let close = i + 1 + close;
                let name: String = chars[i + 1..close].iter().collect();
                if is_ident(&name) {
                    flush_literal(&mut segments, &mut literal);
                    let raw = format!("{{{}}}", name);
                    segments.push(Segment::Placeholder { name, raw });
                    i = close + 1;
                    continue;
                }
            }
        }
        literal.push(chars[i]);
        i += 1;
    }
    flush_literal(&mut segments, &mut literal);
    segments
}

/// `$name` and `${name}`; `$$` escapes.
fn parse_dollar(fmt: &str) -> Vec<Segment> {
    let chars: Vec<char> = fmt.chars().collect();
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '$' && i + 1 < chars.len() {
            if chars[i + 1] == '$' {
                literal.push('$');
                i += 2;
                continue;
            }
            if chars[i + 1] == '{' {
                if let Some(close) = chars[i + 2..].iter().position(|&c| c == '}') {
                    let close = i + 2 + close;
                    let name: String = chars[i + 2..close].iter().collect();
                    if is_ident(&name) {
                        flush_literal(&mut segments, &mut literal);
                        let raw = format!("${{{}}}", name);
                        segments.push(Segment::Placeholder { name, raw });
                        i = close + 1;
                        continue;
                    }
                }
            } else {
                let end = chars[i + 1..]
                    .iter()
                    .position(|&c| !(c.is_ascii_alphanumeric() || c == '_'))
                    .map(|p| i + 1 + p)
                    .unwrap_or(chars.len());
                let name: String = chars[i + 1..end].iter().collect();
                if is_ident(&name) {
                    flush_literal(&mut segments, &mut literal);
                    let raw = format!("${}", name);
                    segments.push(Segment::Placeholder { name, raw });
                    i = end;
                    continue;
                }
            }
        }
        literal.push(chars[i]);
        i += 1;
    }
    flush_literal(&mut segments, &mut literal);
    segments
}

fn flush_literal(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}
