//! URL template compilation.
//!
//! # Responsibilities
//! - Expand constraint shorthands (`:i`, `:a`, `:h`, `:c`)
//! - Extract placeholders in left-to-right order
//! - Build an anchored regex with one capture slot per placeholder
//!
//! # Design Decisions
//! - Shorthands are expanded by plain substring replacement before scanning
//! - Literal template text is regex text and is not escaped
//! - Capture slots are named `p0..pN` so groups inside a constraint cannot shift positions
//! - Duplicate placeholder names are rejected

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::PatternError;

/// Shorthand constraint tokens and their expansions.
const SHORTHANDS: [(&str, &str); 4] = [
    (":i}", ":[0-9]+}"),
    (":a}", ":[0-9A-Za-z]+}"),
    (":h}", ":[0-9A-Fa-f]+}"),
    (":c}", r":[a-zA-Z0-9+_\-.]+}"),
];

/// Capture used when a placeholder carries no constraint.
const SEGMENT_PATTERN: &str = "[^/]+";

const VARIABLE_PATTERN: &str = r"(?x)
    \{
        \s* ([a-zA-Z0-9_]*) \s*
        (?:
            : \s* ((?:[^{}]|\{[^{}]*\})+)
        )?
    \}\??";

fn variable_regex() -> &'static Regex {
    static VARIABLE: OnceLock<Regex> = OnceLock::new();
    VARIABLE.get_or_init(|| Regex::new(VARIABLE_PATTERN).expect("placeholder scanner is valid"))
}

/// A named capture slot inside a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Exact token text as it appears in the expanded template.
    pub raw_token: String,
    pub name: String,
    /// Regex fragment restricting the captured value.
    pub constraint: Option<String>,
}

/// A template compiled into its matching form.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    match_regex: String,
    regex: Regex,
    placeholders: Vec<Placeholder>,
}

impl CompiledRoute {
    /// Source text of the anchored matching expression.
    pub fn match_regex(&self) -> &str {
        &self.match_regex
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Tests `path` and returns the captured values in placeholder order.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(path)?;
        let values = (0..self.placeholders.len())
            .map(|i| {
                caps.name(&slot_name(i))
                    .map_or_else(String::new, |m| m.as_str().to_string())
            })
            .collect();
        Some(values)
    }
}

fn slot_name(index: usize) -> String {
    format!("p{index}")
}

/// Replaces shorthand constraints with their full character classes.
pub fn expand_shorthands(template: &str) -> String {
    SHORTHANDS
        .iter()
        .fold(template.to_string(), |acc, (short, full)| acc.replace(short, full))
}

/// Extracts placeholders from an already expanded template.
pub fn extract_placeholders(expanded: &str) -> Vec<Placeholder> {
    variable_regex()
        .captures_iter(expanded)
        .map(|caps| Placeholder {
            raw_token: caps[0].to_string(),
            name: caps.get(1).map_or("", |m| m.as_str()).to_string(),
            constraint: caps.get(2).map(|m| m.as_str().to_string()),
        })
        .collect()
}

/// Compiles a URL template into an anchored regex plus its placeholders.
pub fn compile(template: &str) -> Result<CompiledRoute, PatternError> {
    let expanded = expand_shorthands(template);

    let mut seen = HashSet::new();
    let mut placeholders = Vec::new();
    let mut body = String::with_capacity(expanded.len() + 16);
    let mut last = 0;

    for (index, caps) in variable_regex().captures_iter(&expanded).enumerate() {
        let whole = &caps[0];
        let whole_range = caps.get(0).map_or(0..0, |m| m.range());
        let name = caps.get(1).map_or("", |m| m.as_str());
        let constraint = caps.get(2).map(|m| m.as_str());

        if !seen.insert(name.to_string()) {
            return Err(PatternError::DuplicatePlaceholder {
                name: name.to_string(),
                template: template.to_string(),
            });
        }

        body.push_str(&expanded[last..whole_range.start]);
        body.push_str(&format!(
            "(?P<{}>{})",
            slot_name(index),
            constraint.unwrap_or(SEGMENT_PATTERN)
        ));
        last = whole_range.end;

        placeholders.push(Placeholder {
            raw_token: whole.to_string(),
            name: name.to_string(),
            constraint: constraint.map(str::to_string),
        });
    }
    body.push_str(&expanded[last..]);

    let match_regex = format!("^(?:{body})$");
    let regex = Regex::new(&match_regex).map_err(|e| PatternError::InvalidRegex {
        template: template.to_string(),
        regex: match_regex.clone(),
        reason: e.to_string(),
    })?;

    Ok(CompiledRoute {
        match_regex,
        regex,
        placeholders,
    })
}
