//! A small subset of CSS selectors: comma-separated compound selectors made
//! of an optional tag, `#id`, `.class`, `[attr]` and `[attr=value]` parts.
//! Combinators are not supported.

use std::sync::OnceLock;

use regex::Regex;

use crate::document::Node;

fn compound_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^([A-Za-z][\w-]*|\*)?((?:#[\w-]+|\.[\w-]+|\[[\w-]+(?:=(?:"[^"]*"|'[^']*'|[^\]"']*))?\])*)$"#)
            .expect("Invalid regex pattern")
    })
}

fn part_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"#([\w-]+)|\.([\w-]+)|\[([\w-]+)(?:=(?:"([^"]*)"|'([^']*)'|([^\]"']*)))?\]"#)
            .expect("Invalid regex pattern")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    fn parse(input: &str) -> Option<Self> {
        let caps = compound_re().captures(input)?;
        let mut compound = Compound {
            tag: caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|t| *t != "*")
                .map(str::to_string),
            ..Default::default()
        };

        let rest = caps.get(2).map_or("", |m| m.as_str());
        for part in part_re().captures_iter(rest) {
            if let Some(id) = part.get(1) {
                compound.id = Some(id.as_str().to_string());
            } else if let Some(class) = part.get(2) {
                compound.classes.push(class.as_str().to_string());
            } else if let Some(name) = part.get(3) {
                let value = part
                    .get(4)
                    .or_else(|| part.get(5))
                    .or_else(|| part.get(6))
                    .map(|v| v.as_str().to_string());
                compound.attrs.push((name.as_str().to_string(), value));
            }
        }
        Some(compound)
    }

    fn matches(&self, node: &Node) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != node.tag()) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| id != node.id()) {
            return false;
        }
        if !self.classes.iter().all(|c| node.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| match (node.attr(name), value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        })
    }
}

/// Parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Parse a selector. Returns `None` for empty or unsupported syntax.
    pub fn parse(input: &str) -> Option<Self> {
        let mut alternatives = Vec::new();
        for piece in input.split(',') {
            let piece = piece.trim();
            if piece.is_empty() {
                return None;
            }
            alternatives.push(Compound::parse(piece)?);
        }
        Some(Self {
            source: input.trim().to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.alternatives.iter().any(|c| c.matches(node))
    }
}
