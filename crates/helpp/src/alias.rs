// src/alias.rs
use regex::Regex;

use crate::HelppError;

/// A single `name := replacement` rule.
///
/// The name is not a literal token: it is compiled as a regular expression and
/// every match of it is replaced. `#a.c := x` therefore also rewrites `abc`.
/// The replacement follows the `regex` crate expansion rules, so `$1` or
/// `${name}` refer to capture groups of the name and `$$` is a literal dollar.
#[derive(Debug, Clone)]
pub struct Alias {
    pattern: String,
    replacement: String,
    regex: Regex,
}

impl Alias {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, HelppError> {
        let regex = Regex::new(pattern).map_err(|source| HelppError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Rewrites every non-overlapping, leftmost match in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Aliases in definition order. Duplicates are kept, so a later rule can
/// rewrite what an earlier one produced.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    aliases: Vec<Alias>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, alias: Alias) {
        self.aliases.push(alias);
    }

    /// Appends every alias of `other`, keeping its order.
    pub fn extend(&mut self, other: &MacroTable) {
        self.aliases.extend(other.aliases.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.iter()
    }

    /// Applies every alias in order; alias `k` sees the output of aliases `0..k`.
    pub fn apply(&self, text: String) -> String {
        self.aliases
            .iter()
            .fold(text, |acc, alias| alias.apply(&acc))
    }
}
