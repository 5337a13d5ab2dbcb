// src/lines.rs
use std::collections::VecDeque;

/// Lines of one pass, consumed from the front.
///
/// The extractor pops lines off the front and pushes the ones it keeps into a
/// separate output buffer, so merging and splicing never touch a position that
/// is being iterated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineBuffer {
    lines: VecDeque<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits at line breaks; terminators are not kept.
    pub fn split(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push_back(&mut self, line: String) {
        self.lines.push_back(line);
    }

    pub fn pop_front(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    /// Appends every following line that starts with a space to `head`,
    /// joined by a line feed and without that one leading space.
    /// Returns the number of lines absorbed.
    pub fn merge_continuations(&mut self, head: &mut String) -> usize {
        let mut merged = 0;
        while self.lines.front().is_some_and(|l| l.starts_with(' ')) {
            if let Some(next) = self.lines.pop_front() {
                head.push('\n');
                head.push_str(&next[1..]);
                merged += 1;
            }
        }
        merged
    }

    /// Inserts `other` in front of the remaining lines, keeping its order.
    pub fn splice_front(&mut self, other: LineBuffer) {
        for line in other.lines.into_iter().rev() {
            self.lines.push_front(line);
        }
    }

    /// Joins with a line feed after every line.
    pub fn join(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.lines.iter()
    }
}
