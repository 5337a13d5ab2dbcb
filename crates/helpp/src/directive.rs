// src/directive.rs
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::alias::{Alias, MacroTable};
use crate::help_assert;
use crate::lines::LineBuffer;
use crate::source::SourceLoader;
use crate::text::{interpret_escapes, trim};
use crate::HelppResult;

lazy_static! {
    // the path ends at the first line break; merged continuation lines are dropped
    static ref INCLUDE_RE: Regex = Regex::new(r"^include[ \t]+([^\r\n]+)").unwrap();
}

/// The two whitespace switches. Each directive occurrence flips its switch;
/// they are applied once, after the text has converged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespaceMode {
    /// `#skip whitespace`: remove all whitespace.
    pub strip: bool,
    /// `#reduce whitespace`: turn each whitespace run into one space.
    pub collapse: bool,
}

/// One classified directive line (continuations already merged, `#` removed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Define { name: String, replacement: String },
    SkipWhitespace,
    ReduceWhitespace,
    Include(PathBuf),
    Unknown(String),
}

impl Directive {
    pub fn parse(body: &str) -> Self {
        if let Some(pos) = body.find(":=") {
            let mut name = body[..pos].to_string();
            trim(&mut name);
            let mut replacement = body[pos + 2..].to_string();
            trim(&mut replacement);
            return Directive::Define {
                name,
                replacement: interpret_escapes(&replacement),
            };
        }

        let text = body.trim();
        match text {
            "skip whitespace" => Directive::SkipWhitespace,
            "reduce whitespace" => Directive::ReduceWhitespace,
            _ => match INCLUDE_RE.captures(text) {
                Some(caps) => Directive::Include(PathBuf::from(caps[1].trim())),
                None => Directive::Unknown(text.to_string()),
            },
        }
    }
}

/// A line is a directive when its first non-blank character is `#`.
pub fn is_directive(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Consumes directive lines from a buffer.
pub struct Extractor<'a, L: SourceLoader + ?Sized> {
    loader: &'a L,
    base_dir: &'a Path,
}

impl<'a, L: SourceLoader + ?Sized> Extractor<'a, L> {
    /// Relative include paths are resolved against `base_dir`.
    pub fn new(loader: &'a L, base_dir: &'a Path) -> Self {
        Self { loader, base_dir }
    }

    /// Scans `input` front to back and returns the lines that are not
    /// directives, in order.
    ///
    /// Definitions are appended to `table`. Included files are spliced in
    /// where the directive stood and scanned like the rest. Whitespace
    /// directives flip `mode`; with `None` they are ignored.
    pub fn extract(
        &self,
        mut input: LineBuffer,
        table: &mut MacroTable,
        mut mode: Option<&mut WhitespaceMode>,
    ) -> HelppResult<LineBuffer> {
        let mut residual = LineBuffer::new();

        while let Some(line) = input.pop_front() {
            if !is_directive(&line) {
                residual.push_back(line);
                continue;
            }

            let mut head = line;
            trim(&mut head);
            let merged = input.merge_continuations(&mut head);
            help_assert!(head.starts_with('#'));
            if merged > 0 {
                debug!("merged {} continuation line(s) into '{}'", merged, head);
            }

            match Directive::parse(&head[1..]) {
                Directive::Define { name, replacement } => {
                    debug!("macro '{}' := {:?}", name, replacement);
                    table.push(Alias::new(&name, &replacement)?);
                }
                Directive::SkipWhitespace => match mode.as_deref_mut() {
                    Some(m) => m.strip = !m.strip,
                    None => debug!("ignoring '#skip whitespace' outside the document"),
                },
                Directive::ReduceWhitespace => match mode.as_deref_mut() {
                    Some(m) => m.collapse = !m.collapse,
                    None => debug!("ignoring '#reduce whitespace' outside the document"),
                },
                Directive::Include(path) => {
                    let target = self.resolve(&path);
                    debug!("including {:?}", target);
                    let text = self.loader.load(&target)?;
                    input.splice_front(LineBuffer::split(&text));
                }
                Directive::Unknown(text) => {
                    debug!("ignoring unknown directive '#{}'", text);
                }
            }
        }

        Ok(residual)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
