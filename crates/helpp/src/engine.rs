// src/engine.rs
use log::{debug, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::alias::MacroTable;
use crate::directive::{is_directive, Extractor};
use crate::help_assert;
use crate::lines::LineBuffer;
use crate::source::{FsLoader, SourceLoader};
use crate::text::{collapse_whitespace, strip_whitespace, trim};
use crate::{HelppError, HelppResult};

pub use crate::directive::WhitespaceMode;

pub const DEFAULT_MAX_PASSES: usize = 64;
pub const DEFAULT_OUTPUT_SUFFIX: &str = "out";
pub const DEFAULT_HELP_SUFFIX: &str = "help";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Upper bound on extraction + substitution passes.
    pub max_passes: usize,
    /// Look for `<dir><ext>.help` next to the input.
    pub load_help: bool,
    pub output_suffix: String,
    pub help_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_passes: DEFAULT_MAX_PASSES,
            load_help: true,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            help_suffix: DEFAULT_HELP_SUFFIX.to_string(),
        }
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    /// Converged, post-processed text (trimmed, no trailing line feed).
    pub text: String,
    /// Whitespace switches as they stood at the end of the run.
    pub mode: WhitespaceMode,
    /// Passes executed, the final unchanged one included.
    pub passes: usize,
    /// Help file whose macros were loaded, if any.
    pub help_file: Option<PathBuf>,
}

impl Expansion {
    /// Text as written to the output file, with one trailing line feed.
    pub fn rendered(&self) -> String {
        format!("{}\n", self.text)
    }
}

/// Joins the residual lines, trims, and applies every alias in order.
pub fn substitute(residual: &LineBuffer, table: &MacroTable) -> String {
    let mut text = residual.join();
    trim(&mut text);
    table.apply(text)
}

/// Applies the whitespace switches: collapse first, then strip.
pub fn post_process(text: String, mode: WhitespaceMode) -> String {
    let text = if mode.collapse {
        collapse_whitespace(&text)
    } else {
        text
    };
    if mode.strip {
        strip_whitespace(&text)
    } else {
        text
    }
}

pub struct Preprocessor<L: SourceLoader = FsLoader> {
    loader: L,
    settings: Settings,
}

impl Preprocessor<FsLoader> {
    pub fn new(settings: Settings) -> Self {
        Self::with_loader(FsLoader, settings)
    }
}

impl<L: SourceLoader> Preprocessor<L> {
    pub fn with_loader(loader: L, settings: Settings) -> Self {
        Self { loader, settings }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// `docs/page.md` -> `docs/page.md.out`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let mut name = OsString::from(input.as_os_str());
        name.push(".");
        name.push(&self.settings.output_suffix);
        PathBuf::from(name)
    }

    /// `docs/page.md` -> `docs/.md.help`; without an extension `docs/.help`.
    pub fn help_path(&self, input: &Path) -> PathBuf {
        let dir = input.parent().unwrap_or_else(|| Path::new(""));
        let name = match input.extension() {
            Some(ext) => format!(".{}.{}", ext.to_string_lossy(), self.settings.help_suffix),
            None => format!(".{}", self.settings.help_suffix),
        };
        dir.join(name)
    }

    /// Reads the macros of the help file belonging to `input`, if there is one.
    ///
    /// Only definitions (including those reached through `#include`) are
    /// kept; whitespace switches in a help file have no effect.
    pub fn load_help(&self, input: &Path) -> HelppResult<Option<(PathBuf, MacroTable)>> {
        if !self.settings.load_help {
            return Ok(None);
        }
        let help = self.help_path(input);
        if !self.loader.exists(&help) {
            debug!("no help file at {:?}", help);
            return Ok(None);
        }

        let text = self.loader.load(&help)?;
        let base_dir = help.parent().unwrap_or_else(|| Path::new(""));
        let mut table = MacroTable::new();
        Extractor::new(&self.loader, base_dir).extract(LineBuffer::split(&text), &mut table, None)?;
        info!("using help file {:?} ({} macro(s))", help, table.len());
        Ok(Some((help, table)))
    }

    /// Expands in-memory text. Includes resolve against `base_dir`; no help
    /// file is consulted.
    pub fn expand_str(&self, source: &str, base_dir: &Path) -> HelppResult<Expansion> {
        self.converge(source, base_dir, &MacroTable::new())
    }

    /// Loads `input` and its help file and expands it.
    pub fn expand_file(&self, input: &Path) -> HelppResult<Expansion> {
        let help = self.load_help(input)?;
        let source = self.loader.load(input)?;
        let base_dir = input.parent().unwrap_or_else(|| Path::new(""));
        let (help_file, preload) = match help {
            Some((path, table)) => (Some(path), table),
            None => (None, MacroTable::new()),
        };
        let mut expansion = self.converge(&source, base_dir, &preload)?;
        expansion.help_file = help_file;
        Ok(expansion)
    }

    /// Expands `input` and writes the result to its output path.
    pub fn process_file(&mut self, input: &Path) -> HelppResult<(PathBuf, Expansion)> {
        let expansion = self.expand_file(input)?;
        let output = self.output_path(input);
        self.loader.store(&output, &expansion.rendered())?;
        info!("wrote {:?}", output);
        Ok((output, expansion))
    }

    /// Runs passes until one leaves the text unchanged.
    ///
    /// `preload` macros head every pass's table, ahead of the document's own
    /// definitions. They never appear in the text, so nothing re-derives them.
    fn converge(
        &self,
        source: &str,
        base_dir: &Path,
        preload: &MacroTable,
    ) -> HelppResult<Expansion> {
        let mut text = source.to_string();
        let mut mode = WhitespaceMode::default();
        // at least one pass, or nothing can ever be seen to converge
        let max_passes = self.settings.max_passes.max(1);

        for pass in 1..=max_passes {
            let mut table = MacroTable::new();
            table.extend(preload);
            let next = self.run_pass(&text, base_dir, &mut table, &mut mode)?;
            debug!("pass {}: {} macro(s), {} byte(s)", pass, table.len(), next.len());

            if next == text {
                return Ok(Expansion {
                    text: post_process(next, mode),
                    mode,
                    passes: pass,
                    help_file: None,
                });
            }
            text = next;
        }

        Err(HelppError::NonConvergent { passes: max_passes })
    }

    fn run_pass(
        &self,
        text: &str,
        base_dir: &Path,
        table: &mut MacroTable,
        mode: &mut WhitespaceMode,
    ) -> HelppResult<String> {
        let extractor = Extractor::new(&self.loader, base_dir);
        let residual = extractor.extract(LineBuffer::split(text), table, Some(mode))?;
        help_assert!(!residual.iter().any(|l| is_directive(l)));
        Ok(substitute(&residual, table))
    }
}
