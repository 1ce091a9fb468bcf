//! Removing redundant compiler-define flags from generated `flags.make` files.
//!
//! Some build generators emit a define flag immediately followed by another one, for
//! instance an empty `-D` before `-DNDEBUG`. The earlier flag of such a pair is dropped and
//! the later one kept.
use crate::*;
use regex::Regex;
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

/// Marker of the line listing the compiler defines.
pub const CXX_DEFINES: &str = "CXX_DEFINES";

/// The line index the marker sits on in files written by the build generator.
pub const MARKER_LINE: usize = 6;

/// How many redundant defines to remove per line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupMode {
    /// Only the first define followed by another define, one substitution per line.
    #[default]
    First,
    /// Repeat until no two defines are adjacent, so every pair on the line is removed.
    All,
}

/// How the marker line is found within a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locate {
    /// The first line containing the marker.
    #[default]
    Marker,
    /// Exactly this (0-based) line, which must contain the marker.
    Index(usize),
}

/// Where flag files live beneath a build root: `<dir>/*<suffix>/<file>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagLayout {
    pub dir: String,
    pub suffix: String,
    pub file: String,
}

impl Default for FlagLayout {
    fn default() -> Self {
        Self {
            dir: "CMakeFiles".into(),
            suffix: ".dir".into(),
            file: "flags.make".into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DedupConfig {
    pub mode: DedupMode,
    pub locate: Locate,
    /// Defaults to [`CXX_DEFINES`] when empty.
    pub marker: String,
    /// Report what would change without writing.
    pub dry_run: bool,
    pub layout: FlagLayout,
}

impl DedupConfig {
    pub fn marker(&self) -> &str {
        if self.marker.is_empty() {
            CXX_DEFINES
        } else {
            &self.marker
        }
    }
}

/// The result of inspecting a single flag file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No adjacent defines.
    Clean,
    /// The marker line was rewritten, dropping `removed` defines.
    Edited { removed: usize },
    /// As [`Outcome::Edited`] but nothing was written.
    DryRun { removed: usize },
}

/// Reported by [`run`] around each flag file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress<'a> {
    /// About to read the file; a failure on it follows this event.
    Inspecting(&'a Path),
    Finished(&'a Path, Outcome),
}

/// Strips defines which are directly followed by another define.
pub struct Deduplicator {
    mode: DedupMode,
    pair: Regex,
}

impl Deduplicator {
    pub fn new(mode: DedupMode) -> Self {
        // a define token, whitespace, then the start of another define
        let pair = Regex::new(r"(^|[ \t])-D\S*[ \t]+(-D)").expect("valid define-pair pattern");
        Self { mode, pair }
    }

    pub fn mode(&self) -> DedupMode {
        self.mode
    }

    /// Does `line` hold a define directly followed by another define?
    pub fn has_pair(&self, line: &str) -> bool {
        self.pair.is_match(line)
    }

    /// Remove redundant defines from `line`, borrowing it when nothing changes.
    ///
    /// # Example
    /// ```rust
    /// use polyfix::flags::*;
    /// let d = Deduplicator::new(DedupMode::First);
    /// assert_eq!(d.dedup_line("CXX_DEFINES = -D -DNDEBUG\n"), "CXX_DEFINES = -DNDEBUG\n");
    /// assert_eq!(d.dedup_line("CXX_DEFINES = -DFOO bar -DBAZ"), "CXX_DEFINES = -DFOO bar -DBAZ");
    /// ```
    pub fn dedup_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let mut line = Cow::Borrowed(line);
        loop {
            // matches never overlap, so chains of three or more need repeated passes
            let next = match self.pair.replacen(&line, 1, "${1}${2}") {
                Cow::Owned(s) => s,
                Cow::Borrowed(_) => break,
            };
            line = Cow::Owned(next);
            if self.mode == DedupMode::First {
                break;
            }
        }
        line
    }
}

/// Count the define flags on a line.
pub fn count_defines(line: &str) -> usize {
    line.split_whitespace()
        .filter(|t| t.starts_with("-D"))
        .count()
}

/// Find the index of the marker line in `lines`.
pub fn find_marker_line<S: AsRef<str>>(
    path: &Path,
    lines: &[S],
    marker: &str,
    locate: Locate,
) -> Result<usize> {
    match locate {
        Locate::Marker => lines
            .iter()
            .position(|l| l.as_ref().contains(marker))
            .ok_or_else(|| Error::MarkerNotFound {
                path: path.to_path_buf(),
                marker: marker.to_string(),
            }),
        Locate::Index(i) => match lines.get(i) {
            Some(l) if l.as_ref().contains(marker) => Ok(i),
            _ => Err(Error::MarkerMismatch {
                path: path.to_path_buf(),
                line: i,
                marker: marker.to_string(),
            }),
        },
    }
}

/// List the flag files beneath `root`, sorted.
pub fn find_flag_files(root: &Path, layout: &FlagLayout) -> Result<Vec<PathBuf>> {
    let dir = root.join(&layout.dir);
    if !dir.is_dir() {
        log::warn!("no {} directory in {}", layout.dir, root.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let is_target = entry
            .file_name()
            .to_str()
            .map(|n| n.ends_with(&layout.suffix))
            .unwrap_or(false);
        if !is_target || !entry.file_type()?.is_dir() {
            continue;
        }

        let file = entry.path().join(&layout.file);
        if file.is_file() {
            files.push(file);
        }
    }

    files.sort();
    Ok(files)
}

/// Inspect one flag file, rewriting its marker line if it holds adjacent defines.
///
/// All other lines, including line endings, are kept verbatim.
pub fn dedup_file(path: &Path, dedup: &Deduplicator, config: &DedupConfig) -> Result<Outcome> {
    let text = fs::read_to_string(path)?;
    let lines = text.split_inclusive('\n').collect::<Vec<_>>();

    let idx = find_marker_line(path, &lines, config.marker(), config.locate)?;
    let line = lines[idx];

    let fixed = match dedup.dedup_line(line) {
        Cow::Borrowed(_) => {
            log::debug!("{}: no adjacent defines", path.display());
            return Ok(Outcome::Clean);
        }
        Cow::Owned(s) => s,
    };

    let removed = count_defines(line).saturating_sub(count_defines(&fixed));

    if config.dry_run {
        log::warn!(
            "{}: dry run, would remove {} define(s)",
            path.display(),
            removed
        );
        return Ok(Outcome::DryRun { removed });
    }

    let mut out = String::with_capacity(text.len());
    for (i, &l) in lines.iter().enumerate() {
        out.push_str(if i == idx { fixed.as_str() } else { l });
    }
    fs::write(path, out)?;

    log::info!("{}: removed {} define(s)", path.display(), removed);
    Ok(Outcome::Edited { removed })
}

/// Process every flag file beneath `root`, calling `report` before and after each.
///
/// The first failure stops the run; files already rewritten stay rewritten.
pub fn run<F>(root: &Path, config: &DedupConfig, mut report: F) -> Result<Vec<(PathBuf, Outcome)>>
where
    F: FnMut(Progress),
{
    let dedup = Deduplicator::new(config.mode);
    let files = find_flag_files(root, &config.layout)?;
    log::info!("found {} flag file(s) in {}", files.len(), root.display());

    let mut outcomes = Vec::with_capacity(files.len());
    for file in files {
        report(Progress::Inspecting(&file));
        let outcome = dedup_file(&file, &dedup, config)?;
        report(Progress::Finished(&file, outcome));
        outcomes.push((file, outcome));
    }

    Ok(outcomes)
}
