//! Fourslash fixtures for code fix tests.
//!
//! A fixture is written the way TypeScript's fourslash tests are:
//!
//! ```text
//! // @Filename: types.js
//! /////**
//! //// * @typedef {Object} Foo
//! //// * @property {Number} bar
//! //// */
//! ```
//!
//! Lines starting with `////` form the source file. `/*name*/` marks a
//! position and `[|...|]` marks a range; both are removed from the source.
//! Other lines are ignored apart from `// @Filename:`.

use anyhow::{Context, Result, anyhow, bail, ensure};
use once_cell::sync::Lazy;
use regex::Regex;
use tsz_checker::TypeChecker;
use tsz_common::TextSpan;
use tsz_lsp::{
    CodeFixAction, CodeFixContext, FileTextChanges, FormatCodeSettings, apply_text_changes,
    get_combined_code_fix, get_fixes_for_error_code,
};
use tsz_parser::ParserState;
use tracing::debug;

static SOURCE_LINE_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^\s*////(.*)$"));

static FILENAME_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"(?i)^\s*//\s*@filename\s*:\s*(\S+)"));

/// `/*name*/` markers and `[|` / `|]` range delimiters.
static MARKUP_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"/\*([A-Za-z0-9_$]*)\*/|\[\||\|\]"));

fn regex(re: &'static Lazy<Result<Regex, regex::Error>>) -> Result<&'static Regex> {
    Lazy::force(re)
        .as_ref()
        .map_err(|err| anyhow!("invalid fixture pattern: {err}"))
}

const DEFAULT_FILE_NAME: &str = "test.ts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub name: String,
    pub position: u32,
}

/// A parsed fixture: one source file with its markers and ranges.
#[derive(Debug, Clone)]
pub struct FourslashTest {
    pub file_name: String,
    pub source: String,
    pub markers: Vec<Marker>,
    pub ranges: Vec<TextSpan>,
    pub format_settings: FormatCodeSettings,
}

impl FourslashTest {
    pub fn parse(content: &str) -> Result<Self> {
        let source_line = regex(&SOURCE_LINE_RE)?;
        let filename = regex(&FILENAME_RE)?;

        let mut file_name = DEFAULT_FILE_NAME.to_string();
        let mut lines = Vec::new();
        for line in content.lines() {
            if let Some(cap) = source_line.captures(line) {
                lines.push(cap.get(1).map_or("", |m| m.as_str()));
            } else if let Some(cap) = filename.captures(line) {
                if let Some(name) = cap.get(1) {
                    file_name = name.as_str().to_string();
                }
            }
        }
        ensure!(!lines.is_empty(), "fixture has no `////` source lines");

        let (source, markers, ranges) = strip_markup(&lines.join("\n"))?;
        debug!(
            file = %file_name,
            markers = markers.len(),
            ranges = ranges.len(),
            "parsed fourslash fixture"
        );
        Ok(Self {
            file_name,
            source,
            markers,
            ranges,
            format_settings: FormatCodeSettings::default(),
        })
    }

    #[must_use]
    pub fn with_format_settings(mut self, format_settings: FormatCodeSettings) -> Self {
        self.format_settings = format_settings;
        self
    }

    #[must_use]
    pub fn marker(&self, name: &str) -> Option<u32> {
        self.markers
            .iter()
            .find(|marker| marker.name == name)
            .map(|marker| marker.position)
    }

    /// Fixes offered for `error_code` at the first range, else the first
    /// marker, else the first suggestion diagnostic in the file.
    pub fn code_fixes(&self, error_code: u32) -> Result<Vec<CodeFixAction>> {
        self.with_fix_context(error_code, get_fixes_for_error_code)
    }

    /// Apply the fix named by `description` and compare the whole file.
    pub fn verify_code_fix(
        &self,
        description: &str,
        error_code: u32,
        new_file_content: &str,
    ) -> Result<()> {
        let actions = self.code_fixes(error_code)?;
        let action = actions
            .iter()
            .find(|action| action.description == description)
            .with_context(|| {
                let offered: Vec<&str> = actions.iter().map(|a| a.description.as_str()).collect();
                format!("no fix {description:?} for error {error_code}; offered {offered:?}")
            })?;
        let actual = self.apply(&action.changes)?;
        expect_content(new_file_content, &actual)
    }

    pub fn verify_code_fix_not_available(&self, error_code: u32) -> Result<()> {
        let actions = self.code_fixes(error_code)?;
        ensure!(
            actions.is_empty(),
            "expected no fixes for error {error_code}, got {:?}",
            actions.iter().map(|a| &a.description).collect::<Vec<_>>()
        );
        Ok(())
    }

    /// Apply the fix-all for `fix_id` and compare the whole file.
    pub fn verify_code_fix_all(&self, fix_id: &str, new_file_content: &str) -> Result<()> {
        let combined = self
            .with_fix_context(0, |context| get_combined_code_fix(fix_id, context))?
            .with_context(|| format!("no fix-all registered for {fix_id:?}"))?;
        let actual = self.apply(&combined.changes)?;
        expect_content(new_file_content, &actual)
    }

    fn with_fix_context<R>(
        &self,
        error_code: u32,
        f: impl FnOnce(&CodeFixContext<'_>) -> R,
    ) -> Result<R> {
        let mut parser = ParserState::new(self.file_name.clone(), self.source.clone());
        let root = parser.parse_source_file();
        let arena = parser.get_arena();
        let checker = TypeChecker::new(arena, root, self.file_name.as_str());

        let span = if let Some(&range) = self.ranges.first() {
            range
        } else if let Some(marker) = self.markers.first() {
            TextSpan::new(marker.position, 0)
        } else {
            let diagnostic = checker
                .get_suggestion_diagnostics(arena, root)
                .into_iter()
                .next()
                .context("fixture has no range, marker or suggestion to anchor the fix")?;
            TextSpan::new(diagnostic.start, diagnostic.length)
        };

        let context = CodeFixContext {
            file_name: &self.file_name,
            source_text: &self.source,
            arena,
            root,
            checker: &checker,
            error_code,
            span,
            format_settings: &self.format_settings,
        };
        Ok(f(&context))
    }

    fn apply(&self, changes: &[FileTextChanges]) -> Result<String> {
        let mut text = self.source.clone();
        for file in changes {
            ensure!(
                file.file_name == self.file_name,
                "edit for unexpected file {:?}",
                file.file_name
            );
            text = apply_text_changes(&text, &file.text_changes);
        }
        Ok(text)
    }
}

fn expect_content(expected: &str, actual: &str) -> Result<()> {
    if expected != actual {
        bail!("file content mismatch\n--- expected\n{expected}\n--- actual\n{actual}");
    }
    Ok(())
}

/// Remove markers and range delimiters, recording their offsets in the
/// stripped text.
fn strip_markup(text: &str) -> Result<(String, Vec<Marker>, Vec<TextSpan>)> {
    let markup = regex(&MARKUP_RE)?;
    let mut source = String::with_capacity(text.len());
    let mut markers = Vec::new();
    let mut ranges = Vec::new();
    let mut open_ranges: Vec<u32> = Vec::new();
    let mut last = 0;

    for cap in markup.captures_iter(text) {
        let Some(whole) = cap.get(0) else {
            continue;
        };
        source.push_str(&text[last..whole.start()]);
        last = whole.end();
        let position = u32::try_from(source.len()).context("fixture too large")?;
        match whole.as_str() {
            "[|" => open_ranges.push(position),
            "|]" => {
                let start = open_ranges
                    .pop()
                    .with_context(|| format!("unmatched `|]` at offset {position}"))?;
                ranges.push(TextSpan::from_bounds(start, position));
            }
            _ => markers.push(Marker {
                name: cap.get(1).map_or("", |m| m.as_str()).to_string(),
                position,
            }),
        }
    }
    source.push_str(&text[last..]);

    if let Some(start) = open_ranges.last() {
        bail!("unclosed `[|` at offset {start}");
    }
    ranges.sort_by_key(|range| range.start);
    Ok((source, markers, ranges))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_lines() {
        let fixture = "/// <reference path='fourslash.ts' />\n\n/////**\n//// * @typedef {Object} Foo\n//// */\n\nverify.codeFix({});";
        let test = FourslashTest::parse(fixture).expect("fixture");
        assert_eq!(test.file_name, "test.ts");
        assert_eq!(test.source, "/**\n * @typedef {Object} Foo\n */");
        assert!(test.markers.is_empty());
        assert!(test.ranges.is_empty());
    }

    #[test]
    fn test_markers_and_ranges_are_stripped() {
        let fixture = "// @Filename: a.js\n////let /*x*/x = [|1|];\n/////**/let y;";
        let test = FourslashTest::parse(fixture).expect("fixture");
        assert_eq!(test.file_name, "a.js");
        assert_eq!(test.source, "let x = 1;\nlet y;");
        assert_eq!(test.marker("x"), Some(4));
        assert_eq!(test.marker(""), Some(11));
        assert_eq!(test.ranges, vec![TextSpan::new(8, 1)]);
    }

    #[test]
    fn test_jsdoc_openers_are_not_markers() {
        let fixture = "/////** @typedef {string} S */";
        let test = FourslashTest::parse(fixture).expect("fixture");
        assert_eq!(test.source, "/** @typedef {string} S */");
        assert!(test.markers.is_empty());
    }

    #[test]
    fn test_unbalanced_ranges_are_errors() {
        assert!(FourslashTest::parse("////[|let x;").is_err());
        assert!(FourslashTest::parse("////let x;|]").is_err());
        assert!(FourslashTest::parse("verify.codeFix({});").is_err());
    }
}
