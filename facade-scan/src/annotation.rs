//! Static extraction of export-path annotations from module source.
//!
//! The scanner recognizes a well-known decorator attached to top-level
//! definitions. Only column-zero occurrences count; anything indented is a
//! nested definition and never part of the public surface. Two spellings
//! are understood:
//!
//! ```python
//! @api_export("pkg.shapes.Widget")
//! class Widget: ...
//!
//! VERSION = api_export("pkg.VERSION")("1.2.3")
//! ```
//!
//! Every string literal inside the annotation's argument list is taken as
//! an export path, which handles a single string, several strings, and a
//! list of strings uniformly.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `def`, `async def`, or `class` at column zero and captures the
/// bound name.
static DEF_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:async\s+def|def|class)\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("definition pattern is valid")
});

/// Matches any string literal; export paths never contain quotes.
static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("literal pattern is valid"));

/// A top-level symbol found during scanning, with its declared export paths
/// in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedSymbol {
    pub name: String,
    pub paths: Vec<String>,
}

/// Scans module source for export annotations under a configurable
/// decorator name.
#[derive(Debug)]
pub struct AnnotationScanner {
    decorator_line: Regex,
    assignment_line: Regex,
}

impl AnnotationScanner {
    /// Build a scanner for the given decorator name.
    pub fn new(decorator: &str) -> Self {
        let escaped = regex::escape(decorator);
        let decorator_line = Regex::new(&format!(r"^@{escaped}\s*\("))
            .expect("escaped decorator pattern is valid");
        let assignment_line = Regex::new(&format!(
            r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*{escaped}\s*\((.*?)\)\s*\("
        ))
        .expect("escaped assignment pattern is valid");

        Self {
            decorator_line,
            assignment_line,
        }
    }

    /// Extract every annotated top-level symbol from `source`.
    ///
    /// Decorator arguments may span lines; stacked export decorators on one
    /// definition merge their paths in source order. A column-zero
    /// statement that is not a decorator or definition discards any
    /// decorator paths seen so far.
    pub fn scan(&self, source: &str) -> Vec<ScannedSymbol> {
        let lines: Vec<&str> = source.lines().collect();
        let mut symbols = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];

            if self.decorator_line.is_match(line) {
                let (args, next) = balanced_span(&lines, i);
                pending.extend(extract_paths(&args));
                i = next;
                continue;
            }

            if let Some(caps) = DEF_LINE.captures(line) {
                if !pending.is_empty() {
                    symbols.push(ScannedSymbol {
                        name: caps[1].to_string(),
                        paths: std::mem::take(&mut pending),
                    });
                }
                i += 1;
                continue;
            }

            if let Some(caps) = self.assignment_line.captures(line) {
                let paths = extract_paths(&caps[2]);
                if !paths.is_empty() {
                    symbols.push(ScannedSymbol {
                        name: caps[1].to_string(),
                        paths,
                    });
                }
                i += 1;
                continue;
            }

            if clears_pending(line) {
                pending.clear();
            }
            i += 1;
        }

        symbols
    }
}

/// Collect lines from `start` until the annotation's parentheses balance,
/// returning the joined text and the index of the first line after it.
fn balanced_span(lines: &[&str], start: usize) -> (String, usize) {
    let mut depth = 0i32;
    let mut text = String::new();
    let mut i = start;

    while i < lines.len() {
        let line = lines[i];
        for ch in line.chars() {
            match ch {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        text.push_str(line);
        text.push('\n');
        i += 1;
        if depth <= 0 {
            break;
        }
    }

    (text, i)
}

/// Every string literal in the annotation arguments is an export path.
fn extract_paths(args: &str) -> Vec<String> {
    STRING_LITERAL
        .captures_iter(args)
        .filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// A column-zero statement other than a decorator ends any pending
/// decorator stack. Blank, indented, and comment lines do not.
fn clears_pending(line: &str) -> bool {
    match line.chars().next() {
        None => false,
        Some('@') | Some('#') => false,
        Some(c) => !c.is_whitespace(),
    }
}
