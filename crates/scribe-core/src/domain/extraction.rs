//! Block extraction: raw model output to an ordered path -> content mapping.
//!
//! ````text
//! Some prose.
//! ```python            <- fence, optional language tag dropped
//! src/app.py:          <- filename hint (first line has ':' and more lines follow)
//! print("hi")          <- content
//! ```
//! ```
//! print("no hint")     <- single line, no usable hint: file_<n>.py
//! ```
//! ````
//!
//! Text outside fences is ignored. Paths are taken as declared; whether they
//! are safe to write is decided when the set is materialized.

use crate::domain::entities::ExtractedFileSet;

const FENCE: &str = "```";

/// Parse every fenced block in `text` into a file entry.
///
/// - The n-th block (1-based, counting every block) without a usable hint
///   becomes `file_<n>.py` with the whole block as content.
/// - A later block declaring the same path replaces the earlier content.
/// - An unterminated fence runs to the end of the input.
/// - No fences at all gives an empty set.
pub fn extract(text: &str) -> ExtractedFileSet {
    let mut files = ExtractedFileSet::new();

    for (index, block) in FencedBlocks::new(text).enumerate() {
        let block = trim_blank_lines(block);
        let (path, content) = match split_hint(&block) {
            Some((path, content)) => (path.to_string(), content),
            None => (format!("file_{}.py", index + 1), block),
        };
        files.insert(path, content);
    }

    files
}

/// Iterator over the raw inner text of each fenced region.
struct FencedBlocks<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> FencedBlocks<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for FencedBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.text.get(self.pos..)?;
        let open = rest.find(FENCE)?;
        let after_marker = self.pos + open + FENCE.len();

        let start = content_start(self.text, after_marker);
        let inner = &self.text[start..];

        match inner.find(FENCE) {
            Some(close) => {
                self.pos = start + close + FENCE.len();
                Some(&inner[..close])
            }
            None => {
                self.pos = self.text.len();
                Some(inner)
            }
        }
    }
}

/// Where block content begins after an opening marker.
///
/// If the rest of the marker line is empty or a language tag, content starts
/// on the next line. Otherwise the marker was inline and content starts right
/// after it.
fn content_start(text: &str, after_marker: usize) -> usize {
    let tail = &text[after_marker..];
    let (line, newline) = match tail.find('\n') {
        Some(n) => (&tail[..n], Some(n)),
        None => (tail, None),
    };

    if !is_language_tag(line.trim_end_matches('\r')) {
        return after_marker;
    }

    match newline {
        Some(n) => after_marker + n + 1,
        None => text.len(),
    }
}

fn is_language_tag(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '#'))
}

/// Drop leading and trailing whitespace-only lines, keeping the rest verbatim.
fn trim_blank_lines(block: &str) -> String {
    let lines: Vec<&str> = block.split('\n').collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());

    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Split `path:` off the first line of a multi-line block.
///
/// Returns `None` when the block has no usable hint: a single line, no colon
/// on the first line, or nothing before the colon.
fn split_hint(block: &str) -> Option<(&str, String)> {
    let (first, rest) = block.split_once('\n')?;
    let (path, _) = first.split_once(':')?;
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    Some((path, rest.trim_start_matches('\n').to_string()))
}
