//! `scribe extract`: preview what a response would write. Touches no files.

use serde::Serialize;
use tracing::instrument;

use scribe_core::domain::{RelativePath, extract};

use super::{input_file, read_input};
use crate::{
    cli::{ExtractArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

/// One extracted file as shown to the user.
#[derive(Debug, Serialize)]
struct FileRow<'a> {
    path: &'a str,
    lines: usize,
    bytes: usize,
    /// `false` when materializing would reject the path.
    safe: bool,
}

impl<'a> FileRow<'a> {
    fn new(path: &'a str, content: &str) -> Self {
        Self {
            path,
            lines: content.lines().count(),
            bytes: content.len(),
            safe: RelativePath::try_new(path).is_ok(),
        }
    }
}

#[instrument(skip_all)]
pub fn execute(args: ExtractArgs, output: OutputManager) -> CliResult<()> {
    let raw = read_input(input_file(args.input.as_ref()))?;
    let files = extract(&raw);
    let rows: Vec<FileRow<'_>> = files.iter().map(|(p, c)| FileRow::new(p, c)).collect();

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            if rows.is_empty() {
                output.warning("No fenced code blocks found")?;
                return Ok(());
            }
            output.header(&format!("{} file(s) in response:", rows.len()))?;
            for row in &rows {
                let flag = if row.safe { "" } else { "  [unsafe path, would be rejected]" };
                output.print(&format!(
                    "  {:<40} {:>5} lines {:>7} bytes{flag}",
                    row.path, row.lines, row.bytes
                ))?;
            }
        }
        ListFormat::List => {
            for row in &rows {
                output.raw(row.path)?;
            }
        }
        ListFormat::Json => output.json(&files)?,
        ListFormat::Csv => {
            output.raw("path,lines,bytes,safe")?;
            for row in &rows {
                output.raw(&format!("{},{},{},{}", row.path, row.lines, row.bytes, row.safe))?;
            }
        }
    }

    Ok(())
}
