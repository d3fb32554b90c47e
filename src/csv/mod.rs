//! CSV table parsing for the two mapping tables.
//!
//! This module turns raw delimited text into an ordered table of rows, each
//! row an ordered mapping from header name to cell value. The dialect is the
//! one the mapping tables have always used: comma-delimited, line-feed row
//! separator, optional double-quote field quoting.
//!
//! # Dialect
//!
//! The splitter scans character by character. A double quote toggles the
//! "inside quoted field" state and is never emitted; a comma outside quotes
//! ends the current field; everything else accumulates. After splitting,
//! every cell is trimmed and stripped of any residual double quotes. The
//! header line is split the same way.
//!
//! Deliberate leniencies, matching the source data this tool has to accept:
//! - A row with fewer fields than headers pads the missing cells with empty
//!   strings.
//! - Rows whose every cell is empty after trimming are dropped, so blank
//!   lines between data rows are tolerated.
//! - Malformed quoting is not an error: an unbalanced quote simply changes
//!   how the rest of that line splits.
//! - `""` inside a quoted field is NOT an escaped quote; both characters are
//!   stripped. The tables never use escaped quotes.
//!
//! Parsing is a pure function of the input text: no I/O, no logging, no
//! hidden state.
//!
//! # Examples
//!
//! ```rust
//! use rpcfinder_cli::csv::parse_table;
//!
//! let table = parse_table("rpc_name,rpc_class\ntestRI,\"jp.co,testRIclass\"\n");
//! assert_eq!(table.headers, vec!["rpc_name", "rpc_class"]);
//! assert_eq!(table.rows[0].get("rpc_class"), Some("jp.co,testRIclass"));
//! ```

/// A single parsed row: an ordered mapping from header name to cell value.
///
/// Cells keep the column order of the header line. Lookup is linear, which
/// is fine for tables with a handful of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<(String, String)>,
}

impl TableRow {
    /// Look up a cell value by header name.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.iter().find(|(name, _)| name == header).map(|(_, value)| value.as_str())
    }

    /// Iterate over the cell values in header order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, value)| value.as_str())
    }

    /// True if every cell in this row is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.values().all(str::is_empty)
    }
}

/// A parsed table: the header names plus the surviving data rows, in source
/// order.
///
/// Headers are exposed separately from the rows so a consumer can tell a
/// table that is merely empty from one that is missing a required column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Header names from the first line, trimmed and unquoted
    pub headers: Vec<String>,
    /// Data rows in source order, blank rows dropped
    pub rows: Vec<TableRow>,
}

/// Parse delimited text into a [`Table`].
///
/// The first line is the header; each subsequent line becomes one row keyed
/// by the header names. Rows where every produced value is empty are
/// dropped. Given identical input, the output is identical.
#[must_use]
pub fn parse_table(text: &str) -> Table {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Table::default();
    }

    let mut lines = trimmed.split('\n');
    let headers = match lines.next() {
        Some(line) => split_line(line),
        None => return Table::default(),
    };

    let rows = lines
        .map(|line| {
            let fields = split_line(line);
            let cells = headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    // Short rows pad with empty strings; extra fields are ignored.
                    (header.clone(), fields.get(i).cloned().unwrap_or_default())
                })
                .collect();
            TableRow { cells }
        })
        .filter(|row| !row.is_blank())
        .collect();

    Table { headers, rows }
}

/// Split one line into fields, honoring double-quote quoting.
///
/// A quote character toggles the in-quotes state; a comma outside quotes
/// ends the current field; the final field is flushed at end of line. Each
/// field is trimmed and stripped of any remaining quote characters.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(finish_field(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(finish_field(&mut current));

    fields
}

fn finish_field(buffer: &mut String) -> String {
    let value = buffer.trim().replace('"', "");
    buffer.clear();
    value
}
