//! One CSV row per request.

use super::ExportSource;

/// Fixed header row.
pub const CSV_HEADER: &str = "Folder,Request Name,Method,URL,Headers (JSON),Body Type,Body";

/// CSV exporter.
pub struct CsvExporter;

impl CsvExporter {
    /// Renders the table. Rows are joined with `\n`, without a trailing one.
    #[must_use]
    pub fn export(source: &ExportSource<'_>) -> String {
        let mut lines = vec![CSV_HEADER.to_string()];
        for (folder, request) in source.rows() {
            let headers =
                serde_json::to_string(&request.headers).unwrap_or_else(|_| "{}".to_string());
            let cells = [
                folder,
                request.name.as_str(),
                request.method.as_str(),
                request.url.as_str(),
                headers.as_str(),
                request.body_type.as_str(),
                request.body.as_str(),
            ];
            lines.push(
                cells
                    .iter()
                    .map(|cell| escape_cell(cell))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        lines.join("\n")
    }
}

/// Quotes a cell holding a comma, quote or newline; inner quotes are doubled.
#[must_use]
pub fn escape_cell(cell: &str) -> String {
    if cell.contains(['"', ',', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
