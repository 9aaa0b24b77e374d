//! Indented plain-text outline.

use std::fmt::Write;

use courier_domain::BodyType;

use super::ExportSource;

/// Plain-text exporter.
pub struct TextExporter;

impl TextExporter {
    /// Renders the outline.
    #[must_use]
    pub fn export(source: &ExportSource<'_>) -> String {
        let mut out = format!("Project: {}\n\n", source.project.name);

        for folder in source.folders {
            let _ = writeln!(out, "Folder: {}", folder.name);
            let requests = source.requests_in(&folder.id);
            if requests.is_empty() {
                out.push_str("  (No requests in this folder)\n");
            }
            for request in requests {
                let _ = writeln!(out, "  - Request: {}", request.name);
                let _ = writeln!(out, "    {} {}", request.method, request.url);
                if !request.headers.is_empty() {
                    out.push_str("    Headers:\n");
                    for (key, value) in &request.headers {
                        let _ = writeln!(out, "      {key}: {value}");
                    }
                }
                if request.body_type != BodyType::None {
                    let _ = writeln!(
                        out,
                        "    Body ({}):\n      {}",
                        request.body_type,
                        request.body.replace('\n', "\n      ")
                    );
                }
                out.push('\n');
            }
            out.push_str("---\n");
        }

        out
    }
}
