//! `courier import` and `courier export`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use courier_domain::ExportFormat;
use courier_infrastructure::{ExportSource, export_collection, parse_collection};

use crate::CliSession;

pub(super) async fn import(session: &mut CliSession, file: &Path, out: &mut dyn Write) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let parsed = parse_collection(&content)?;

    for warning in &parsed.warnings {
        writeln!(out, "warning: {warning}")?;
    }

    let summary = session.import(parsed.plan).await?;
    writeln!(out, "{summary}")?;
    if summary.skipped > 0 {
        writeln!(out, "{} requests were skipped.", summary.skipped)?;
    }
    Ok(())
}

pub(super) async fn export(
    session: &CliSession,
    format: &str,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let project = session
        .selected_project()
        .context("no project selected; create or select one first")?;

    let source = ExportSource::new(project, session.folders(), session.requests());
    let document = export_collection(&source, format)?;

    let path = output.map_or_else(|| Path::new(&document.file_name).to_path_buf(), Path::to_path_buf);
    tokio::fs::write(&path, document.content.as_bytes())
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    writeln!(
        out,
        "Exported {} requests as {} to {}",
        session.requests().len(),
        format.display_name(),
        path.display()
    )?;
    Ok(())
}
