//! `courier project ...`

use std::io::Write;

use anyhow::Result;

use super::project_id;
use crate::CliSession;
use crate::cli::ProjectCommand;

pub(super) async fn handle(
    command: ProjectCommand,
    session: &mut CliSession,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        ProjectCommand::List => {
            let selected = session.selected_project().map(|p| p.id.clone());
            if session.projects().is_empty() {
                writeln!(out, "No projects yet. Create one with `courier project create <name>`.")?;
            }
            for project in session.projects() {
                let marker = if selected.as_deref() == Some(project.id.as_str()) { "*" } else { " " };
                write!(out, "{marker} {}  {}", project.name, project.id)?;
                if let Some(description) = &project.description {
                    write!(out, "  ({description})")?;
                }
                writeln!(out)?;
            }
        }
        ProjectCommand::Create { name, description } => {
            let project = session.create_project(&name, description).await?;
            writeln!(out, "Created project {} ({})", project.name, project.id)?;
        }
        ProjectCommand::Select { project } => {
            let id = project_id(session, &project)?;
            session.select_project(&id).await?;
            if let Some(project) = session.selected_project() {
                writeln!(out, "Selected project {}", project.name)?;
            }
        }
        ProjectCommand::Delete { project } => {
            let id = project_id(session, &project)?;
            session.delete_project(&id).await?;
            writeln!(out, "Deleted project {project}")?;
        }
    }
    Ok(())
}
