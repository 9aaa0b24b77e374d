//! `courier folder ...`

use std::io::Write;

use anyhow::Result;

use super::folder_id;
use crate::CliSession;
use crate::cli::FolderCommand;

pub(super) async fn handle(
    command: FolderCommand,
    session: &mut CliSession,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        FolderCommand::List => {
            for folder in session.folders() {
                writeln!(out, "{}  {}", folder.name, folder.id)?;
                for request in session.folder_requests(&folder.id) {
                    writeln!(
                        out,
                        "  {:>2}. {:<6} {}  {}",
                        request.position, request.method, request.name, request.url
                    )?;
                }
            }
        }
        FolderCommand::Create { name } => {
            let folder = session.create_folder(&name).await?;
            writeln!(out, "Created folder {} ({})", folder.name, folder.id)?;
        }
        FolderCommand::Rename { folder, name } => {
            let id = folder_id(session, &folder)?;
            session.rename_folder(&id, &name).await?;
            writeln!(out, "Renamed folder to {name}")?;
        }
        FolderCommand::Delete { folder } => {
            let id = folder_id(session, &folder)?;
            session.delete_folder(&id).await?;
            writeln!(out, "Deleted folder {folder}")?;
        }
    }
    Ok(())
}
