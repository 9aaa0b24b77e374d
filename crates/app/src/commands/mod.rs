//! Command handlers.

mod env;
mod folder;
mod project;
mod request;
mod run;
mod tools;
mod transfer;

use std::io::Write;

use anyhow::{Result, bail};

use crate::CliSession;
use crate::cli::Command;

/// Runs `command` against `session`.
///
/// # Errors
///
/// Returns the error of the failed operation.
pub async fn dispatch(command: Command, session: &mut CliSession, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Project(command) => project::handle(command, session, out).await,
        Command::Folder(command) => folder::handle(command, session, out).await,
        Command::Request(command) => request::handle(command, session, out).await,
        Command::Env(command) => env::handle(command, session, out).await,
        Command::Run {
            request,
            payload,
            headers,
        } => run::run(session, &request, payload.as_deref(), headers, out).await,
        Command::Move(args) => run::move_request(session, &args, out).await,
        Command::Compare { left, right } => run::compare(session, &left, &right, out).await,
        Command::Import { file } => transfer::import(session, &file, out).await,
        Command::Export { format, output } => {
            transfer::export(session, &format, output.as_deref(), out).await
        }
        Command::Jwt(command) => tools::jwt(command, session, out).await,
        Command::Diff(command) => tools::diff(command, session, out).await,
        Command::Proxy(command) => tools::proxy(command, session, out).await,
    }
}

/// Finds an item by exact id, then by exact name.
///
/// A name shared by several items is rejected so the caller can pass an id.
fn lookup<'a, T>(
    items: &'a [T],
    key: &str,
    kind: &str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) -> Result<&'a T> {
    if let Some(found) = items.iter().find(|item| id(item) == key) {
        return Ok(found);
    }
    let mut named = items.iter().filter(|item| name(item) == key);
    match (named.next(), named.next()) {
        (Some(found), None) => Ok(found),
        (Some(_), Some(_)) => bail!("more than one {kind} is named '{key}'; use its id"),
        (None, _) => bail!("no {kind} matches '{key}'"),
    }
}

fn project_id(session: &CliSession, key: &str) -> Result<String> {
    lookup(session.projects(), key, "project", |p| p.id.as_str(), |p| p.name.as_str()).map(|p| p.id.clone())
}

fn folder_id(session: &CliSession, key: &str) -> Result<String> {
    lookup(session.folders(), key, "folder", |f| f.id.as_str(), |f| f.name.as_str()).map(|f| f.id.clone())
}

fn request_id(session: &CliSession, key: &str) -> Result<String> {
    lookup(session.requests(), key, "request", |r| r.id.as_str(), |r| r.name.as_str()).map(|r| r.id.clone())
}

fn environment_id(session: &CliSession, key: &str) -> Result<String> {
    lookup(session.environments(), key, "environment", |e| e.id.as_str(), |e| e.name.as_str())
        .map(|e| e.id.clone())
}
