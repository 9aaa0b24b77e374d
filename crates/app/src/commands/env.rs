//! `courier env ...`

use std::io::Write;

use anyhow::{Result, bail};

use super::environment_id;
use crate::CliSession;
use crate::cli::EnvCommand;

pub(super) async fn handle(
    command: EnvCommand,
    session: &mut CliSession,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        EnvCommand::List => {
            let active = session.active_environment().map(|e| e.id.clone());
            for environment in session.environments() {
                let marker = if active.as_deref() == Some(environment.id.as_str()) { "*" } else { " " };
                writeln!(
                    out,
                    "{marker} {}  ({} variables)  {}",
                    environment.name,
                    environment.variables.len(),
                    environment.id
                )?;
            }
        }
        EnvCommand::Show { environment } => {
            let id = environment_id(session, &environment)?;
            for (key, value) in &session.environment(&id)?.variables {
                writeln!(out, "{key}={value}")?;
            }
        }
        EnvCommand::Create { name } => {
            let environment = session.create_environment(&name).await?;
            writeln!(out, "Created environment {} ({})", environment.name, environment.id)?;
        }
        EnvCommand::Rename { environment, name } => {
            let id = environment_id(session, &environment)?;
            session.rename_environment(&id, &name).await?;
            writeln!(out, "Renamed environment to {name}")?;
        }
        EnvCommand::Set {
            environment,
            key,
            value,
        } => {
            let id = environment_id(session, &environment)?;
            session.set_variable(&id, &key, &value).await?;
            writeln!(out, "Set {key} in {environment}")?;
        }
        EnvCommand::Unset { environment, key } => {
            let id = environment_id(session, &environment)?;
            if !session.remove_variable(&id, &key).await? {
                bail!("{environment} has no variable {key}");
            }
            writeln!(out, "Removed {key} from {environment}")?;
        }
        EnvCommand::Delete { environment } => {
            let id = environment_id(session, &environment)?;
            session.delete_environment(&id).await?;
            writeln!(out, "Deleted environment {environment}")?;
        }
        EnvCommand::Select { environment } => match environment {
            Some(key) => {
                let id = environment_id(session, &key)?;
                session.select_environment(Some(&id)).await?;
                writeln!(out, "Active environment: {key}")?;
            }
            None => {
                session.select_environment(None).await?;
                writeln!(out, "No active environment")?;
            }
        },
    }
    Ok(())
}
