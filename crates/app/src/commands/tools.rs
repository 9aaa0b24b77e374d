//! `courier jwt`, `courier diff` and `courier proxy`.

use std::io::Write;

use anyhow::{Context, Result, bail};

use courier_domain::{SavedComparison, SavedToken};
use courier_infrastructure::{decode_jwt, diff_documents};

use crate::CliSession;
use crate::cli::{DiffCommand, JwtCommand, ProxyCommand};

pub(super) async fn jwt(command: JwtCommand, session: &CliSession, out: &mut dyn Write) -> Result<()> {
    let preferences = session.preferences();
    match command {
        JwtCommand::Decode { token } => {
            let saved = preferences.tokens().await?;
            let token = saved
                .iter()
                .find(|t| t.name == token || t.id == token)
                .map_or(token.as_str(), |t| t.token.as_str());

            let decoded = decode_jwt(token)?;
            writeln!(out, "Header:")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&decoded.header)?)?;
            writeln!(out, "\nPayload:")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&decoded.payload)?)?;
        }
        JwtCommand::List => {
            for token in preferences.tokens().await? {
                writeln!(out, "{}  {}", token.name, token.id)?;
            }
        }
        JwtCommand::Save { name, token } => {
            let saved = SavedToken::new(name, token)?;
            writeln!(out, "Saved token {} ({})", saved.name, saved.id)?;
            preferences.save_token(saved).await?;
        }
        JwtCommand::Delete { id } => {
            if !preferences.delete_token(&id).await? {
                bail!("no saved token {id}");
            }
            writeln!(out, "Deleted token {id}")?;
        }
    }
    Ok(())
}

fn print_diff(left: &str, right: &str, out: &mut dyn Write) -> Result<()> {
    let diff = diff_documents(left, right);
    if diff.is_identical() {
        writeln!(out, "Documents are identical.")?;
        return Ok(());
    }
    let (added, removed) = diff.counts();
    write!(out, "{}", diff.render())?;
    writeln!(out, "\n{added} added, {removed} removed")?;
    Ok(())
}

async fn read(path: &std::path::Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

pub(super) async fn diff(command: DiffCommand, session: &CliSession, out: &mut dyn Write) -> Result<()> {
    let preferences = session.preferences();
    match command {
        DiffCommand::Files { left, right } => {
            print_diff(&read(&left).await?, &read(&right).await?, out)?;
        }
        DiffCommand::Show { comparison } => {
            let saved = preferences.comparisons().await?;
            let Some(found) = saved
                .iter()
                .find(|c| c.id == comparison || c.name == comparison)
            else {
                bail!("no saved comparison matches '{comparison}'");
            };
            print_diff(&found.json_a, &found.json_b, out)?;
        }
        DiffCommand::List => {
            for comparison in preferences.comparisons().await? {
                writeln!(out, "{}  {}", comparison.name, comparison.id)?;
            }
        }
        DiffCommand::Save { name, left, right } => {
            let saved = SavedComparison::new(name, read(&left).await?, read(&right).await?)?;
            writeln!(out, "Saved comparison {} ({})", saved.name, saved.id)?;
            preferences.save_comparison(saved).await?;
        }
        DiffCommand::Delete { id } => {
            if !preferences.delete_comparison(&id).await? {
                bail!("no saved comparison {id}");
            }
            writeln!(out, "Deleted comparison {id}")?;
        }
    }
    Ok(())
}

pub(super) async fn proxy(command: ProxyCommand, session: &CliSession, out: &mut dyn Write) -> Result<()> {
    let preferences = session.preferences();
    match command {
        ProxyCommand::Show => match preferences.proxy_template().await? {
            Some(template) => writeln!(out, "{template}")?,
            None => writeln!(out, "No proxy configured")?,
        },
        ProxyCommand::Set { template } => {
            preferences.set_proxy_template(&template).await?;
            writeln!(out, "Proxy set to {template}")?;
        }
        ProxyCommand::Clear => {
            preferences.set_proxy_template("").await?;
            writeln!(out, "Proxy cleared")?;
        }
    }
    Ok(())
}
