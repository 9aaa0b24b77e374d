//! `courier run`, `courier move` and `courier compare`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use courier_application::{ExecuteError, RequestExecutor};
use courier_domain::{ApiResponse, DropPlacement, DropTarget};
use courier_infrastructure::{ReqwestTransport, diff_documents};

use super::{folder_id, request_id};
use crate::CliSession;
use crate::cli::MoveArgs;

fn executor() -> Result<RequestExecutor<ReqwestTransport>> {
    let transport = ReqwestTransport::new()?;
    Ok(RequestExecutor::new(std::sync::Arc::new(transport)))
}

pub(super) async fn run(
    session: &mut CliSession,
    request: &str,
    payload: Option<&Path>,
    show_headers: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let id = request_id(session, request)?;
    let payload = match payload {
        Some(path) => Some(
            tokio::fs::read(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?,
        ),
        None => None,
    };
    let executor = executor()?;

    let slot = session.run_slot();
    let run = session.run_request(&executor, &id, payload);
    tokio::pin!(run);
    let outcome = tokio::select! {
        result = &mut run => result?,
        _ = tokio::signal::ctrl_c() => {
            slot.cancel();
            run.await?
        }
    };

    print_response(&outcome.response, show_headers, out)?;
    if let Some(extraction) = &outcome.extraction {
        writeln!(out)?;
        for (variable, value) in &extraction.assigned {
            writeln!(
                out,
                "Set {variable} = {value} in {}",
                extraction.environment.name
            )?;
        }
    }
    if let Some(error) = &outcome.save_error {
        writeln!(out, "warning: extracted variables were not saved: {error}")?;
    }
    Ok(())
}

fn print_response(response: &ApiResponse, show_headers: bool, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", response.summary())?;
    if show_headers {
        for (name, value) in &response.headers {
            writeln!(out, "{name}: {value}")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "{}", response.body.pretty())?;
    Ok(())
}

pub(super) async fn move_request(
    session: &mut CliSession,
    args: &MoveArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let id = request_id(session, &args.request)?;

    let moved = match (&args.to, args.index, &args.before, &args.after) {
        (Some(folder), Some(index), _, _) => {
            let folder = folder_id(session, folder)?;
            session.move_request(&id, &folder, index).await?;
            true
        }
        (Some(folder), None, _, _) => {
            let target = DropTarget::Folder(folder_id(session, folder)?);
            session.drop_request(&id, &target).await?
        }
        (None, _, Some(anchor), _) => {
            let target = DropTarget::Request {
                id: request_id(session, anchor)?,
                placement: DropPlacement::Above,
            };
            session.drop_request(&id, &target).await?
        }
        (None, _, None, Some(anchor)) => {
            let target = DropTarget::Request {
                id: request_id(session, anchor)?,
                placement: DropPlacement::Below,
            };
            session.drop_request(&id, &target).await?
        }
        (None, _, None, None) => false,
    };

    let request = session.request(&id)?;
    if moved {
        let folder = session.folder(&request.folder_id)?;
        writeln!(
            out,
            "Moved {} to {} #{}",
            request.name, folder.name, request.position
        )?;
    } else {
        writeln!(out, "{} stays where it is", request.name)?;
    }
    Ok(())
}

pub(super) async fn compare(
    session: &mut CliSession,
    left: &str,
    right: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let left_id = request_id(session, left)?;
    let right_id = request_id(session, right)?;
    let executor = executor()?;

    let slots = session.compare_slots();
    let compare = session.compare_requests(&executor, &left_id, &right_id);
    tokio::pin!(compare);
    let (left_result, right_result) = tokio::select! {
        result = &mut compare => result?,
        _ = tokio::signal::ctrl_c() => {
            for slot in &slots {
                slot.cancel();
            }
            compare.await?
        }
    };

    let describe = |result: &Result<ApiResponse, ExecuteError>| match result {
        Ok(response) => response.summary(),
        Err(error) => format!("failed: {error}"),
    };
    writeln!(out, "Left:  {left}  {}", describe(&left_result))?;
    writeln!(out, "Right: {right}  {}", describe(&right_result))?;

    let (Ok(left_response), Ok(right_response)) = (&left_result, &right_result) else {
        return Ok(());
    };
    let diff = diff_documents(&left_response.body.pretty(), &right_response.body.pretty());
    writeln!(out)?;
    if diff.is_identical() {
        writeln!(out, "Bodies are identical.")?;
    } else {
        let (added, removed) = diff.counts();
        write!(out, "{}", diff.render())?;
        writeln!(out, "\n{added} added, {removed} removed")?;
    }
    Ok(())
}
