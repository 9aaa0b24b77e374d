//! `courier request ...`

use std::io::Write;

use anyhow::{Context, Result, bail};

use courier_domain::request::{find_header_key, remove_header};
use courier_domain::{ApiRequest, AuthDetails, BodyType, ExtractionRule, HttpMethod};
use courier_infrastructure::to_json_stable;

use super::{folder_id, request_id};
use crate::CliSession;
use crate::cli::{RequestCommand, RequestFields};

pub(super) async fn handle(
    command: RequestCommand,
    session: &mut CliSession,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        RequestCommand::List { folder } => {
            let folder = folder.map(|key| folder_id(session, &key)).transpose()?;
            for request in session.requests() {
                if folder.as_ref().is_some_and(|id| *id != request.folder_id) {
                    continue;
                }
                let folder_name = session
                    .folder(&request.folder_id)
                    .map(|f| f.name.as_str())
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{:<6} {}  [{folder_name} #{}]  {}  {}",
                    request.method, request.name, request.position, request.url, request.id
                )?;
            }
        }
        RequestCommand::Show { request } => {
            let id = request_id(session, &request)?;
            write!(out, "{}", to_json_stable(session.request(&id)?)?)?;
        }
        RequestCommand::Create { folder, fields } => {
            let folder = folder_id(session, &folder)?;
            let mut request = session.create_request(&folder).await?;
            if apply_fields(&mut request, &fields).await? {
                request = session.save_request(request).await?;
            }
            writeln!(out, "Created request {} ({})", request.name, request.id)?;
        }
        RequestCommand::Edit { request, fields } => {
            let id = request_id(session, &request)?;
            let mut request = session.request(&id)?.clone();
            if !apply_fields(&mut request, &fields).await? {
                bail!("nothing to change");
            }
            let saved = session.save_request(request).await?;
            writeln!(out, "Saved request {}", saved.name)?;
        }
        RequestCommand::Duplicate { request } => {
            let id = request_id(session, &request)?;
            let copy = session.duplicate_request(&id).await?;
            writeln!(out, "Created {} ({})", copy.name, copy.id)?;
        }
        RequestCommand::Delete { request } => {
            let id = request_id(session, &request)?;
            session.delete_request(&id).await?;
            writeln!(out, "Deleted request {request}")?;
        }
        RequestCommand::AddRule {
            request,
            json_path,
            variable,
        } => {
            let id = request_id(session, &request)?;
            let mut request = session.request(&id)?.clone();
            let rule = ExtractionRule::new(json_path, variable);
            if !rule.is_complete() {
                bail!("both a JSON path and a variable name are required");
            }
            writeln!(
                out,
                "Added rule {} ({} -> {})",
                rule.id, rule.json_path, rule.target_variable
            )?;
            request.extraction_rules.push(rule);
            session.save_request(request).await?;
        }
        RequestCommand::RemoveRule { request, rule } => {
            let id = request_id(session, &request)?;
            let mut request = session.request(&id)?.clone();
            let before = request.extraction_rules.len();
            request.extraction_rules.retain(|r| r.id != rule);
            if request.extraction_rules.len() == before {
                bail!("request has no rule {rule}");
            }
            session.save_request(request).await?;
            writeln!(out, "Removed rule {rule}")?;
        }
    }
    Ok(())
}

/// Applies the given fields. Returns whether anything was set.
async fn apply_fields(request: &mut ApiRequest, fields: &RequestFields) -> Result<bool> {
    let mut changed = false;

    if let Some(name) = &fields.name {
        if name.trim().is_empty() {
            bail!("request name cannot be blank");
        }
        request.name.clone_from(name);
        changed = true;
    }
    if let Some(method) = &fields.method {
        request.method = method.parse::<HttpMethod>()?;
        changed = true;
    }
    if let Some(url) = &fields.url {
        request.url.clone_from(url);
        changed = true;
    }
    for name in &fields.remove_headers {
        remove_header(&mut request.headers, name);
        changed = true;
    }
    for line in &fields.headers {
        let (name, value) = parse_header(line)?;
        if let Some(existing) = find_header_key(&request.headers, name).map(str::to_string) {
            request.headers.remove(&existing);
        }
        request.headers.insert(name.to_string(), value.to_string());
        changed = true;
    }
    if let Some(body_type) = &fields.body_type {
        request.body_type = body_type.parse::<BodyType>()?;
        changed = true;
    }
    if let Some(body) = &fields.body {
        request.body.clone_from(body);
        changed = true;
    }
    if let Some(path) = &fields.body_file {
        request.body = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        changed = true;
    }
    if let Some(token) = &fields.bearer {
        request.auth = AuthDetails::bearer(token.as_str());
        changed = true;
    }
    if let Some(credentials) = &fields.basic {
        let (username, password) = credentials.split_once(':').unwrap_or((credentials.as_str(), ""));
        request.auth = AuthDetails::basic(username, password);
        changed = true;
    }
    if fields.no_auth {
        request.auth = AuthDetails::None;
        changed = true;
    }

    Ok(changed)
}

fn parse_header(line: &str) -> Result<(&str, &str)> {
    let Some((name, value)) = line.split_once(':') else {
        bail!("header '{line}' must look like 'Name: value'");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("header '{line}' has no name");
    }
    Ok((name, value.trim()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_header() {
        assert_eq!(parse_header("Accept: */*").unwrap(), ("Accept", "*/*"));
        assert_eq!(
            parse_header("X-Url: http://a:1").unwrap(),
            ("X-Url", "http://a:1")
        );
        assert!(parse_header("no colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[tokio::test]
    async fn test_apply_fields() {
        let mut request = ApiRequest::new("f", "New Request").with_header("accept", "text/plain");
        let fields = RequestFields {
            name: Some("Login".to_string()),
            method: Some("post".to_string()),
            url: Some("{{base}}/login".to_string()),
            headers: vec!["Accept: application/json".to_string()],
            body_type: Some("json".to_string()),
            body: Some("{}".to_string()),
            basic: Some("ada:s3:cret".to_string()),
            ..RequestFields::default()
        };

        assert!(apply_fields(&mut request, &fields).await.unwrap());
        assert_eq!(request.name, "Login");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(request.body_type, BodyType::Json);
        assert_eq!(request.auth, AuthDetails::basic("ada", "s3:cret"));
    }

    #[tokio::test]
    async fn test_nothing_to_apply() {
        let mut request = ApiRequest::new("f", "r");
        assert!(!apply_fields(&mut request, &RequestFields::default()).await.unwrap());
    }

    #[tokio::test]
    async fn test_bad_method() {
        let mut request = ApiRequest::new("f", "r");
        let fields = RequestFields {
            method: Some("TRACE".to_string()),
            ..RequestFields::default()
        };
        assert!(apply_fields(&mut request, &fields).await.is_err());
    }
}
