//! Turns a Postman collection into an import plan.
//!
//! Nested folders are flattened: every folder node becomes one folder named
//! after the node, deduplicated by name. The collection itself contributes a
//! top-level folder holding its loose requests.

use serde_json::Value;

use courier_domain::{
    BodyType, FormDataEntry, HeaderMap, HttpMethod, ImportPlan, PlannedRequest, encode_form_data,
};

use super::types::{PostmanBody, PostmanCollection, PostmanHeader, PostmanItem, PostmanRequest};
use super::warning::ImportWarning;
use crate::import::ImportError;

/// Name used for a collection or folder that has none.
pub const UNTITLED_COLLECTION: &str = "Imported Collection";
const UNTITLED_FOLDER: &str = "Untitled Folder";
const UNTITLED_REQUEST: &str = "Untitled Request";

/// Result of parsing a collection.
#[derive(Debug, Clone, Default)]
pub struct ParsedCollection {
    /// Folders and requests to create
    pub plan: ImportPlan,
    /// Items that were skipped or adjusted
    pub warnings: Vec<ImportWarning>,
}

/// Parses a Postman collection document.
///
/// # Errors
///
/// Returns [`ImportError::InvalidJson`] when `content` is not JSON and
/// [`ImportError::InvalidFormat`] when `info` or the `item` array is missing.
pub fn parse_collection(content: &str) -> Result<ParsedCollection, ImportError> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    let has_info = document.get("info").is_some_and(|info| !info.is_null());
    let has_items = document.get("item").is_some_and(Value::is_array);
    if !has_info || !has_items {
        return Err(ImportError::InvalidFormat);
    }

    let collection: PostmanCollection =
        serde_json::from_value(document).map_err(|_| ImportError::InvalidFormat)?;

    let mut parser = Parser::default();
    let root = non_blank(&collection.info.name, UNTITLED_COLLECTION);
    parser.plan.collection_name.clone_from(&root);
    parser.plan.add_folder(&root);

    for item in collection.item {
        parser.visit(item, &root, &root);
    }

    tracing::debug!(
        collection = %root,
        folders = parser.plan.folders.len(),
        requests = parser.plan.requests.len(),
        "parsed postman collection"
    );

    Ok(ParsedCollection {
        plan: parser.plan,
        warnings: parser.warnings,
    })
}

fn non_blank(name: &str, fallback: &str) -> String {
    if name.trim().is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

#[derive(Default)]
struct Parser {
    plan: ImportPlan,
    warnings: Vec<ImportWarning>,
}

impl Parser {
    fn visit(&mut self, item: PostmanItem, folder: &str, path: &str) {
        if let Some(children) = item.item {
            let name = non_blank(&item.name, UNTITLED_FOLDER);
            let child_path = format!("{path}/{name}");
            self.plan.add_folder(&name);
            for child in children {
                self.visit(child, &name, &child_path);
            }
        } else if let Some(request) = item.request {
            let name = non_blank(&item.name, UNTITLED_REQUEST);
            let item_path = format!("{path}/{name}");
            let planned = self.plan_request(folder, name, request, &item_path);
            self.plan.requests.push(planned);
        } else {
            self.warnings.push(ImportWarning::new(
                format!("{path}/{}", item.name),
                "item is neither a folder nor a request",
            ));
        }
    }

    fn plan_request(
        &mut self,
        folder: &str,
        name: String,
        request: PostmanRequest,
        path: &str,
    ) -> PlannedRequest {
        let method = match request.method.as_deref() {
            None => HttpMethod::Get,
            Some(raw) => raw.parse::<HttpMethod>().unwrap_or_else(|_| {
                self.warnings.push(ImportWarning::new(
                    path,
                    format!("unsupported method {raw}, using GET"),
                ));
                HttpMethod::Get
            }),
        };

        let (body_type, body) = map_body(request.body.as_ref());
        if request
            .body
            .as_ref()
            .is_some_and(|b| b.mode == "formdata" && b.formdata.iter().flatten().any(|f| !f.is_text()))
        {
            self.warnings
                .push(ImportWarning::new(path, "file form fields were dropped"));
        }

        PlannedRequest {
            folder_name: folder.to_string(),
            name,
            method,
            url: request
                .url
                .as_ref()
                .map(|url| url.raw().to_string())
                .unwrap_or_default(),
            headers: map_headers(&request.header),
            body_type,
            body,
            position: self.plan.next_position(folder),
        }
    }
}

fn map_headers(headers: &[PostmanHeader]) -> HeaderMap {
    headers
        .iter()
        .filter(|h| !h.disabled && !h.key.is_empty())
        .map(|h| (h.key.clone(), h.value.clone()))
        .collect()
}

fn map_body(body: Option<&PostmanBody>) -> (BodyType, String) {
    let Some(body) = body else {
        return (BodyType::None, String::new());
    };

    match body.mode.as_str() {
        "raw" => {
            let raw = body.raw.clone().unwrap_or_default();
            if serde_json::from_str::<Value>(&raw).is_ok() {
                (BodyType::Json, raw)
            } else {
                (BodyType::Text, raw)
            }
        }
        "formdata" => {
            let entries: Vec<FormDataEntry> = body
                .formdata
                .iter()
                .flatten()
                .filter(|field| !field.disabled && field.is_text())
                .map(|field| FormDataEntry::new(field.key.clone(), field.value.clone()))
                .collect();
            (BodyType::FormData, encode_form_data(&entries))
        }
        "file" => (BodyType::Binary, String::new()),
        _ => (BodyType::None, String::new()),
    }
}
