//! Thunder Client collection exporter.

use serde::Serialize;

use courier_domain::{ApiRequest, BodyType, parse_form_data};

use super::{ExportError, ExportSource, to_json};

const THUNDER_CLIENT: &str = "Thunder Client";
const THUNDER_VERSION: &str = "1.1";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThunderCollection {
    client: &'static str,
    collection_name: String,
    date_exported: String,
    version: &'static str,
    folders: Vec<ThunderFolder>,
    requests: Vec<ThunderRequest>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThunderFolder {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    container_id: String,
    sort_num: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThunderRequest {
    #[serde(rename = "_id")]
    id: String,
    col_id: String,
    container_id: String,
    name: String,
    url: String,
    method: &'static str,
    sort_num: u32,
    created: String,
    modified: String,
    headers: Vec<ThunderPair>,
    params: Vec<ThunderPair>,
    body: ThunderBody,
    tests: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct ThunderPair {
    name: String,
    value: String,
}

#[derive(Serialize)]
struct ThunderBody {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    form: Option<Vec<ThunderPair>>,
}

/// Thunder Client exporter.
pub struct ThunderExporter;

impl ThunderExporter {
    /// Renders the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export(source: &ExportSource<'_>) -> Result<String, ExportError> {
        let stamp = source.timestamp();
        let collection = ThunderCollection {
            client: THUNDER_CLIENT,
            collection_name: source.project.name.clone(),
            date_exported: stamp.clone(),
            version: THUNDER_VERSION,
            folders: source
                .folders
                .iter()
                .map(|folder| ThunderFolder {
                    id: folder.id.clone(),
                    name: folder.name.clone(),
                    container_id: String::new(),
                    sort_num: 0,
                })
                .collect(),
            requests: source
                .rows()
                .into_iter()
                .map(|(_, request)| ThunderRequest {
                    id: request.id.clone(),
                    col_id: source.project.id.clone(),
                    container_id: request.folder_id.clone(),
                    name: request.name.clone(),
                    url: request.url.clone(),
                    method: request.method.as_str(),
                    sort_num: 0,
                    created: stamp.clone(),
                    modified: stamp.clone(),
                    headers: request
                        .headers
                        .iter()
                        .map(|(name, value)| ThunderPair {
                            name: name.clone(),
                            value: value.clone(),
                        })
                        .collect(),
                    params: Vec::new(),
                    body: Self::body(request),
                    tests: Vec::new(),
                })
                .collect(),
        };
        to_json(&collection)
    }

    fn body(request: &ApiRequest) -> ThunderBody {
        let raw = |kind| ThunderBody {
            kind,
            raw: Some(request.body.clone()),
            form: None,
        };
        match request.body_type {
            BodyType::Json => raw("json"),
            BodyType::Text => raw("text"),
            BodyType::FormData => ThunderBody {
                kind: "form-data",
                raw: None,
                form: Some(
                    parse_form_data(&request.body)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|entry| ThunderPair {
                            name: entry.key,
                            value: entry.value,
                        })
                        .collect(),
                ),
            },
            BodyType::None | BodyType::Binary => ThunderBody {
                kind: "none",
                raw: None,
                form: None,
            },
        }
    }
}
