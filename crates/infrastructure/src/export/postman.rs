//! Postman Collection v2.1.0 exporter.

use serde_json::Value;

use courier_domain::{ApiRequest, BodyType, generate_id, parse_form_data};

use super::{ExportError, ExportSource, to_json};
use crate::import::postman::{
    POSTMAN_SCHEMA, PostmanBody, PostmanCollection, PostmanFormField, PostmanHeader, PostmanInfo,
    PostmanItem, PostmanRequest, PostmanUrl, PostmanUrlObject,
};

/// Postman exporter. One collection folder per project folder.
pub struct PostmanExporter;

impl PostmanExporter {
    /// Renders the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export(source: &ExportSource<'_>) -> Result<String, ExportError> {
        let item = source
            .folders
            .iter()
            .map(|folder| PostmanItem {
                name: folder.name.clone(),
                item: Some(
                    source
                        .requests_in(&folder.id)
                        .into_iter()
                        .map(Self::request_item)
                        .collect(),
                ),
                request: None,
            })
            .collect();

        let collection = PostmanCollection {
            info: PostmanInfo {
                postman_id: Some(generate_id()),
                name: source.project.name.clone(),
                schema: Some(POSTMAN_SCHEMA.to_string()),
            },
            item,
        };
        to_json(&collection)
    }

    fn request_item(request: &ApiRequest) -> PostmanItem {
        PostmanItem {
            name: request.name.clone(),
            item: None,
            request: Some(PostmanRequest {
                method: Some(request.method.as_str().to_string()),
                header: request
                    .headers
                    .iter()
                    .map(|(key, value)| PostmanHeader {
                        key: key.clone(),
                        value: value.clone(),
                        disabled: false,
                    })
                    .collect(),
                body: Self::body(request),
                url: Some(PostmanUrl::Structured(structured_url(&request.url))),
            }),
        }
    }

    fn body(request: &ApiRequest) -> Option<PostmanBody> {
        match request.body_type {
            BodyType::Json | BodyType::Text => Some(PostmanBody {
                mode: "raw".to_string(),
                raw: Some(request.body.clone()),
                formdata: None,
            }),
            BodyType::FormData => Some(PostmanBody {
                mode: "formdata".to_string(),
                raw: None,
                formdata: Some(
                    parse_form_data(&request.body)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|entry| PostmanFormField {
                            key: entry.key,
                            value: entry.value,
                            kind: Some("text".to_string()),
                            disabled: false,
                        })
                        .collect(),
                ),
            }),
            BodyType::None | BodyType::Binary => None,
        }
    }
}

/// Splits a URL into `host` (third `/` segment) and `path` (everything after
/// it up to the query, split on `/`).
fn structured_url(url: &str) -> PostmanUrlObject {
    let parts: Vec<&str> = url.split('/').collect();
    let host = parts.get(2).copied().unwrap_or_default();
    let rest = parts.get(3..).map(|tail| tail.join("/")).unwrap_or_default();
    let path: Vec<Value> = rest
        .split('?')
        .next()
        .unwrap_or_default()
        .split('/')
        .map(|segment| Value::String(segment.to_string()))
        .collect();

    PostmanUrlObject {
        raw: Some(url.to_string()),
        host: Some(Value::Array(vec![Value::String(host.to_string())])),
        path: Some(Value::Array(path)),
    }
}
