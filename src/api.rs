// ABOUTME: Blocking HTTP client for the deployment hosting API
// ABOUTME: Bearer auth on every request, status mapping, tree validation at the boundary

use crate::{
    model::{Deployment, TreeEntry},
    Error, Result,
};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.vercel.com";

const USER_AGENT: &str = concat!("deploy-export/", env!("CARGO_PKG_VERSION"), " (Rust)");

/// The three calls an export needs. `ApiClient` talks to the real API;
/// tests substitute an in-memory source.
pub trait DeploymentSource {
    fn get_deployment(&self, id_or_url: &str) -> Result<Deployment>;

    /// Root-level children of the deployment's file tree. Fails for
    /// deployment types that expose no tree.
    fn list_file_tree(&self, deployment_id: &str) -> Result<Vec<TreeEntry>>;

    fn get_file_content(&self, deployment_id: &str, content_id: &str) -> Result<String>;
}

fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        return s.to_string();
    }

    let mut boundary = max_chars;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    if boundary == 0 {
        return String::new();
    }

    format!("{}...", &s[..boundary])
}

#[derive(Deserialize)]
struct RawTreeEntry {
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    uid: Option<Value>,
    #[serde(default)]
    children: Option<Vec<Value>>,
}

impl RawTreeEntry {
    /// Symlinks, functions and other non-file kinds have nothing to download.
    fn into_entry(self) -> Option<TreeEntry> {
        match self.kind.as_str() {
            "file" => Some(TreeEntry::File {
                name: self.name,
                content_id: match self.uid {
                    Some(Value::String(uid)) if !uid.is_empty() => Some(uid),
                    Some(Value::Number(uid)) => Some(uid.to_string()),
                    _ => None,
                },
            }),
            "directory" => Some(TreeEntry::Directory {
                name: self.name,
                children: into_entries(self.children.unwrap_or_default()),
            }),
            other => {
                debug!(name = %self.name, kind = other, "skipping tree entry");
                None
            }
        }
    }
}

/// Entries are validated one at a time; a malformed sibling does not sink the tree.
fn into_entries(raw: Vec<Value>) -> Vec<TreeEntry> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<RawTreeEntry>(value) {
            Ok(entry) => entry.into_entry(),
            Err(e) => {
                debug!(error = %e, "skipping malformed tree entry");
                None
            }
        })
        .collect()
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
    team_slug: Option<String>,
}

impl ApiClient {
    pub fn new(token: String, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(ApiClient {
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_API_BASE.into())
                .trim_end_matches('/')
                .to_string(),
            token,
            team_slug: None,
        })
    }

    /// Scopes every request to a team workspace via the `slug` query parameter.
    pub fn with_team_slug(mut self, slug: Option<String>) -> Self {
        self.team_slug = slug.filter(|s| !s.is_empty());
        self
    }

    fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");

        let mut request = self.client.get(&url).bearer_auth(&self.token);
        if let Some(slug) = &self.team_slug {
            request = request.query(&[("slug", slug)]);
        }

        let response = request.send()?;
        debug!(status = %response.status(), "response received");

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = truncate_str(&response.text().unwrap_or_default(), 100);
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth {
                endpoint: endpoint.into(),
                message,
            },
            StatusCode::NOT_FOUND => Error::NotFound(format!("{}: {}", endpoint, message)),
            _ => Error::Api {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                message,
            },
        })
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let body = self.get(endpoint)?.text()?;
        serde_json::from_str(&body).map_err(|e| {
            debug!(
                endpoint,
                body = %truncate_str(&body, 500),
                "failed to parse response"
            );
            Error::Parse(e)
        })
    }
}

impl DeploymentSource for ApiClient {
    fn get_deployment(&self, id_or_url: &str) -> Result<Deployment> {
        let endpoint = format!("/v13/deployments/{}", urlencoding::encode(id_or_url));
        let document: Value = self.get_json(&endpoint)?;

        Deployment::from_document(document).ok_or_else(|| Error::InvalidResponse {
            endpoint,
            message: "deployment document has no string `id`".into(),
        })
    }

    fn list_file_tree(&self, deployment_id: &str) -> Result<Vec<TreeEntry>> {
        let endpoint = format!(
            "/v6/deployments/{}/files",
            urlencoding::encode(deployment_id)
        );
        let raw: Vec<Value> = self.get_json(&endpoint)?;
        Ok(into_entries(raw))
    }

    fn get_file_content(&self, deployment_id: &str, content_id: &str) -> Result<String> {
        let endpoint = format!(
            "/v8/deployments/{}/files/{}",
            urlencoding::encode(deployment_id),
            urlencoding::encode(content_id)
        );
        Ok(self.get(&endpoint)?.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_short() {
        assert_eq!(truncate_str("hello", 100), "hello");
    }

    #[test]
    fn test_truncate_str_long() {
        let result = truncate_str("hello world", 7);
        assert!(result.starts_with("hello"));
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_str_utf8() {
        // "é" is two bytes; cutting at 2 would split it
        let result = truncate_str("aéééé", 2);
        assert_eq!(result, "a...");
    }

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("test_token".into(), None).unwrap();
        assert_eq!(client.base_url, DEFAULT_API_BASE);
        assert_eq!(client.token, "test_token");
        assert!(client.team_slug.is_none());
    }

    #[test]
    fn test_api_client_custom_base_strips_slash() {
        let client = ApiClient::new("token".into(), Some("http://localhost:9000/".into())).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_api_client_empty_team_slug_ignored() {
        let client = ApiClient::new("token".into(), None)
            .unwrap()
            .with_team_slug(Some(String::new()));
        assert!(client.team_slug.is_none());
    }

    #[test]
    fn test_raw_tree_validation() {
        let json = r#"[
            {"name": "package.json", "type": "file", "uid": "f2"},
            {"name": "src", "type": "directory", "children": [
                {"name": "index.js", "type": "file", "uid": "f1"},
                {"name": "link", "type": "symlink"}
            ]},
            {"name": "api", "type": "lambda"},
            {"name": "broken", "type": "file", "uid": ""},
            {"name": "out", "type": "directory"}
        ]"#;
        let raw: Vec<Value> = serde_json::from_str(json).unwrap();
        let entries = into_entries(raw);

        assert_eq!(
            entries,
            vec![
                TreeEntry::file("package.json", "f2"),
                TreeEntry::dir("src", vec![TreeEntry::file("index.js", "f1")]),
                TreeEntry::File {
                    name: "broken".into(),
                    content_id: None
                },
                TreeEntry::dir("out", vec![]),
            ]
        );
    }

    #[test]
    fn test_malformed_entries_dropped_individually() {
        let json = r#"[
            {"name": "no-type.txt", "uid": "u0"},
            {"type": "file", "uid": "nameless"},
            {"name": "numeric.txt", "type": "file", "uid": 17},
            {"name": "bad-uid.txt", "type": "file", "uid": {"nested": true}},
            {"name": "lib", "type": "directory", "children": [
                42,
                {"name": "ok.rs", "type": "file", "uid": "u1"}
            ]}
        ]"#;
        let raw: Vec<Value> = serde_json::from_str(json).unwrap();
        let entries = into_entries(raw);

        assert_eq!(
            entries,
            vec![
                TreeEntry::file("numeric.txt", "17"),
                TreeEntry::File {
                    name: "bad-uid.txt".into(),
                    content_id: None
                },
                TreeEntry::dir("lib", vec![TreeEntry::file("ok.rs", "u1")]),
            ]
        );
    }
}
