use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Upload;

/// HTTP verbs used by the console
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which backend base URL a path hangs off
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Account endpoints (agent registration)
    Auth,
    /// Everything the service provider manages
    Shopkeeper,
}

/// Backend path relative to its scope's base URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiPath {
    pub scope: Scope,
    pub path: String,
}

impl ApiPath {
    pub fn auth(path: impl Into<String>) -> Self {
        Self {
            scope: Scope::Auth,
            path: path.into(),
        }
    }

    pub fn shopkeeper(path: impl Into<String>) -> Self {
        Self {
            scope: Scope::Shopkeeper,
            path: path.into(),
        }
    }
}

impl std::fmt::Display for ApiPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scope {
            Scope::Auth => write!(f, "auth:{}", self.path),
            Scope::Shopkeeper => write!(f, "shopkeeper:{}", self.path),
        }
    }
}

/// One file part of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub upload: Upload,
}

/// Multipart form: text fields plus file parts, both in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    /// Add a field holding a JSON-encoded value
    pub fn json<T: Serialize>(self, name: &str, value: &T) -> Result<Self, serde_json::Error> {
        let encoded = serde_json::to_string(value)?;
        Ok(self.text(name, encoded))
    }

    pub fn file(mut self, name: &str, upload: Upload) -> Self {
        self.files.push(FilePart {
            field: name.to_string(),
            upload,
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(FormPayload),
}

/// Raw response: status code plus whatever JSON the backend sent
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status: u16,
    pub body: Value,
}

impl Envelope {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}
