//! API endpoint identity and definition types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::collections::FxHashMap;

/// HTTP method of an endpoint. Parsed case-insensitively; rendered upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Canonical upper-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            other => Err(format!("unknown HTTP method: {other}")),
        }
    }
}

/// Identity of an API endpoint: the (method, endpoint) pair.
///
/// Renders and parses as `"<METHOD> <endpoint>"`, the key syntax used by
/// baseline documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApiKey {
    pub method: HttpMethod,
    pub endpoint: String,
}

impl ApiKey {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
        }
    }

    /// Parse `"POST /users"` form. The endpoint may contain spaces only
    /// after the first separator.
    pub fn parse(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        let (method, endpoint) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| format!("expected '<METHOD> <endpoint>', got '{trimmed}'"))?;
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(format!("empty endpoint in '{trimmed}'"));
        }
        Ok(Self {
            method: method.parse()?,
            endpoint: endpoint.to_string(),
        })
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)
    }
}

/// A declared parameter of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    /// Where the parameter lives: "path", "query", "header", "body".
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// A discovered API endpoint. Immutable once discovered; identity is `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDefinition {
    #[serde(flatten)]
    pub key: ApiKey,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ApiParameter>,
    #[serde(default)]
    pub request_body: Option<serde_json::Value>,
    /// Status code → response description.
    #[serde(default)]
    pub responses: FxHashMap<String, String>,
}

impl ApiDefinition {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            key: ApiKey::new(method, endpoint),
            description: None,
            parameters: Vec::new(),
            request_body: None,
            responses: FxHashMap::default(),
        }
    }
}
