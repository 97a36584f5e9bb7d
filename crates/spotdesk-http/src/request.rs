//! Immutable request records.

use reqwest::Method;
use serde::Serialize;

use spotdesk_core::Result;
use spotdesk_core::error::InvalidInputError;

use crate::endpoints::{LOGIN, REFRESH_TOKEN};

/// A request that can be sent more than once.
///
/// The client resends the same record after a token refresh, so nothing in
/// it is consumed by sending. Only the `Authorization` header differs between
/// attempts, and that is supplied separately.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: RequestBody,
}

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormField>),
}

/// A multipart form field.
#[derive(Clone)]
pub enum FormField {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl std::fmt::Debug for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::Text { name, value } => {
                f.debug_struct("Text").field("name", name).field("value", value).finish()
            }
            FormField::File {
                name,
                file_name,
                bytes,
                ..
            } => f
                .debug_struct("File")
                .field("name", name)
                .field("file_name", file_name)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Add query string pairs.
    pub fn with_query(mut self, params: Vec<(&'static str, String)>) -> Self {
        self.query.extend(params);
        self
    }

    /// Set a JSON body.
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("request body is not serializable: {e}"),
        })?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Set a multipart form body.
    pub fn with_form(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Returns true for the login and refresh endpoints.
    ///
    /// A 401 from these never triggers token recovery: the refresh call's own
    /// failure would otherwise recurse.
    pub fn is_auth_endpoint(&self) -> bool {
        let path = self.path.split('?').next().unwrap_or_default();
        let path = format!("/{}", path.trim_matches('/'));
        [LOGIN, REFRESH_TOKEN]
            .iter()
            .any(|endpoint| path.ends_with(endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_endpoints_are_recognised() {
        assert!(ApiRequest::post("/auth/login").is_auth_endpoint());
        assert!(ApiRequest::post("/auth/refresh-token/").is_auth_endpoint());
        assert!(ApiRequest::post("auth/login?next=/users").is_auth_endpoint());
        assert!(!ApiRequest::post("/auth/logout").is_auth_endpoint());
        assert!(!ApiRequest::get("/admin/users").is_auth_endpoint());
    }

    #[test]
    fn json_body_is_kept_for_resending() {
        let request = ApiRequest::post("/auth/change-password")
            .with_json(&json!({"oldPassword": "a", "newPassword": "b"}))
            .unwrap();
        let copy = request.clone();
        match copy.body() {
            RequestBody::Json(value) => assert_eq!(value["newPassword"], "b"),
            other => panic!("unexpected body: {other:?}"),
        }
        assert_eq!(request.method(), &Method::POST);
    }

    #[test]
    fn file_fields_hide_contents_in_debug() {
        let field = FormField::File {
            name: "avatar",
            file_name: "me.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        };
        let debug = format!("{field:?}");
        assert!(debug.contains("me.png"));
        assert!(debug.contains("len: 4"));
    }
}
