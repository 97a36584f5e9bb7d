//! Plain HTTP transport for the dashboard backend.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use spotdesk_core::api::ErrorBody;
use spotdesk_core::error::{ApiError, Error, InvalidInputError, TransportError};
use spotdesk_core::{AccessToken, BaseUrl, ClientConfig, Result};

use crate::request::{ApiRequest, FormField, RequestBody};

/// HTTP client for backend requests.
///
/// The transport has no notion of sessions: it sends exactly the token it is
/// given. Token attachment and recovery live in
/// [`AuthenticatedHttpClient`](crate::AuthenticatedHttpClient).
#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: reqwest::Client,
    base_url: BaseUrl,
}

impl ApiTransport {
    /// Create a new transport for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Returns the base URL this transport is configured for.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Send a request and decode the success body.
    #[instrument(skip(self, request, token), fields(method = %request.method(), path = request.path()))]
    pub async fn send<R>(&self, request: &ApiRequest, token: Option<&AccessToken>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.base_url.endpoint(request.path());
        debug!(authed = token.is_some(), "API request");
        trace!(query = ?request.query(), "query parameters");

        let mut builder = self.client.request(request.method().clone(), &url);

        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }

        if let Some(token) = token {
            let value = HeaderValue::from_str(&token.bearer()).map_err(|e| {
                InvalidInputError::Header {
                    reason: e.to_string(),
                }
            })?;
            builder = builder.header(AUTHORIZATION, value);
        }

        builder = match request.body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .json(value),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        };

        let response = builder.send().await.map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let bytes = response.bytes().await.map_err(transport_error)?;
            serde_json::from_slice(&bytes).map_err(|e| Error::Decode {
                message: e.to_string(),
            })
        } else {
            Err(Error::Api(self.parse_error_response(response).await))
        }
    }

    /// Parse an error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::new(status, body.message)
                .with_error(body.error)
                .with_code(body.code),
            Err(_) => ApiError::new(status, None),
        }
    }
}

fn build_form(fields: &[FormField]) -> Result<Form> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(*name, value.clone()),
            FormField::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let mut part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                if let Some(mime) = content_type {
                    part = part.mime_str(mime).map_err(transport_error)?;
                }
                form.part(*name, part)
            }
        };
    }
    Ok(form)
}

/// Map a reqwest failure onto the transport error variants.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
