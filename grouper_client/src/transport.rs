//! The HTTP exchange under every Grouper call.

use std::fmt::{self, Debug, Formatter};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::ClientError;

/// Grouper only accepts JSON bodies declared with this content type.
pub const GROUPER_JSON: &str = "text/x-json;charset=UTF-8";
pub const RESULT_CODE_HEADER: &str = "X-Grouper-resultCode";

#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    /// Appended to the client's base address.
    pub path: String,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
    pub result_code: Option<String>,
}

impl TransportResponse {
    pub fn ok(body: String) -> Self {
        TransportResponse {
            status: StatusCode::OK,
            body,
            result_code: None,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn send(&self, request: &TransportRequest) -> Result<TransportResponse, ClientError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
    addr: String,
    username: String,
    password: String,
}

impl Debug for HttpTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("addr", &self.addr)
            .field("username", &self.username)
            .finish()
    }
}

impl HttpTransport {
    pub fn new(
        client: reqwest::blocking::Client,
        addr: String,
        username: String,
        password: String,
    ) -> Self {
        HttpTransport {
            client,
            addr,
            username,
            password,
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &TransportRequest) -> Result<TransportResponse, ClientError> {
        let dest = format!("{}{}", self.addr, request.path);
        let req_string = serde_json::to_string(&request.body).map_err(ClientError::JsonEncode)?;
        debug!(method = %request.method, %dest, "Sending Grouper request");
        trace!(body = %req_string);

        let response = self
            .client
            .request(request.method.clone(), dest.as_str())
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, GROUPER_JSON)
            .body(req_string)
            .send()
            .map_err(ClientError::Transport)?;

        let status = response.status();
        let result_code = response
            .headers()
            .get(RESULT_CODE_HEADER)
            .and_then(|hv| hv.to_str().ok())
            .map(str::to_string);
        debug!(%status, "resultCode -> {:?}", result_code);

        let body = response.text().map_err(ClientError::Transport)?;
        trace!(body = %body);

        Ok(TransportResponse {
            status,
            body,
            result_code,
        })
    }
}
