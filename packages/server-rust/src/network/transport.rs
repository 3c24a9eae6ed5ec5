//! HTTP transport binding: decode, invoke endpoint, encode.
//!
//! Per call: `Received -> Decoded -> Invoked -> Encoded -> Sent`, or
//! `Received -> DecodeFailed -> Sent` when the body cannot be decoded. A
//! decode failure never reaches the endpoint or the service chain.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use stringsvc_core::{
    CountRequest, CountResponse, Failer, UppercaseRequest, UppercaseResponse,
};
use tower::{Service, ServiceExt};
use tracing::{debug, error};

use crate::service::{CountEndpoint, UppercaseEndpoint};

/// Errors from decoding a wire request body.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed request body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a request body into the typed request.
pub type DecodeFn<Req> = fn(&[u8]) -> Result<Req, DecodeError>;

/// Serializes a typed response into an HTTP response.
pub type EncodeFn<Resp> = fn(Resp) -> Response;

/// Decodes a JSON request body.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] when the body is not valid JSON or does not
/// match the request's shape.
pub fn decode_json_request<Req: DeserializeOwned>(body: &[u8]) -> Result<Req, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

/// Encodes a response as JSON.
///
/// The body is always sent. The status is 200 unless the response reports a
/// business failure, in which case it is 422.
pub fn encode_json_response<Resp: Serialize + Failer>(resp: Resp) -> Response {
    let status = if resp.failed().is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    (status, Json(resp)).into_response()
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Connects a wire protocol to one endpoint.
pub struct HttpBinding<E, Req, Resp> {
    endpoint: E,
    decode: DecodeFn<Req>,
    encode: EncodeFn<Resp>,
}

impl<E: Clone, Req, Resp> Clone for HttpBinding<E, Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            decode: self.decode,
            encode: self.encode,
        }
    }
}

impl<E, Req, Resp> HttpBinding<E, Req, Resp>
where
    E: Service<Req, Response = Resp> + Clone,
    E::Error: fmt::Display,
{
    #[must_use]
    pub fn new(endpoint: E, decode: DecodeFn<Req>, encode: EncodeFn<Resp>) -> Self {
        Self {
            endpoint,
            decode,
            encode,
        }
    }

    /// Handles one request body end to end.
    ///
    /// Decode failures produce 400 without invoking the endpoint; endpoint
    /// (transport-level) failures produce 500.
    pub async fn serve(&self, body: &[u8]) -> Response {
        let req = match (self.decode)(body) {
            Ok(req) => req,
            Err(err) => {
                debug!(error = %err, "rejecting undecodable request");
                return error_response(StatusCode::BAD_REQUEST, err.to_string());
            }
        };

        match self.endpoint.clone().oneshot(req).await {
            Ok(resp) => (self.encode)(resp),
            Err(err) => {
                error!(error = %err, "endpoint failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl<E, Req, Resp> fmt::Debug for HttpBinding<E, Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBinding").finish_non_exhaustive()
    }
}

pub type UppercaseBinding = HttpBinding<UppercaseEndpoint, UppercaseRequest, UppercaseResponse>;
pub type CountBinding = HttpBinding<CountEndpoint, CountRequest, CountResponse>;

/// JSON binding for the `uppercase` endpoint.
#[must_use]
pub fn uppercase_binding(endpoint: UppercaseEndpoint) -> UppercaseBinding {
    HttpBinding::new(endpoint, decode_json_request, encode_json_response)
}

/// JSON binding for the `count` endpoint.
#[must_use]
pub fn count_binding(endpoint: CountEndpoint) -> CountBinding {
    HttpBinding::new(endpoint, decode_json_request, encode_json_response)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
