// The MIT License (MIT)
// Copyright (c) 2023 IBP.network
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Environment lookup specific error messages
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("describe environments error: {0}")]
    Sdk(String),
    #[error("environment {environment} not found for application {application}")]
    NotFound {
        application: String,
        environment: String,
    },
    #[error("environment description is missing {0}")]
    MissingField(&'static str),
}

/// Slack delivery specific error messages
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("invalid webhook url: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("payload serialization error: {0}")]
    Payload(String),
    #[error("reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("webhook responded with status {0}")]
    Status(u16),
}

/// Relay specific error messages
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("lookup error: {0}")]
    LookupError(#[from] LookupError),
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for RelayError {
    fn from(error: std::io::Error) -> Self {
        RelayError::Other(error.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(error: serde_json::Error) -> Self {
        RelayError::Other(error.to_string())
    }
}

/// Api specific error messages
#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadGateway(String),
    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            errors: vec![self.to_string()],
        })
    }
}

impl From<RelayError> for ApiError {
    fn from(error: RelayError) -> Self {
        match error {
            RelayError::LookupError(e) => ApiError::BadGateway(e.to_string()),
            _ => ApiError::InternalServerError(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_lookup_failures_to_bad_gateway() {
        let err: ApiError = RelayError::LookupError(LookupError::NotFound {
            application: "myapp".into(),
            environment: "prod".into(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.to_string(),
            "environment prod not found for application myapp"
        );
    }

    #[test]
    fn it_maps_other_failures_to_internal_server_error() {
        let err: ApiError = RelayError::Other("boom".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
