//! Stateless HTTP request builder and response parser for the spy cats API.
//!
//! # Design
//! `SpyCatClient` holds only a `base_url`. Each operation is a `build_*`
//! method producing an `HttpRequest` and a `parse_*` method consuming an
//! `HttpResponse`. The caller executes the round-trip in between.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
use crate::types::{Cat, CatCreate, CatId, CatUpdate};

/// Synchronous, stateless client for the spy cats API.
#[derive(Debug, Clone)]
pub struct SpyCatClient {
    base_url: String,
}

impl SpyCatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_cats(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/cats/", self.base_url), None)
    }

    pub fn build_get_cat(&self, id: CatId) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/cats/{id}", self.base_url), None)
    }

    pub fn build_create_cat(&self, input: &CatCreate) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, format!("{}/cats/", self.base_url), Some(body)))
    }

    pub fn build_update_cat(&self, id: CatId, input: &CatUpdate) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, format!("{}/cats/{id}", self.base_url), Some(body)))
    }

    pub fn build_delete_cat(&self, id: CatId) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("{}/cats/{id}", self.base_url), None)
    }

    pub fn parse_list_cats(&self, response: HttpResponse) -> Result<Vec<Cat>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_cat(&self, response: HttpResponse) -> Result<Cat, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_cat(&self, response: HttpResponse) -> Result<Cat, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_cat(&self, response: HttpResponse) -> Result<Cat, ApiError> {
        parse_json(response)
    }

    /// The backend answers 204 with an empty body; the body is never read.
    pub fn parse_delete_cat(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// The error reported when the backend cannot be reached.
    pub fn unreachable(&self) -> ApiError {
        ApiError::Unreachable {
            base_url: self.base_url.clone(),
        }
    }

    /// Turn a transport outcome into a response or the matching `ApiError`.
    pub fn interpret(&self, result: Result<HttpResponse, TransportError>) -> Result<HttpResponse, ApiError> {
        result.map_err(|e| match e {
            TransportError::Unreachable => self.unreachable(),
            TransportError::Other(msg) => ApiError::Transport(msg),
        })
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_response(response.status, response.reason(), &response.body))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
