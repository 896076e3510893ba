//! Stateless HTTP request builder and response parser for the car store API.
//!
//! # Design
//! `CarStoreClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Failure normalization is uniform across operations: any non-2xx response
//! is reported with the error body's `detail` message when one can be read,
//! and with a fixed per-operation message otherwise. A malformed error body
//! never surfaces as a secondary error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::filter::{encode_query, CarFilter, StatsFilter};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Car, CarStats, CreateOrder, LoginSession, Order, Signup, User};

/// Address the backend listens on in local development.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Synchronous, stateless client for the car store API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct CarStoreClient {
    base_url: String,
}

impl Default for CarStoreClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CarStoreClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // --- users ---

    pub fn build_signup(&self, input: &Signup) -> Result<HttpRequest, ApiError> {
        self.post_json(format!("{}/users/", self.base_url), input)
    }

    pub fn parse_signup(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_success(&response, "Signup failed")?;
        json_body(&response)
    }

    /// Credentials travel only in the query string; the request has no body.
    pub fn build_login(&self, email: &str, password: &str) -> HttpRequest {
        let query = encode_query(&[
            ("email", email.to_string()),
            ("password", password.to_string()),
        ]);
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/users/login/?{query}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginSession, ApiError> {
        check_success(&response, "Login failed")?;
        json_body(&response)
    }

    // --- cars ---

    pub fn build_list_cars(&self, filter: &CarFilter) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: with_query(format!("{}/cars/", self.base_url), &filter.to_pairs()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_cars(&self, response: HttpResponse) -> Result<Vec<Car>, ApiError> {
        check_success(&response, "Failed to fetch cars")?;
        json_body(&response)
    }

    pub fn build_get_car(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/cars/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_get_car(&self, response: HttpResponse) -> Result<Car, ApiError> {
        check_success(&response, "Car not found")?;
        json_body(&response)
    }

    /// `data` is passed through verbatim; the backend owns the car schema.
    pub fn build_create_car(&self, data: &Value) -> Result<HttpRequest, ApiError> {
        self.post_json(format!("{}/cars/", self.base_url), data)
    }

    pub fn parse_create_car(&self, response: HttpResponse) -> Result<Car, ApiError> {
        check_success(&response, "Failed to add car")?;
        json_body(&response)
    }

    pub fn build_update_car(&self, id: &str, data: &Value) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(data)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/cars/{id}", self.base_url),
            headers: vec![json_content_type()],
            body: Some(body),
        })
    }

    pub fn parse_update_car(&self, response: HttpResponse) -> Result<Car, ApiError> {
        check_success(&response, "Failed to update car")?;
        json_body(&response)
    }

    pub fn build_delete_car(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/cars/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The backend responds to DELETE with the removed record.
    pub fn parse_delete_car(&self, response: HttpResponse) -> Result<Car, ApiError> {
        check_success(&response, "Failed to delete car")?;
        json_body(&response)
    }

    // --- orders ---

    pub fn build_create_order(&self, input: &CreateOrder) -> Result<HttpRequest, ApiError> {
        self.post_json(format!("{}/orders/", self.base_url), input)
    }

    pub fn parse_create_order(&self, response: HttpResponse) -> Result<Order, ApiError> {
        check_success(&response, "Failed to create order")?;
        json_body(&response)
    }

    pub fn build_list_orders(&self, user_id: &str) -> HttpRequest {
        let query = encode_query(&[("user_id", user_id.to_string())]);
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/orders/?{query}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_orders(&self, response: HttpResponse) -> Result<Vec<Order>, ApiError> {
        check_success(&response, "Failed to fetch orders")?;
        json_body(&response)
    }

    // --- stats ---

    pub fn build_car_stats(&self, filter: &StatsFilter) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: with_query(
                format!("{}/cars/stats/aggregation", self.base_url),
                &filter.to_pairs(),
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_car_stats(&self, response: HttpResponse) -> Result<CarStats, ApiError> {
        check_success(&response, "Failed to fetch stats")?;
        json_body(&response)
    }

    fn post_json<T: serde::Serialize>(
        &self,
        path: String,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path,
            headers: vec![json_content_type()],
            body: Some(body),
        })
    }
}

fn json_content_type() -> (String, String) {
    ("content-type".to_string(), "application/json".to_string())
}

fn with_query(path: String, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        path
    } else {
        format!("{path}?{}", encode_query(pairs))
    }
}

/// Accept any status in the 2xx range; normalize everything else into a
/// `RequestFailed` message.
fn check_success(response: &HttpResponse, default_message: &str) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(failure(response, default_message))
}

/// Extract the `detail` message from a JSON error body, substituting
/// `default_message` when the body is malformed or carries no `detail`
/// string. The secondary parse error is swallowed on purpose.
fn failure(response: &HttpResponse, default_message: &str) -> ApiError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
    }

    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| default_message.to_string());
    ApiError::RequestFailed { message }
}

fn json_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
