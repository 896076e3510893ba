//! Domain DTOs for the car store API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently
//! from the mock-server crate; integration tests catch any drift between
//! the two. Car records are deliberately loose — the backend owns their
//! schema, and this client passes every field through verbatim — so `Car`
//! pins only the `id` and flattens the rest into a JSON map.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Request payload for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Account record returned on signup. The backend never echoes the password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Payload returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginSession {
    pub message: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// A car record as the backend returns it: an id plus whatever fields the
/// listing carries. Serializing a `Car` reproduces the original JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Car {
    pub id: Value,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Request payload for placing an order.
///
/// `status` defaults to `"Completed"` when absent. `price` accepts either a
/// JSON number or a numeric string on input and always serializes as a
/// number, so form data that arrives stringly-typed still reaches the wire
/// as a numeric price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrder {
    pub car_id: String,
    pub user_id: String,
    #[serde(deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default = "default_status")]
    pub status: String,
}

impl CreateOrder {
    /// Build an order with the default `"Completed"` status.
    pub fn new(car_id: &str, user_id: &str, price: f64) -> Self {
        Self {
            car_id: car_id.to_string(),
            user_id: user_id.to_string(),
            price,
            status: default_status(),
        }
    }
}

fn default_status() -> String {
    "Completed".to_string()
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// An order record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub car_id: String,
    pub user_id: String,
    pub price: f64,
    pub status: String,
}

/// Aggregation over the car inventory.
///
/// `price_range` stays opaque JSON: the backend models it as a free-form
/// `{min, max, avg}` dictionary rather than a schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarStats {
    pub total_cars: u64,
    pub by_make: Vec<MakeStats>,
    pub by_condition: Vec<ConditionStats>,
    pub price_range: Value,
}

/// Per-make slice of the aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MakeStats {
    pub make: String,
    pub count: u64,
    pub avg_price: f64,
    pub total_mileage: i64,
    pub min_year: i32,
    pub max_year: i32,
}

/// Per-condition slice of the aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionStats {
    pub condition: String,
    pub count: u64,
    pub avg_price: f64,
}
