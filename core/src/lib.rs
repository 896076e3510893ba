//! Synchronous API client core for the car store backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `CarStoreClient` is stateless — it holds only `base_url`, injected at
//!   construction so tests can point it at a local mock server.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Non-2xx responses are normalized into a single failure kind carrying
//!   the backend's `detail` message or a per-operation default.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod types;

pub use client::{CarStoreClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use filter::{CarFilter, StatsFilter};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Car, CarStats, ConditionStats, CreateOrder, LoginSession, MakeStats, Order, Signup, User};
