//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either an expected parse result or an expected normalized error
//! message. Comparing parsed JSON (not raw strings) avoids false negatives
//! from field-ordering differences.

use carstore_core::{ApiError, CarStoreClient, CreateOrder, HttpMethod, HttpResponse};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8000";

fn client() -> CarStoreClient {
    CarStoreClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, req: &carstore_core::HttpRequest, expected: &Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    match expected.get("headers") {
        Some(headers) => {
            let expected_headers: Vec<(String, String)> = headers
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let pair = h.as_array().unwrap();
                    (
                        pair[0].as_str().unwrap().to_string(),
                        pair[1].as_str().unwrap().to_string(),
                    )
                })
                .collect();
            assert_eq!(req.headers, expected_headers, "{name}: headers");
        }
        None => assert!(req.headers.is_empty(), "{name}: headers"),
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Check a parse outcome against `expected_result` / `expected_error`.
fn check_outcome<T: serde::Serialize>(name: &str, case: &Value, outcome: Result<T, ApiError>) {
    if let Some(expected) = case.get("expected_result") {
        let value = serde_json::to_value(outcome.unwrap_or_else(|e| {
            panic!("{name}: expected success, got {e:?}");
        }))
        .unwrap();
        assert_eq!(&value, expected, "{name}: parsed result");
    } else {
        let expected = case["expected_error"].as_str().unwrap();
        match outcome {
            Ok(_) => panic!("{name}: expected failure"),
            Err(ApiError::RequestFailed { message }) => {
                assert_eq!(message, expected, "{name}: error message");
            }
            Err(other) => panic!("{name}: unexpected error {other:?}"),
        }
    }
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

#[test]
fn create_car_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create_car.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_create_car(&case["input"]).unwrap();
        check_request(name, &req, &case["expected_request"]);
        check_outcome(name, &case, c.parse_create_car(simulated(&case)));
    }
}

#[test]
fn delete_car_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete_car.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_delete_car(case["id"].as_str().unwrap());
        check_request(name, &req, &case["expected_request"]);
        check_outcome(name, &case, c.parse_delete_car(simulated(&case)));
    }
}

#[test]
fn create_order_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create_order.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateOrder = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_create_order(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);
        check_outcome(name, &case, c.parse_create_order(simulated(&case)));
    }
}

#[test]
fn list_orders_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list_orders.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_list_orders(case["user_id"].as_str().unwrap());
        check_request(name, &req, &case["expected_request"]);
        check_outcome(name, &case, c.parse_list_orders(simulated(&case)));
    }
}

#[test]
fn login_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/login.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_login(
            case["email"].as_str().unwrap(),
            case["password"].as_str().unwrap(),
        );
        check_request(name, &req, &case["expected_request"]);
        check_outcome(name, &case, c.parse_login(simulated(&case)));
    }
}
