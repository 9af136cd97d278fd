//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use spycats_core::{
    format_salary, Cat, CatCreate, CatId, CatUpdate, HttpMethod, HttpRequest, HttpResponse,
    SpyCatClient,
};

const BASE_URL: &str = "http://localhost:8000";

fn client() -> SpyCatClient {
    SpyCatClient::new(BASE_URL)
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

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Check method, path and (when present) headers and body.
fn check_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected["headers"].as_array() {
        let expected_headers: Vec<(String, String)> = headers
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CatCreate = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_cat(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let cat = c.parse_create_cat(simulated(case)).unwrap();
        let expected: Cat = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(cat, expected, "{name}: parsed result");
        assert_eq!(format_salary(cat.salary), case["expected_display"], "{name}: display");
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_cats();
        check_request(name, &req, &case["expected_request"]);

        let cats = c.parse_list_cats(simulated(case)).unwrap();
        let expected: Vec<Cat> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(cats, expected, "{name}: parsed result");

        let shown: Vec<String> = cats.iter().map(|cat| format_salary(cat.salary)).collect();
        let expected_shown: Vec<String> = serde_json::from_value(case["expected_display"].clone()).unwrap();
        assert_eq!(shown, expected_shown, "{name}: display");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = CatId(case["input_id"].as_i64().unwrap());
        let input: CatUpdate = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_cat(id, &input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let cat = c.parse_update_cat(simulated(case)).unwrap();
        let expected: Cat = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(cat, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = CatId(case["input_id"].as_i64().unwrap());

        let req = c.build_delete_cat(id);
        check_request(name, &req, &case["expected_request"]);

        c.parse_delete_cat(simulated(case)).unwrap();
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = simulated(case);
        let status = response.status;

        let err = c.parse_get_cat(response).unwrap_err();
        assert_eq!(err.to_string(), case["expected_message"].as_str().unwrap(), "{name}: message");
        assert_eq!(err.status(), Some(status), "{name}: status");
    }
}
