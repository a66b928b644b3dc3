//! Shared HTTP test harness for storage backends
//!
//! The `rest_api_tests!` macro generates the full suite of REST round-trips
//! (JSON → HTTP request → handler → service → HTTP response → JSON) for any
//! backend that implements both `CompanyService` and `InvoiceService`.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod rest_harness;
//!
//! rest_api_tests!(fresh_services().await);
//! ```

#![allow(dead_code)]

use axum_test::TestServer;
use biztime::prelude::*;
use serde_json::{Value, json};

/// Build a `TestServer` over the given services
pub fn build_test_server(
    companies: Arc<dyn CompanyService>,
    invoices: Arc<dyn InvoiceService>,
) -> TestServer {
    let router = ServerBuilder::new()
        .with_services(companies, invoices)
        .build()
        .expect("Failed to build router");
    TestServer::new(router)
}

/// Split one store into the two service handles
pub fn split_store<S>(store: Arc<S>) -> (Arc<dyn CompanyService>, Arc<dyn InvoiceService>)
where
    S: CompanyService + InvoiceService + 'static,
{
    let companies: Arc<dyn CompanyService> = store.clone();
    let invoices: Arc<dyn InvoiceService> = store;
    (companies, invoices)
}

/// POST a company and return the `company` object from the response
pub async fn create_company(server: &TestServer, code: &str, name: &str, description: &str) -> Value {
    let response = server
        .post("/companies")
        .json(&json!({
            "code": code,
            "name": name,
            "description": description
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["company"].clone()
}

/// POST an invoice and return the `invoice` object from the response
pub async fn create_invoice(server: &TestServer, comp_code: &str, amt: f64) -> Value {
    let response = server
        .post("/invoices")
        .json(&json!({ "comp_code": comp_code, "amt": amt }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["invoice"].clone()
}

/// Generate the REST test suite for a storage backend.
///
/// `$services` must evaluate to
/// `(Arc<dyn CompanyService>, Arc<dyn InvoiceService>)` over an empty store.
///
/// # Generated Tests
///
/// ## Companies
/// - create echoes the row, get adds an empty `invoices` list
/// - list is ordered by name and omits description
/// - update changes name/description only, and requires both
/// - delete twice: `{status: "deleted"}` then 404
/// - unknown code: GET/PUT/DELETE all 404
/// - create without a name is a storage error (500), not a 400
///
/// ## Invoices
/// - create yields `paid=false`, an id and `paid_date=null`
/// - get nests the owning company
/// - amt of 0 (or missing fields) is a 400
/// - update changes only amt; unknown id 404
/// - list is ordered by comp_code with only id and comp_code
/// - delete twice, unknown company on create
///
/// ## End-to-end
/// - the IBM walkthrough
#[macro_export]
macro_rules! rest_api_tests {
    ($services:expr) => {
        mod rest_api_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let (companies, invoices) = $services;
                rest_harness::build_test_server(companies, invoices)
            }

            // ==============================================================
            // Companies
            // ==============================================================

            #[tokio::test]
            async fn test_create_then_get_company() {
                let server = make_server().await;

                let created =
                    rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;
                assert_eq!(
                    created,
                    json!({"code": "ibm", "name": "IBM", "description": "Big blue."})
                );

                let response = server.get("/companies/ibm").await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body["company"]["name"], "IBM");
                assert_eq!(body["company"]["description"], "Big blue.");
                assert_eq!(body["company"]["invoices"], json!([]));
            }

            #[tokio::test]
            async fn test_list_companies_sorted_by_name() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ms", "Microsoft", "Windows").await;
                rest_harness::create_company(&server, "apple", "Apple", "Mac").await;
                rest_harness::create_company(&server, "zz", "Zenith", "Radios").await;
                rest_harness::create_company(&server, "bb", "Berkshire", "Insurance").await;

                let response = server.get("/companies").await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                let companies = body["companies"].as_array().unwrap();

                let names: Vec<&str> = companies
                    .iter()
                    .map(|c| c["name"].as_str().unwrap())
                    .collect();
                assert_eq!(names, vec!["Apple", "Berkshire", "Microsoft", "Zenith"]);

                assert_eq!(companies[0], json!({"code": "apple", "name": "Apple"}));
            }

            #[tokio::test]
            async fn test_list_companies_empty() {
                let server = make_server().await;
                let body: Value = server.get("/companies").await.json();
                assert_eq!(body, json!({"companies": []}));
            }

            #[tokio::test]
            async fn test_company_lists_its_invoice_ids() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;
                rest_harness::create_company(&server, "apple", "Apple", "Mac").await;
                let first = rest_harness::create_invoice(&server, "ibm", 100.0).await;
                let second = rest_harness::create_invoice(&server, "ibm", 200.0).await;
                rest_harness::create_invoice(&server, "apple", 300.0).await;

                let body: Value = server.get("/companies/ibm").await.json();
                let mut ids: Vec<i64> = body["company"]["invoices"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|id| id.as_i64().unwrap())
                    .collect();
                ids.sort_unstable();
                assert_eq!(
                    ids,
                    vec![first["id"].as_i64().unwrap(), second["id"].as_i64().unwrap()]
                );
            }

            #[tokio::test]
            async fn test_update_company() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;
                let invoice = rest_harness::create_invoice(&server, "ibm", 100.0).await;

                let response = server
                    .put("/companies/ibm")
                    .json(&json!({"name": "IBM Corp", "description": "Bigger blue."}))
                    .await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({"company": {
                        "code": "ibm",
                        "name": "IBM Corp",
                        "description": "Bigger blue."
                    }})
                );

                let invoice_body: Value = server
                    .get(&format!("/invoices/{}", invoice["id"]))
                    .await
                    .json();
                assert_eq!(invoice_body["invoice"]["company"]["code"], "ibm");
                assert_eq!(invoice_body["invoice"]["company"]["name"], "IBM Corp");
            }

            #[tokio::test]
            async fn test_update_company_requires_name_and_description() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;

                let response = server
                    .put("/companies/ibm")
                    .json(&json!({"name": "IBM Corp"}))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let response = server
                    .put("/companies/ibm")
                    .json(&json!({"name": "", "description": "x"}))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                // Unchanged
                let body: Value = server.get("/companies/ibm").await.json();
                assert_eq!(body["company"]["name"], "IBM");
            }

            #[tokio::test]
            async fn test_unknown_company_is_404() {
                let server = make_server().await;

                server
                    .get("/companies/nope")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .put("/companies/nope")
                    .json(&json!({"name": "Nope", "description": "Nothing"}))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .delete("/companies/nope")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_delete_company_twice() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;

                let response = server.delete("/companies/ibm").await;
                response.assert_status(StatusCode::OK);
                assert_eq!(response.json::<Value>(), json!({"status": "deleted"}));

                server
                    .delete("/companies/ibm")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .get("/companies/ibm")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_create_company_without_name_is_storage_error() {
                let server = make_server().await;

                let response = server
                    .post("/companies")
                    .json(&json!({"code": "nameless"}))
                    .await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                let body: Value = response.json();
                assert_eq!(body["error"]["code"], "STORAGE_ERROR");
                assert_eq!(body["error"]["status"], 500);
            }

            #[tokio::test]
            async fn test_create_duplicate_company_is_storage_error() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;

                server
                    .post("/companies")
                    .json(&json!({"code": "ibm", "name": "Other", "description": "x"}))
                    .await
                    .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            }

            // ==============================================================
            // Invoices
            // ==============================================================

            #[tokio::test]
            async fn test_create_invoice_defaults() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;

                let invoice = rest_harness::create_invoice(&server, "ibm", 100.0).await;
                assert!(invoice["id"].as_i64().is_some());
                assert_eq!(invoice["comp_code"], "ibm");
                assert_eq!(invoice["amt"], 100.0);
                assert_eq!(invoice["paid"], false);
                assert_eq!(invoice["paid_date"], Value::Null);
                assert_eq!(invoice["add_date"].as_str().map(str::len), Some(10));

                let keys: Vec<&String> = invoice.as_object().unwrap().keys().collect();
                assert_eq!(keys.len(), 6);
            }

            #[tokio::test]
            async fn test_get_invoice_nests_company() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;
                let invoice = rest_harness::create_invoice(&server, "ibm", 100.0).await;

                let response = server.get(&format!("/invoices/{}", invoice["id"])).await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                let fetched = &body["invoice"];

                assert_eq!(fetched["id"], invoice["id"]);
                assert_eq!(fetched["amt"], 100.0);
                assert_eq!(fetched["paid"], false);
                assert_eq!(fetched["add_date"], invoice["add_date"]);
                assert_eq!(fetched["paid_date"], Value::Null);
                assert_eq!(
                    fetched["company"],
                    json!({"code": "ibm", "name": "IBM", "description": "Big blue."})
                );
                assert!(fetched.get("comp_code").is_none());
            }

            #[tokio::test]
            async fn test_create_invoice_with_zero_amount_is_400() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;

                let response = server
                    .post("/invoices")
                    .json(&json!({"comp_code": "ibm", "amt": 0}))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

                let list: Value = server.get("/invoices").await.json();
                assert_eq!(list, json!({"invoices": []}));
            }

            #[tokio::test]
            async fn test_create_invoice_missing_fields_is_400() {
                let server = make_server().await;

                server
                    .post("/invoices")
                    .json(&json!({"amt": 10}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
                server
                    .post("/invoices")
                    .json(&json!({"comp_code": "ibm"}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
                server
                    .post("/invoices")
                    .json(&json!({}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_create_invoice_for_unknown_company_is_storage_error() {
                let server = make_server().await;

                server
                    .post("/invoices")
                    .json(&json!({"comp_code": "ghost", "amt": 10}))
                    .await
                    .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            }

            #[tokio::test]
            async fn test_update_invoice_amount() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;
                let invoice = rest_harness::create_invoice(&server, "ibm", 100.0).await;
                let path = format!("/invoices/{}", invoice["id"]);

                let response = server.put(&path).json(&json!({"amt": 250.5})).await;
                response.assert_status(StatusCode::OK);
                let updated = response.json::<Value>()["invoice"].clone();

                assert_eq!(updated["id"], invoice["id"]);
                assert_eq!(updated["amt"], 250.5);
                assert_eq!(updated["comp_code"], "ibm");
                assert_eq!(updated["paid"], false);
                assert_eq!(updated["add_date"], invoice["add_date"]);
                assert_eq!(updated["paid_date"], Value::Null);
            }

            #[tokio::test]
            async fn test_update_invoice_validation_and_404() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;
                let invoice = rest_harness::create_invoice(&server, "ibm", 100.0).await;

                server
                    .put(&format!("/invoices/{}", invoice["id"]))
                    .json(&json!({"amt": 0}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
                server
                    .put(&format!("/invoices/{}", invoice["id"]))
                    .json(&json!({}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
                server
                    .put("/invoices/999999")
                    .json(&json!({"amt": 5}))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_list_invoices_sorted_by_company() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ms", "Microsoft", "Windows").await;
                rest_harness::create_company(&server, "apple", "Apple", "Mac").await;
                rest_harness::create_invoice(&server, "ms", 10.0).await;
                rest_harness::create_invoice(&server, "apple", 20.0).await;
                rest_harness::create_invoice(&server, "ms", 30.0).await;

                let body: Value = server.get("/invoices").await.json();
                let invoices = body["invoices"].as_array().unwrap();
                let codes: Vec<&str> = invoices
                    .iter()
                    .map(|i| i["comp_code"].as_str().unwrap())
                    .collect();
                assert_eq!(codes, vec!["apple", "ms", "ms"]);

                for invoice in invoices {
                    let keys: Vec<&String> = invoice.as_object().unwrap().keys().collect();
                    assert_eq!(keys.len(), 2);
                    assert!(invoice["id"].as_i64().is_some());
                }
            }

            #[tokio::test]
            async fn test_delete_invoice_twice() {
                let server = make_server().await;
                rest_harness::create_company(&server, "ibm", "IBM", "Big blue.").await;
                let invoice = rest_harness::create_invoice(&server, "ibm", 100.0).await;
                let path = format!("/invoices/{}", invoice["id"]);

                let response = server.delete(&path).await;
                response.assert_status(StatusCode::OK);
                assert_eq!(response.json::<Value>(), json!({"status": "deleted"}));

                server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
                server.get(&path).await.assert_status(StatusCode::NOT_FOUND);

                let body: Value = server.get("/companies/ibm").await.json();
                assert_eq!(body["company"]["invoices"], json!([]));
            }

            #[tokio::test]
            async fn test_unknown_invoice_is_404() {
                let server = make_server().await;
                server
                    .get("/invoices/424242")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .get("/invoices/not-a-number")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .delete("/invoices/424242")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // End-to-end
            // ==============================================================

            #[tokio::test]
            async fn test_ibm_walkthrough() {
                let server = make_server().await;

                let response = server
                    .post("/companies")
                    .json(&json!({"code": "ibm", "name": "IBM", "description": "Big blue."}))
                    .await;
                response.assert_status(StatusCode::CREATED);
                assert_eq!(
                    response.json::<Value>(),
                    json!({"company": {"code": "ibm", "name": "IBM", "description": "Big blue."}})
                );

                let response = server.get("/companies/ibm").await;
                assert_eq!(
                    response.json::<Value>(),
                    json!({"company": {
                        "code": "ibm",
                        "name": "IBM",
                        "description": "Big blue.",
                        "invoices": []
                    }})
                );

                let response = server
                    .post("/invoices")
                    .json(&json!({"comp_code": "ibm", "amt": 100}))
                    .await;
                response.assert_status(StatusCode::CREATED);
                // Integer input comes back as a float
                assert!(response.text().contains(r#""amt":100.0"#));
                let invoice = response.json::<Value>()["invoice"].clone();
                assert_eq!(invoice["comp_code"], "ibm");
                assert_eq!(invoice["amt"], 100.0);
                assert_eq!(invoice["paid"], false);
                assert_eq!(invoice["paid_date"], Value::Null);

                let response = server.get(&format!("/invoices/{}", invoice["id"])).await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body["invoice"]["company"]["name"], "IBM");
            }
        }
    };
}
