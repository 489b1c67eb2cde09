//! Router-level tests against an in-memory store; no Postgres required.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use db::{mock::InMemoryJobStore, models::JobPostingRow};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{router, AppState};

fn posting(
    id: i32,
    title: &str,
    ministry: &str,
    deadline: (i32, u32, u32),
    is_urgent: bool,
    is_new: bool,
) -> JobPostingRow {
    let (y, m, d) = deadline;
    JobPostingRow {
        id,
        title: title.into(),
        ministry: ministry.into(),
        job_type: "Permanent".into(),
        application_period_end: NaiveDate::from_ymd_opt(y, m, d),
        created_at: NaiveDate::from_ymd_opt(2024, 1, id as u32)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap(),
        is_urgent,
        is_new,
    }
}

/// Ministries A, A, B; one urgent, one new, no overlap.
fn seeded() -> Vec<JobPostingRow> {
    vec![
        posting(1, "School Inspector", "Ministry of Education", (2024, 4, 1), true, false),
        posting(2, "Curriculum Designer", "Ministry of Education", (2024, 2, 1), false, true),
        posting(3, "Budget Analyst", "Ministry of Finance", (2024, 3, 1), false, false),
    ]
}

fn app_with(store: InMemoryJobStore) -> Router {
    router(AppState::new(Arc::new(store)))
}

fn app() -> Router {
    app_with(InMemoryJobStore::new(seeded()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, _, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn ids(body: &Value) -> Vec<i64> {
    body["jobPostings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["id"].as_i64().unwrap())
        .collect()
}

// ============================================================
// GET /api/statistics
// ============================================================

#[tokio::test]
async fn statistics_over_seeded_postings() {
    let (status, body) = get_json(app(), "/api/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "totalJobs": 3, "urgentJobs": 1, "newJobs": 1, "ministries": 2 })
    );
}

#[tokio::test]
async fn statistics_on_empty_table_are_zero() {
    let (status, body) = get_json(app_with(InMemoryJobStore::default()), "/api/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "totalJobs": 0, "urgentJobs": 0, "newJobs": 0, "ministries": 0 })
    );
}

#[tokio::test]
async fn statistics_failure_is_a_generic_500() {
    let (status, body) = get_json(app_with(InMemoryJobStore::unavailable()), "/api/statistics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch statistics" }));
}

// ============================================================
// GET /api/jobs
// ============================================================

#[tokio::test]
async fn second_page_of_one_sorted_by_ministry() {
    let (status, body) = get_json(app(), "/api/jobs?limit=1&page=2&sortBy=ministry").await;
    assert_eq!(status, StatusCode::OK);

    let postings = body["jobPostings"].as_array().unwrap();
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0]["ministry"], json!("Ministry of Education"));
    assert_eq!(
        body["pagination"],
        json!({ "page": 2, "limit": 1, "total": 3, "totalPages": 3 })
    );
}

#[tokio::test]
async fn defaults_list_latest_first() {
    let (status, body) = get_json(app(), "/api/jobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 2, 1]);
    assert_eq!(
        body["pagination"],
        json!({ "page": 1, "limit": 10, "total": 3, "totalPages": 1 })
    );
}

#[tokio::test]
async fn postings_use_camel_case_fields() {
    let (_, body) = get_json(app(), "/api/jobs?sortBy=deadline&limit=1").await;
    let first = &body["jobPostings"][0];
    assert_eq!(first["title"], json!("Curriculum Designer"));
    assert_eq!(first["jobType"], json!("Permanent"));
    assert_eq!(first["applicationPeriodEnd"], json!("2024-02-01"));
    assert_eq!(first["isNew"], json!(true));
    assert_eq!(first["isUrgent"], json!(false));
}

#[tokio::test]
async fn limit_above_max_is_clamped() {
    let (_, body) = get_json(app(), "/api/jobs?limit=500").await;
    assert_eq!(body["pagination"]["limit"], json!(50));
}

#[tokio::test]
async fn non_numeric_paging_falls_back_to_defaults() {
    let (status, body) = get_json(app(), "/api/jobs?page=abc&limit=xyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], json!(1));
    assert_eq!(body["pagination"]["limit"], json!(10));
}

#[tokio::test]
async fn malformed_query_string_is_normalised_not_rejected() {
    let (status, body) = get_json(app(), "/api/jobs?page=2&page=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], json!(1));
}

#[tokio::test]
async fn total_is_invariant_under_paging() {
    for uri in ["/api/jobs?limit=1", "/api/jobs?limit=2&page=2", "/api/jobs?limit=50&page=9"] {
        let (_, body) = get_json(app(), uri).await;
        assert_eq!(body["pagination"]["total"], json!(3), "{uri}");
        assert!(ids(&body).len() as i64 <= body["pagination"]["limit"].as_i64().unwrap());
    }
}

#[tokio::test]
async fn ministry_filter_returns_exact_matches_only() {
    let (_, body) = get_json(app(), "/api/jobs?ministry=Ministry%20of%20Finance").await;
    assert_eq!(ids(&body), vec![3]);
    assert_eq!(body["pagination"]["total"], json!(1));

    let (_, body) = get_json(app(), "/api/jobs?ministry=Finance").await;
    assert!(ids(&body).is_empty());
    assert_eq!(body["pagination"]["totalPages"], json!(0));
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let (_, body) = get_json(app(), "/api/jobs?search=EDUCATION").await;
    assert_eq!(ids(&body), vec![2, 1]);

    let (_, body) = get_json(app(), "/api/jobs?search=analyst").await;
    assert_eq!(ids(&body), vec![3]);
}

#[tokio::test]
async fn search_and_ministry_combine_with_and() {
    let (_, body) = get_json(app(), "/api/jobs?search=designer&ministry=Ministry%20of%20Education").await;
    assert_eq!(ids(&body), vec![2]);

    let (_, body) = get_json(app(), "/api/jobs?search=designer&ministry=Ministry%20of%20Finance").await;
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn deadline_order_holds_across_consecutive_pages() {
    let (_, first) = get_json(app(), "/api/jobs?sortBy=deadline&limit=2&page=1").await;
    let (_, second) = get_json(app(), "/api/jobs?sortBy=deadline&limit=2&page=2").await;

    let deadlines: Vec<String> = [first, second]
        .iter()
        .flat_map(|b| b["jobPostings"].as_array().unwrap().clone())
        .map(|j| j["applicationPeriodEnd"].as_str().unwrap().to_owned())
        .collect();

    assert_eq!(deadlines.len(), 3);
    assert!(deadlines.windows(2).all(|w| w[0] <= w[1]), "{deadlines:?}");
}

#[tokio::test]
async fn jobs_failure_is_a_generic_500() {
    let (status, body) = get_json(app_with(InMemoryJobStore::unavailable()), "/api/jobs").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch job postings" }));
}

// ============================================================
// Methods and CORS
// ============================================================

#[tokio::test]
async fn other_methods_are_not_allowed() {
    for uri in ["/api/jobs", "/api/statistics"] {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD] {
            let req = Request::builder()
                .method(method.clone())
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let (status, _, body) = send(app(), req).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");

            // HEAD responses never carry a body.
            if method != Method::HEAD {
                let body: Value = serde_json::from_slice(&body).unwrap();
                assert_eq!(body, json!({ "error": "Method not allowed" }));
            }
        }
    }
}

#[tokio::test]
async fn options_returns_empty_ok() {
    for uri in ["/api/jobs", "/api/statistics"] {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn browser_preflight_advertises_methods_and_headers() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/jobs")
        .header(header::ORIGIN, "https://jobs.example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    for m in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(m), "{methods}");
    }
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type") && allowed.contains("authorization"), "{allowed}");
}

fn assert_cors_headers(headers: &HeaderMap, context: &str) {
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*", "{context}");

    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    for m in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(m), "{context}: {methods}");
    }

    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(
        allowed.contains("content-type") && allowed.contains("authorization"),
        "{context}: {allowed}"
    );
}

#[tokio::test]
async fn cross_origin_responses_carry_all_cors_headers() {
    for uri in ["/api/jobs", "/api/statistics"] {
        let req = Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "https://elsewhere.example")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_cors_headers(&headers, uri);
    }

    let req = Request::builder()
        .method(Method::DELETE)
        .uri("/api/jobs")
        .header(header::ORIGIN, "https://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(app(), req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_cors_headers(&headers, "DELETE /api/jobs");
}

#[tokio::test]
async fn cors_headers_do_not_depend_on_an_origin_header() {
    let req = Request::builder().uri("/api/jobs").body(Body::empty()).unwrap();
    let (status, headers, _) = send(app(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_cors_headers(&headers, "GET /api/jobs");

    let failing = app_with(InMemoryJobStore::unavailable());
    let req = Request::builder().uri("/api/statistics").body(Body::empty()).unwrap();
    let (status, headers, _) = send(failing, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&headers, "GET /api/statistics (failing store)");
}
