use actix_web::http::header::ACCEPT;
use actix_web::http::StatusCode;
use actix_web::{test, HttpMessage};
use backend::db::txn::SharedTxn;
use backend::error::AppError;
use serde_json::Value;

use crate::support::factory::create_test_todos;
use crate::support::{build_test_state, create_test_app};

#[tokio::test]
async fn first_page_is_capped_and_reports_the_full_count() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    create_test_todos(shared.transaction(), "Chore", 25).await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/todos?page=1&per_page=20")
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let todos = body["todos"].as_array().expect("todos should be an array");
    assert_eq!(todos.len(), 20);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["per_page"], 20);
    assert_eq!(body["pagination"]["offset"], 0);
    assert_eq!(body["pagination"]["total_entries_size"], 25);
    assert_eq!(body["pagination"]["current_entries_size"], 20);
    assert_eq!(body["pagination"]["total_pages"], 2);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn second_page_holds_the_remainder() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    create_test_todos(shared.transaction(), "Chore", 25).await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/todos?page=2&per_page=20")
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["todos"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["pagination"]["offset"], 20);
    assert_eq!(body["pagination"]["current_entries_size"], 5);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn bad_paging_params_fall_back_to_defaults() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/todos?page=abc&per_page=0")
        .insert_header((ACCEPT, "application/json"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["todos"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["per_page"], 20);
    assert_eq!(body["pagination"]["total_entries_size"], 0);
    assert_eq!(body["pagination"]["total_pages"], 0);
    Ok(())
}

#[tokio::test]
async fn per_page_is_capped() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/todos?per_page=5000")
        .insert_header((ACCEPT, "application/json"))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["per_page"], 100);
    Ok(())
}

#[tokio::test]
async fn huge_page_numbers_return_an_empty_page_with_the_real_total() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    create_test_todos(shared.transaction(), "Chore", 3).await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    for (uri, per_page) in [
        ("/todos?page=18446744073709551615&per_page=20", 20u64),
        ("/todos?page=1000000000000000000&per_page=100", 100u64),
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((ACCEPT, "application/json"))
            .to_request();
        req.extensions_mut().insert(shared.clone());

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["todos"].as_array().map(Vec::len), Some(0), "{uri}");
        assert_eq!(body["pagination"]["per_page"], per_page);
        assert_eq!(body["pagination"]["total_entries_size"], 3);
        assert_eq!(body["pagination"]["current_entries_size"], 0);
        let offset = body["pagination"]["offset"]
            .as_u64()
            .expect("offset should be a number");
        assert!(offset <= i64::MAX as u64, "{uri}: offset {offset}");
    }

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn html_index_lists_titles() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    create_test_todos(shared.transaction(), "Water <plants>", 2).await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/todos")
        .insert_header((ACCEPT, "text/html"))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("Water &lt;plants&gt; 1"), "titles are escaped");
    assert!(html.contains("Water &lt;plants&gt; 2"));
    assert!(html.contains("Page 1 of 1 (2 total)"));

    shared.rollback().await?;
    Ok(())
}
