use actix_web::http::header::ACCEPT;
use actix_web::http::StatusCode;
use actix_web::{test, HttpMessage};
use backend::adapters::todos_sea::TodoCreate;
use backend::db::txn::SharedTxn;
use backend::error::AppError;
use backend::repos::todos;
use serde_json::Value;

use crate::common::assert_problem;
use crate::support::factory::create_test_todo_with;
use crate::support::{build_test_state, create_test_app};

#[tokio::test]
async fn show_returns_the_persisted_values() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    let todo = create_test_todo_with(
        shared.transaction(),
        TodoCreate::new("Buy milk")
            .with_description("two litres")
            .with_completed(true),
    )
    .await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}", todo.id))
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], todo.id.to_string());
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["description"], "two litres");
    assert_eq!(body["completed"], true);
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn show_renders_html_for_browsers() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    let todo = create_test_todo_with(shared.transaction(), TodoCreate::new("Walk dog")).await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}", todo.id))
        .insert_header((ACCEPT, "text/html"))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("<h1>Walk dog</h1>"));
    assert!(html.contains(&format!("/todos/{}/edit", todo.id)));

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn unparsable_id_is_not_found_without_side_effects() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state.clone())
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::get()
        .uri("/todos/does-not-exist")
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "TODO_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Todo does-not-exist not found"),
    )
    .await;

    assert_eq!(todos::count(state.db()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn unknown_uuid_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let id = uuid::Uuid::new_v4();
    let req = test::TestRequest::get()
        .uri(&format!("/todos/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Errors are problem+json whatever the client accepts.
    assert_problem(
        resp,
        "TODO_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some(&format!("Todo {id} not found")),
    )
    .await;
    Ok(())
}
