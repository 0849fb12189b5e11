use actix_web::http::header::ACCEPT;
use actix_web::http::StatusCode;
use actix_web::{test, HttpMessage};
use backend::db::txn::SharedTxn;
use backend::error::AppError;
use backend::repos::todos;
use backend::routes::todos::DESTROYED_MESSAGE;
use serde_json::Value;

use crate::common::assert_problem;
use crate::support::factory::create_test_todo;
use crate::support::{build_test_state, create_test_app};

#[tokio::test]
async fn destroy_removes_the_row_and_returns_it() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    let todo = create_test_todo(shared.transaction(), "Temporary").await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::delete()
        .uri(&format!("/todos/{}", todo.id))
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], todo.id.to_string());
    assert_eq!(body["title"], "Temporary");

    assert!(todos::find(shared.transaction(), todo.id).await?.is_none());
    assert_eq!(todos::count(shared.transaction()).await?, 0);

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn second_destroy_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    let todo = create_test_todo(shared.transaction(), "Once").await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let first = test::TestRequest::delete()
        .uri(&format!("/todos/{}", todo.id))
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    first.extensions_mut().insert(shared.clone());
    let resp = test::call_service(&app, first).await;
    assert_eq!(resp.status(), StatusCode::OK);
    drop(resp);

    let second = test::TestRequest::delete()
        .uri(&format!("/todos/{}", todo.id))
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    second.extensions_mut().insert(shared.clone());
    let resp = test::call_service(&app, second).await;
    assert_problem(
        resp,
        "TODO_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some(&format!("Todo {} not found", todo.id)),
    )
    .await;

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn html_destroy_renders_the_removed_todo_without_controls() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    let todo = create_test_todo(shared.transaction(), "Gone soon").await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::delete()
        .uri(&format!("/todos/{}", todo.id))
        .insert_header((ACCEPT, "text/html"))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains(DESTROYED_MESSAGE));
    assert!(html.contains("<h1>Gone soon</h1>"));
    assert!(!html.contains(&format!("/todos/{}/edit", todo.id)));

    shared.rollback().await?;
    Ok(())
}
