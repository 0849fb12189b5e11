use actix_web::http::header::{ACCEPT, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::{test, HttpMessage};
use backend::db::txn::SharedTxn;
use backend::error::AppError;
use backend::repos::todos;
use serde_json::Value;

use crate::support::factory::create_test_todo;
use crate::support::{build_test_state, create_test_app};

#[tokio::test]
async fn form_post_with_method_delete_destroys() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    let todo = create_test_todo(shared.transaction(), "Via form").await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri(&format!("/todos/{}?_method=DELETE", todo.id))
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    drop(resp);

    assert!(todos::find(shared.transaction(), todo.id).await?.is_none());

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn form_post_with_method_put_updates() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    let todo = create_test_todo(shared.transaction(), "Before").await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri(&format!("/todos/{}?_method=put", todo.id))
        .insert_header((ACCEPT, "application/json"))
        .insert_header((CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("title=After")
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["title"], "After");

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn get_requests_are_never_rewritten() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    let todo = create_test_todo(shared.transaction(), "Still here").await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}?_method=DELETE", todo.id))
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    drop(resp);

    assert!(todos::find(shared.transaction(), todo.id).await?.is_some());

    shared.rollback().await?;
    Ok(())
}
