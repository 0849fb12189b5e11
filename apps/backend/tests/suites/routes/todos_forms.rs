use actix_web::http::header::ACCEPT;
use actix_web::http::StatusCode;
use actix_web::{test, web, HttpMessage};
use backend::adapters::todos_sea::TodoCreate;
use backend::db::txn::SharedTxn;
use backend::error::AppError;
use backend::routes::todos::configure_routes;
use serde_json::Value;

use crate::common::assert_problem;
use crate::support::factory::create_test_todo_with;
use crate::support::{build_test_state, create_test_app};

#[tokio::test]
async fn new_renders_an_empty_form() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/todos/new").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("<h1>New Todo</h1>"));
    assert!(html.contains(r#"name="title" value="""#));
    assert!(!html.contains(r#"class="field-error""#));
    Ok(())
}

#[tokio::test]
async fn new_as_json_returns_the_defaults() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/todos/new")
        .insert_header((ACCEPT, "application/json"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["title"], "");
    assert_eq!(body["description"], "");
    assert_eq!(body["completed"], false);
    Ok(())
}

#[tokio::test]
async fn new_does_not_need_a_transaction() -> Result<(), AppError> {
    let state = build_test_state().await?;

    // No transaction layer around the handlers.
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.service(web::scope("/todos").configure(configure_routes));
        })
        .build()
        .await?;

    let req = test::TestRequest::get().uri("/todos/new").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("<h1>New Todo</h1>"));
    Ok(())
}

#[tokio::test]
async fn edit_prefills_the_stored_values() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(state.db()).await?;
    let todo = create_test_todo_with(
        shared.transaction(),
        TodoCreate::new("Paint fence")
            .with_description("white")
            .with_completed(true),
    )
    .await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}/edit", todo.id))
        .to_request();
    req.extensions_mut().insert(shared.clone());

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("<h1>Edit Todo</h1>"));
    assert!(html.contains(r#"value="Paint fence""#));
    assert!(html.contains(">white</textarea>"));
    assert!(html.contains(r#"<option value="true" selected>"#));

    shared.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn edit_of_missing_todo_is_404() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}/edit", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(resp, "TODO_NOT_FOUND", StatusCode::NOT_FOUND, None).await;
    Ok(())
}
