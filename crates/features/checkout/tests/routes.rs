#![cfg(feature = "server")]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::response::Response;
use http_body_util::BodyExt;
use shop_database::Database;
use shop_kernel::domain::config::ApiConfig;
use shop_kernel::server::{ApiState, Session, session_middleware};
use tower::ServiceExt;

async fn state(ns: &str) -> ApiState {
    let db = Database::builder().url("mem://").session(ns, "store").init().await.expect("mem://");
    ApiState::builder()
        .config(ApiConfig::default())
        .register_slice(shop_checkout::init(&db))
        .db(db)
        .build()
        .expect("state")
}

fn app(state: &ApiState) -> Router {
    let (router, _) = shop_checkout::router().split_for_parts();
    router
        .layer(from_fn_with_state(state.sessions.clone(), session_middleware))
        .with_state(state.clone())
}

/// A session holding two shirts, and the cookie that selects it.
fn shopper(state: &ApiState) -> (Session, String) {
    let (session, _) = state.sessions.open(None);
    session.with(|data| data.cart.add(1, 2));
    let cookie = format!("{}={}", state.sessions.cookie_name(), session.id());
    (session, cookie)
}

async fn send(app: Router, request: Request<Body>) -> (Response, String) {
    let response = app.oneshot(request).await.expect("response");
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.expect("body").to_bytes();
    (Response::from_parts(parts, Body::empty()), String::from_utf8(bytes.to_vec()).expect("utf-8"))
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri).header(header::COOKIE, cookie).body(Body::empty()).expect("request")
}

fn post(cookie: &str, body: &str) -> Request<Body> {
    Request::post("/checkout")
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

fn location(response: &Response) -> Option<&str> {
    response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn empty_cart_redirects_home_with_flash() {
    let state = state("checkout_empty").await;
    let (session, _) = state.sessions.open(None);
    let cookie = format!("shop_session={}", session.id());

    let (response, _) = send(app(&state), get("/checkout", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    let (response, _) = send(app(&state), post(&cookie, "name=Alice&address=Main")).await;
    assert_eq!(location(&response), Some("/"));

    let texts: Vec<_> = session.take_flashes().into_iter().map(|f| f.text).collect();
    assert_eq!(texts, ["Your cart is empty.", "Your cart is empty."]);
}

#[tokio::test]
async fn checkout_page_renders_guarded_form() {
    let state = state("checkout_page").await;
    let (_, cookie) = shopper(&state);

    let (response, html) = send(app(&state), get("/checkout", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(html.contains(r#"id="checkout-form""#));
    assert!(html.contains(r#"name="name""#));
    assert!(html.contains("<textarea"));
    assert!(html.contains(r#"name="address""#));
    assert!(html.contains("Red Shirt x 2"));
    assert!(html.contains("598.00"));
}

#[tokio::test]
async fn blank_fields_are_refused_and_cart_is_kept() {
    let state = state("checkout_blank").await;
    let (session, cookie) = shopper(&state);

    for body in ["name=&address=123+Main+St", "name=Alice&address=+++", "name=%20%09"] {
        let (response, _) = send(app(&state), post(&cookie, body)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{body}");
        assert_eq!(location(&response), Some("/checkout"));
    }

    assert_eq!(session.cart().quantity(1), 2);
    let flashes = session.take_flashes();
    assert_eq!(flashes.len(), 3);
    assert!(flashes.iter().all(|f| f.text == "Please fill required fields"));
}

#[tokio::test]
async fn valid_order_greets_trimmed_name_and_clears_cart() {
    let state = state("checkout_success").await;
    let (session, cookie) = shopper(&state);

    let (response, html) =
        send(app(&state), post(&cookie, "name=++Alice+&address=123+Main+St")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(html.contains("Thank you, Alice!"));
    assert!(html.contains("598.00"));
    assert!(session.cart().is_empty());

    let (response, _) = send(app(&state), get("/checkout", &cookie)).await;
    assert_eq!(location(&response), Some("/"));
}
