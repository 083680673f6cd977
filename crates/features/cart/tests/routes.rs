#![cfg(feature = "server")]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::response::Response;
use http_body_util::BodyExt;
use shop_cart::CartFeature;
use shop_database::Database;
use shop_kernel::domain::config::ApiConfig;
use shop_kernel::server::{ApiState, session_middleware};
use tower::ServiceExt;

async fn state(ns: &str) -> ApiState {
    let db = Database::builder().url("mem://").session(ns, "store").init().await.expect("mem://");
    ApiState::builder()
        .config(ApiConfig::default())
        .register_slice(shop_cart::init(&db))
        .db(db)
        .build()
        .expect("state")
}

fn app(state: &ApiState) -> Router {
    let (router, _) = shop_cart::router().split_for_parts();
    router
        .layer(from_fn_with_state(state.sessions.clone(), session_middleware))
        .with_state(state.clone())
}

fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_owned()
}

fn location(response: &Response) -> &str {
    response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

async fn post_form(app: Router, uri: &str, cookie: Option<&str>, body: &str) -> Response {
    let mut request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::REFERER, "/product/1");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.oneshot(request.body(Body::from(body.to_owned())).expect("request"))
        .await
        .expect("response")
}

async fn get_text(app: Router, uri: &str, cookie: &str) -> (StatusCode, String) {
    let request = Request::get(uri).header(header::COOKIE, cookie).body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8"))
}

#[tokio::test]
async fn add_within_stock_fills_cart_and_redirects_back() {
    let state = state("cart_add").await;

    let response = post_form(app(&state), "/add_to_cart", None, "product_id=1&quantity=2").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/product/1");
    let cookie = session_cookie(&response);

    let (status, html) = get_text(app(&state), "/cart", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Red Shirt"));
    assert!(html.contains(r#"name="qty_1""#));
    assert!(html.contains("598.00"));
    assert!(html.contains("Added to cart"));

    // Flashes are shown once.
    let (_, html) = get_text(app(&state), "/cart", &cookie).await;
    assert!(!html.contains("flash-msg"));
}

#[tokio::test]
async fn add_beyond_stock_is_refused_with_flash() {
    let state = state("cart_stock").await;

    let response = post_form(app(&state), "/add_to_cart", None, "product_id=4&quantity=4").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response);

    let (_, html) = get_text(app(&state), "/cart", &cookie).await;
    assert!(html.contains("Not enough stock available."));
    assert!(html.contains("Your cart is empty."));
}

#[tokio::test]
async fn unknown_product_and_bad_quantity_are_flashed() {
    let state = state("cart_invalid").await;

    let response = post_form(app(&state), "/add_to_cart", None, "product_id=42&quantity=1").await;
    let cookie = session_cookie(&response);
    let response =
        post_form(app(&state), "/add_to_cart", Some(&cookie), "product_id=1&quantity=0").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, html) = get_text(app(&state), "/cart", &cookie).await;
    assert!(html.contains("Product not found."));
    assert!(html.contains("Quantity must be at least 1."));
}

#[tokio::test]
async fn update_sets_and_removes_lines() {
    let state = state("cart_update").await;

    let response = post_form(app(&state), "/add_to_cart", None, "product_id=1&quantity=1").await;
    let cookie = session_cookie(&response);
    post_form(app(&state), "/add_to_cart", Some(&cookie), "product_id=2&quantity=2").await;

    let response =
        post_form(app(&state), "/update_cart", Some(&cookie), "qty_1=3&qty_2=0").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");

    let (_, body) = get_text(app(&state), "/api/cart", &cookie).await;
    let cart: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(cart["lines"].as_array().map(Vec::len), Some(1));
    assert_eq!(cart["lines"][0]["productId"], 1);
    assert_eq!(cart["itemCount"], 3);
    assert_eq!(cart["totalDisplay"], "897.00");
}

#[tokio::test]
async fn cart_api_for_new_visitor_is_empty() {
    let state = state("cart_api_empty").await;
    let (status, body) = get_text(app(&state), "/api/cart", "shop_session=unknown").await;

    assert_eq!(status, StatusCode::OK);
    let cart: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(cart["itemCount"], 0);
    assert_eq!(cart["total"], 0);
    assert!(state.try_get_slice::<CartFeature>().is_ok());
}
