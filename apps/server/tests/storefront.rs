use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use shop::domain::config::ApiConfig;
use shop_server::Server;
use tower::ServiceExt;

struct Page {
    status: StatusCode,
    location: Option<String>,
    cookie: Option<String>,
    body: String,
}

async fn app(namespace: &str) -> Router {
    let mut cfg = ApiConfig::default();
    cfg.database.namespace = namespace.to_owned();
    Server::builder().config(cfg).build().await.expect("server").router()
}

async fn send(app: &Router, request: Request<Body>) -> Page {
    let response = app.clone().oneshot(request).await.expect("response");
    let header = |name| {
        response.headers().get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
    };
    let location = header(header::LOCATION);
    let cookie = header(header::SET_COOKIE)
        .and_then(|v| v.split(';').next().map(str::to_owned));
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    Page { status, location, cookie, body: String::from_utf8(bytes.to_vec()).expect("utf-8") }
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri).header(header::COOKIE, cookie).body(Body::empty()).expect("request")
}

fn post(uri: &str, cookie: &str, form: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::REFERER, "/")
        .body(Body::from(form.to_owned()))
        .expect("request")
}

/// Opens a session on the home page and returns its cookie.
async fn visit(app: &Router) -> String {
    let page = send(app, Request::get("/").body(Body::empty()).expect("request")).await;
    assert_eq!(page.status, StatusCode::OK);
    page.cookie.expect("new visitors get a session cookie")
}

#[tokio::test]
async fn shopping_flow_from_cart_to_confirmation() {
    let app = app("flow_full").await;
    let cookie = visit(&app).await;

    // Only three watches are in stock.
    let page = send(&app, post("/add_to_cart", &cookie, "product_id=4&quantity=4")).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert!(page.cookie.is_none(), "known session keeps its cookie");
    let page = send(&app, get("/cart", &cookie)).await;
    assert!(page.body.contains("Not enough stock available."));
    assert!(page.body.contains("Your cart is empty."));

    send(&app, post("/add_to_cart", &cookie, "product_id=4&quantity=2")).await;
    send(&app, post("/add_to_cart", &cookie, "product_id=3&quantity=1")).await;

    let page = send(&app, post("/update_cart", &cookie, "qty_3=0&qty_4=1")).await;
    assert_eq!(page.location.as_deref(), Some("/cart"));
    let page = send(&app, get("/cart", &cookie)).await;
    assert!(page.body.contains("Classic Watch"));
    assert!(!page.body.contains("Sneakers"));
    assert!(page.body.contains("1999.00"));

    // A bypassed browser check still cannot place an order with a blank address.
    let page = send(&app, post("/checkout", &cookie, "name=Alice&address=+++")).await;
    assert_eq!(page.location.as_deref(), Some("/checkout"));
    let page = send(&app, get("/checkout", &cookie)).await;
    assert!(page.body.contains("Please fill required fields"));
    assert!(page.body.contains(r#"id="checkout-form""#));

    let page = send(&app, post("/checkout", &cookie, "name=+Alice+&address=123+Main+St")).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Thank you, Alice!"));

    let page = send(&app, get("/checkout", &cookie)).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/"));
    let page = send(&app, get("/", &cookie)).await;
    assert!(page.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn flash_banner_is_rendered_once_and_hidden() {
    let app = app("flow_flash").await;
    let cookie = visit(&app).await;

    let page = send(&app, get("/", &cookie)).await;
    assert!(!page.body.contains("flash-msg"));

    send(&app, post("/add_to_cart", &cookie, "product_id=1&quantity=1")).await;
    let page = send(&app, get("/", &cookie)).await;
    assert!(page.body.contains(r#"id="flash-msg""#));
    assert!(page.body.contains("display: none"));
    assert!(page.body.contains("Added to cart"));
    assert!(page.body.contains("/static/pkg/shop_web.js"));

    let page = send(&app, get("/", &cookie)).await;
    assert!(!page.body.contains("flash-msg"));
}

#[tokio::test]
async fn system_routes_and_docs_are_mounted() {
    let app = app("flow_system").await;

    let health = send(&app, get("/health", "")).await;
    assert_eq!(health.status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&health.body).expect("json");
    assert_eq!(health["status"], "up");
    assert_eq!(health["database"], true);

    let docs = send(&app, get("/api", "")).await;
    assert_eq!(docs.status, StatusCode::OK);

    let products = send(&app, get("/api/products", "")).await;
    let products: serde_json::Value = serde_json::from_str(&products.body).expect("json");
    assert_eq!(products.as_array().map(Vec::len), Some(4));
}
