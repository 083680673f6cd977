//! Server-side rendering of the storefront pages.
//!
//! Pages are Dioxus components rendered once per request into a complete HTML document.
//! Every page goes through [`Layout`], which owns the DOM contract with the browser page
//! script: the optional `#flash-msg` banner and the module script that boots it.

use axum::http::{HeaderMap, header};
use axum::response::{Html, Redirect};
use dioxus::prelude::*;
use shop_domain::constants::FLASH_ELEMENT_ID;
use shop_domain::flash::FlashMessage;

pub const STYLESHEET: &str = "/static/css/shop.css";
const PAGE_SCRIPT: &str = "import init from '/static/pkg/shop_web.js'; init();";

/// Renders `page` with `props` into a full HTML document.
pub fn render_page<P: Clone + 'static>(page: fn(P) -> Element, props: P) -> Html<String> {
    let mut dom = VirtualDom::new_with_props(page, props);
    dom.rebuild_in_place();
    Html(format!("<!DOCTYPE html>{}", dioxus::ssr::render(&dom)))
}

/// Redirects to the page named by `Referer` when it belongs to this site (same `Host`, or a
/// bare path), otherwise to the home page.
#[must_use]
pub fn redirect_back(headers: &HeaderMap) -> Redirect {
    let host = headers.get(header::HOST).and_then(|value| value.to_str().ok());
    let target = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|referer| local_target(referer, host))
        .unwrap_or("/");
    Redirect::to(target)
}

/// Path part of `referer` when it points at `host`; `None` for other sites.
fn local_target<'a>(referer: &'a str, host: Option<&str>) -> Option<&'a str> {
    let path = if referer.starts_with('/') {
        referer
    } else {
        let (scheme, rest) = referer.split_once("://")?;
        if !(scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")) {
            return None;
        }
        let (authority, path) = rest.find('/').map_or((rest, "/"), |at| rest.split_at(at));
        if !host.is_some_and(|host| host.eq_ignore_ascii_case(authority)) {
            return None;
        }
        path
    };
    let on_site = !path.starts_with("//") && !path.starts_with("/\\");
    on_site.then_some(path)
}

/// Document shell shared by all pages.
///
/// The flash banner is rendered hidden and only when `flashes` is non-empty; the page
/// script fades it in and out. Callers pass flashes drained from the session so each
/// message is shown exactly once.
#[component]
pub fn Layout(title: String, flashes: Vec<FlashMessage>, children: Element) -> Element {
    rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1" }
                title { "{title} | Shop" }
                link { rel: "stylesheet", href: STYLESHEET }
            }
            body {
                header { class: "site-header",
                    a { class: "brand", href: "/", "Shop" }
                    nav {
                        a { href: "/", "Products" }
                        a { href: "/cart", "Cart" }
                    }
                }
                if !flashes.is_empty() {
                    div { id: FLASH_ELEMENT_ID, style: "display: none",
                        for message in flashes.iter() {
                            p { class: message.level.css_class(), "{message.text}" }
                        }
                    }
                }
                main { class: "container", {children} }
                script { r#type: "module", dangerous_inner_html: PAGE_SCRIPT }
            }
        }
    }
}

/// Plain message page (not found, errors).
#[component]
pub fn MessagePage(title: String, message: String, flashes: Vec<FlashMessage>) -> Element {
    rsx! {
        Layout { title: title.clone(), flashes,
            section { class: "message",
                h1 { "{title}" }
                p { "{message}" }
                a { class: "button", href: "/", "Continue shopping" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_page(flashes: Vec<FlashMessage>) -> String {
        render_page(
            MessagePage,
            MessagePageProps {
                title: "Not found".to_owned(),
                message: "No such product.".to_owned(),
                flashes,
            },
        )
        .0
    }

    #[test]
    fn layout_without_flashes_has_no_banner() {
        let html = message_page(Vec::new());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains(FLASH_ELEMENT_ID));
        assert!(html.contains("/static/pkg/shop_web.js"));
        assert!(html.contains("No such product."));
    }

    #[test]
    fn layout_renders_hidden_banner_for_flashes() {
        let html = message_page(vec![FlashMessage::info("Added to cart")]);
        assert!(html.contains(r#"id="flash-msg""#));
        assert!(html.contains("display: none"));
        assert!(html.contains("Added to cart"));
    }

    #[test]
    fn redirect_back_prefers_referer() {
        use axum::response::IntoResponse;

        let mut headers = HeaderMap::new();
        let home = redirect_back(&headers).into_response();
        assert_eq!(home.headers().get(header::LOCATION).map(|v| v.as_bytes()), Some(&b"/"[..]));

        headers.insert(header::REFERER, "/product/2".parse().expect("header"));
        let back = redirect_back(&headers).into_response();
        assert_eq!(
            back.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(&b"/product/2"[..])
        );
    }

    #[test]
    fn redirect_back_stays_on_site() {
        use axum::response::IntoResponse;

        for referer in [
            "https://evil.example/",
            "http://evil.example/cart",
            "//evil.example/cart",
            "/\\evil.example",
            "javascript://shop.test/%0Aalert(1)",
            "cart",
        ] {
            let mut headers = HeaderMap::new();
            headers.insert(header::HOST, "shop.test".parse().expect("header"));
            headers.insert(header::REFERER, referer.parse().expect("header"));
            let response = redirect_back(&headers).into_response();
            assert_eq!(
                response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
                Some(&b"/"[..]),
                "{referer} should fall back home"
            );
        }
    }

    #[test]
    fn redirect_back_accepts_absolute_referer_of_this_host() {
        use axum::response::IntoResponse;

        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "shop.test:5000".parse().expect("header"));
        headers.insert(header::REFERER, "http://shop.test:5000/product/3?x=1".parse().expect("header"));
        let response = redirect_back(&headers).into_response();
        assert_eq!(
            response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(&b"/product/3?x=1"[..])
        );
    }
}
