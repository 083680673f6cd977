use crate::CartFeature;
use axum::Form;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use dioxus::prelude::*;
use serde::Deserialize;
use shop_domain::cart::CartSummary;
use shop_domain::constants::{FLASH_ADDED_TO_CART, FLASH_CART_UPDATED};
use shop_domain::flash::FlashMessage;
use shop_kernel::server::{ApiError, ApiState, Layout, Session, redirect_back, render_page};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
pub(crate) struct AddToCartForm {
    product_id: u32,
    #[serde(default = "one")]
    quantity: i64,
}

const fn one() -> i64 {
    1
}

#[component]
pub fn CartPage(summary: CartSummary, flashes: Vec<FlashMessage>) -> Element {
    rsx! {
        Layout { title: "Your cart", flashes,
            h1 { "Your cart" }
            if summary.is_empty() {
                p { class: "empty", "Your cart is empty." }
                a { class: "button", href: "/", "Browse products" }
            } else {
                form { method: "post", action: "/update_cart", class: "cart",
                    table {
                        thead {
                            tr {
                                th { "Product" }
                                th { "Price" }
                                th { "Quantity" }
                                th { "Subtotal" }
                            }
                        }
                        tbody {
                            for line in summary.lines.iter() {
                                tr { key: "{line.product.id}",
                                    td {
                                        a { href: "/product/{line.product.id}", "{line.product.name}" }
                                    }
                                    td { "{line.product.price}" }
                                    td {
                                        input {
                                            r#type: "number",
                                            name: "qty_{line.product.id}",
                                            value: "{line.quantity}",
                                            min: "0",
                                        }
                                    }
                                    td { "{line.subtotal}" }
                                }
                            }
                        }
                        tfoot {
                            tr {
                                td { colspan: "3", "Total" }
                                td { class: "total", "{summary.total}" }
                            }
                        }
                    }
                    div { class: "actions",
                        button { r#type: "submit", "Update cart" }
                        a { class: "button primary", href: "/checkout", "Checkout" }
                    }
                }
            }
        }
    }
}

pub(crate) async fn add_to_cart(
    State(state): State<ApiState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect, ApiError> {
    let service = state.try_get_slice::<CartFeature>()?.service.clone();

    match service.add(&session, form.product_id, form.quantity).await {
        Ok(_) => session.flash(FlashMessage::info(FLASH_ADDED_TO_CART)),
        Err(err) => match err.flash() {
            Some(flash) => {
                warn!(product_id = form.product_id, error = %err, "Add to cart refused");
                session.flash(flash);
            },
            None => return Err(err.into()),
        },
    }
    Ok(redirect_back(&headers))
}

pub(crate) async fn view_cart(
    State(state): State<ApiState>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let service = state.try_get_slice::<CartFeature>()?.service.clone();
    let summary = service.summary(&session).await?;
    Ok(render_page(CartPage, CartPageProps { summary, flashes: session.take_flashes() }))
}

pub(crate) async fn update_cart(
    State(state): State<ApiState>,
    session: Session,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, ApiError> {
    let service = &state.try_get_slice::<CartFeature>()?.service;
    let applied = service.update(&session, &fields);
    debug!(applied, "Cart quantities updated");
    session.flash(FlashMessage::info(FLASH_CART_UPDATED));
    Ok(Redirect::to("/cart"))
}
