use crate::{Checkout, CheckoutError};
use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use dioxus::prelude::*;
use shop_domain::cart::CartSummary;
use shop_domain::checkout::CheckoutForm;
use shop_domain::constants::{ADDRESS_FIELD, CHECKOUT_FORM_ID, NAME_FIELD};
use shop_domain::flash::FlashMessage;
use shop_kernel::server::{ApiError, ApiState, Layout, Session, render_page};
use tracing::debug;

#[component]
pub fn CheckoutPage(summary: CartSummary, flashes: Vec<FlashMessage>) -> Element {
    rsx! {
        Layout { title: "Checkout", flashes,
            h1 { "Checkout" }
            OrderSummary { summary }
            form { id: CHECKOUT_FORM_ID, method: "post", action: "/checkout", class: "checkout",
                label { r#for: NAME_FIELD, "Name" }
                input { id: NAME_FIELD, r#type: "text", name: NAME_FIELD }
                label { r#for: ADDRESS_FIELD, "Address" }
                textarea { id: ADDRESS_FIELD, name: ADDRESS_FIELD, rows: "3" }
                button { r#type: "submit", class: "primary", "Place order" }
            }
        }
    }
}

#[component]
pub fn SuccessPage(name: String, summary: CartSummary, flashes: Vec<FlashMessage>) -> Element {
    rsx! {
        Layout { title: "Order placed", flashes,
            section { class: "message",
                h1 { "Thank you, {name}!" }
                p { "Your order has been placed." }
                OrderSummary { summary }
                a { class: "button", href: "/", "Continue shopping" }
            }
        }
    }
}

#[component]
fn OrderSummary(summary: CartSummary) -> Element {
    rsx! {
        table { class: "order-summary",
            tbody {
                for line in summary.lines.iter() {
                    tr { key: "{line.product.id}",
                        td { "{line.product.name} x {line.quantity}" }
                        td { "{line.subtotal}" }
                    }
                }
            }
            tfoot {
                tr {
                    td { "Total" }
                    td { class: "total", "{summary.total}" }
                }
            }
        }
    }
}

/// Shopper-facing errors become a flash and a redirect; the rest surface as [`ApiError`].
fn refused(session: &Session, err: CheckoutError) -> Result<Response, ApiError> {
    let Some((flash, target)) = err.flash() else {
        return Err(err.into());
    };
    debug!(error = %err, target, "Checkout refused");
    session.flash(flash);
    Ok(Redirect::to(target).into_response())
}

pub(crate) async fn checkout_page(
    State(state): State<ApiState>,
    session: Session,
) -> Result<Response, ApiError> {
    let service = &state.try_get_slice::<Checkout>()?.service;

    match service.review(&session).await {
        Ok(summary) => Ok(render_page(
            CheckoutPage,
            CheckoutPageProps { summary, flashes: session.take_flashes() },
        )
        .into_response()),
        Err(err) => refused(&session, err),
    }
}

pub(crate) async fn place_order(
    State(state): State<ApiState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, ApiError> {
    let service = &state.try_get_slice::<Checkout>()?.service;

    match service.place_order(&session, &form).await {
        Ok(order) => {
            let page: Html<String> = render_page(
                SuccessPage,
                SuccessPageProps {
                    name: order.details.name,
                    summary: order.summary,
                    flashes: session.take_flashes(),
                },
            );
            Ok(page.into_response())
        },
        Err(err) => refused(&session, err),
    }
}
