use crate::Catalog;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use dioxus::prelude::*;
use shop_domain::catalog::Product;
use shop_domain::flash::FlashMessage;
use shop_kernel::server::{
    ApiError, ApiState, Layout, MessagePage, MessagePageProps, Session, render_page,
};

#[component]
pub fn ProductGrid(products: Vec<Product>, flashes: Vec<FlashMessage>) -> Element {
    rsx! {
        Layout { title: "Products", flashes,
            h1 { "Products" }
            div { class: "grid",
                for product in products.iter() {
                    ProductCard { key: "{product.id}", product: product.clone() }
                }
            }
        }
    }
}

#[component]
fn ProductCard(product: Product) -> Element {
    rsx! {
        article { class: "card",
            if let Some(image) = &product.image {
                img { src: "/static/{image}", alt: "{product.name}" }
            }
            h2 {
                a { href: "/product/{product.id}", "{product.name}" }
            }
            p { class: "price", "{product.price}" }
            AddToCartForm { product_id: product.id, stock: product.stock }
        }
    }
}

#[component]
pub fn ProductDetail(product: Product, flashes: Vec<FlashMessage>) -> Element {
    rsx! {
        Layout { title: product.name.clone(), flashes,
            article { class: "product-detail",
                if let Some(image) = &product.image {
                    img { src: "/static/{image}", alt: "{product.name}" }
                }
                div {
                    h1 { "{product.name}" }
                    p { class: "price", "{product.price}" }
                    if let Some(description) = &product.description {
                        p { class: "description", "{description}" }
                    }
                    p { class: "stock", "In stock: {product.stock}" }
                    AddToCartForm { product_id: product.id, stock: product.stock }
                }
            }
        }
    }
}

/// Posts to the cart slice's `/add_to_cart`.
#[component]
fn AddToCartForm(product_id: u32, stock: u32) -> Element {
    rsx! {
        form { method: "post", action: "/add_to_cart", class: "add-to-cart",
            input { r#type: "hidden", name: "product_id", value: "{product_id}" }
            input { r#type: "number", name: "quantity", value: "1", min: "1", max: "{stock}" }
            button { r#type: "submit", disabled: stock == 0, "Add to cart" }
        }
    }
}

pub(crate) async fn index(
    State(state): State<ApiState>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let products = state.try_get_slice::<Catalog>()?.repository.clone();
    let products = products.list().await?;
    Ok(render_page(ProductGrid, ProductGridProps { products, flashes: session.take_flashes() }))
}

pub(crate) async fn detail(
    State(state): State<ApiState>,
    session: Session,
    Path(id): Path<u32>,
) -> Result<Response, ApiError> {
    let products = state.try_get_slice::<Catalog>()?.repository.clone();
    let flashes = session.take_flashes();

    let Some(product) = products.get(id).await? else {
        let page = render_page(
            MessagePage,
            MessagePageProps {
                title: "Product not found".to_owned(),
                message: format!("There is no product with id {id}."),
                flashes,
            },
        );
        return Ok((StatusCode::NOT_FOUND, page).into_response());
    };

    Ok(render_page(ProductDetail, ProductDetailProps { product, flashes }).into_response())
}
