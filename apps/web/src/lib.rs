//! Page script shipped with every storefront page.
//!
//! The server renders the DOM contract (see `shop_domain::constants`); this crate compiles to
//! a wasm module that the page layout imports as `/static/pkg/shop_web.js`. All behavior lives
//! in [`init_page`] over the [`PageHost`] seam, so it runs unchanged against the browser
//! ([`DomHost`]) and against an in-memory host in tests.

mod page;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use page::{
    FADE_DURATION, FLASH_HOLD, FLASH_TIMELINE, FlashStyle, PageHost, SubmitDecision,
    check_checkout, init_page,
};

#[cfg(target_arch = "wasm32")]
pub use dom::DomHost;

#[cfg(target_arch = "wasm32")]
#[allow(unsafe_code)]
mod entry {
    use super::{DomHost, init_page};
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::wasm_bindgen;

    /// Run once by the generated JS glue after the module loads.
    ///
    /// Module scripts execute after the document is parsed, so the DOM is ready here.
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        let host = DomHost::new().ok_or_else(|| JsValue::from_str("no document"))?;
        init_page(&host);
        Ok(())
    }
}
