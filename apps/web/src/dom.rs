use crate::page::{FlashStyle, PageHost, SubmitDecision};
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window};

/// [`PageHost`] over the browser document.
///
/// DOM calls that fail (detached nodes, blocked dialogs) are ignored: every behavior of the
/// page script is best effort and must never break the page.
#[derive(Debug, Clone)]
pub struct DomHost {
    window: Window,
    document: Document,
}

impl DomHost {
    /// `None` outside a browsing context (e.g. in a worker).
    #[must_use]
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }
}

impl PageHost for DomHost {
    type Element = HtmlElement;

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn field_value(&self, form: &HtmlElement, selector: &str) -> Option<String> {
        let field = form.query_selector(selector).ok()??;
        if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        field.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
    }

    fn apply_style(&self, element: &HtmlElement, style: FlashStyle) {
        let css = element.style();
        if style == FlashStyle::FadingIn {
            // Start transparent and force a layout so the opacity change animates.
            css.set_property("opacity", "0").ok();
            css.set_property("display", style.display()).ok();
            let _ = element.offset_width();
        }
        css.set_property("display", style.display()).ok();
        css.set_property("opacity", style.opacity()).ok();
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce(&Self)>) {
        let host = self.clone();
        let callback = Closure::once_into_js(move || task(&host));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref::<js_sys::Function>(),
                millis,
            )
            .ok();
    }

    fn on_submit(&self, form: &HtmlElement, handler: Box<dyn Fn(&Self) -> SubmitDecision>) {
        let host = self.clone();
        let listener = Closure::<dyn Fn(Event)>::new(move |event: Event| {
            if handler(&host) == SubmitDecision::Block {
                event.prevent_default();
            }
        });
        form.add_event_listener_with_callback("submit", listener.as_ref().unchecked_ref()).ok();
        // The listener lives as long as the page.
        listener.forget();
    }

    fn alert(&self, message: &str) {
        self.window.alert_with_message(message).ok();
    }
}
