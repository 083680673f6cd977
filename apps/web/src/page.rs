use shop_domain::checkout::CheckoutForm;
use shop_domain::constants::{
    ADDRESS_SELECTOR, CHECKOUT_FORM_ID, FLASH_ELEMENT_ID, NAME_SELECTOR, REQUIRED_FIELDS_ALERT,
};
use std::time::Duration;
use tracing::debug;

/// Length of each fade transition.
pub const FADE_DURATION: Duration = Duration::from_millis(400);
/// How long the flash message stays fully visible.
pub const FLASH_HOLD: Duration = Duration::from_millis(1000);

/// Style steps of the flash message, as offsets from page initialization.
pub const FLASH_TIMELINE: [(Duration, FlashStyle); 4] = [
    (Duration::ZERO, FlashStyle::FadingIn),
    (FADE_DURATION, FlashStyle::Visible),
    (FADE_DURATION.saturating_add(FLASH_HOLD), FlashStyle::FadingOut),
    (FADE_DURATION.saturating_add(FLASH_HOLD).saturating_add(FADE_DURATION), FlashStyle::Hidden),
];

/// Visual state of the flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashStyle {
    FadingIn,
    Visible,
    FadingOut,
    Hidden,
}

impl FlashStyle {
    /// CSS `display` value.
    #[must_use]
    pub const fn display(self) -> &'static str {
        match self {
            Self::Hidden => "none",
            Self::FadingIn | Self::Visible | Self::FadingOut => "block",
        }
    }

    /// CSS `opacity` target; the stylesheet animates the change.
    #[must_use]
    pub const fn opacity(self) -> &'static str {
        match self {
            Self::FadingIn | Self::Visible => "1",
            Self::FadingOut | Self::Hidden => "0",
        }
    }
}

/// Outcome of a submit handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Let the browser submit the form natively.
    Proceed,
    /// Cancel the default action.
    Block,
}

/// Everything the page script needs from a document.
///
/// Callbacks receive the host back instead of capturing it, so hosts can be plain values.
pub trait PageHost {
    type Element: Clone + 'static;

    /// Looks an element up by id. A missing element is `None`, never an error.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Current value of the field matching `selector` inside `form`.
    fn field_value(&self, form: &Self::Element, selector: &str) -> Option<String>;

    fn apply_style(&self, element: &Self::Element, style: FlashStyle);

    /// Runs `task` once after `delay` without blocking the caller.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce(&Self)>);

    /// Registers `handler` for submit events of `form`. The host prevents the default action
    /// when the handler returns [`SubmitDecision::Block`].
    fn on_submit(&self, form: &Self::Element, handler: Box<dyn Fn(&Self) -> SubmitDecision>);

    /// Blocking modal message.
    fn alert(&self, message: &str);
}

/// Wires the page behaviors into `host`. Call once after the DOM is ready.
pub fn init_page<H: PageHost + 'static>(host: &H) {
    match host.element_by_id(FLASH_ELEMENT_ID) {
        Some(flash) => dismiss_flash(host, &flash),
        None => debug!("No flash message on this page"),
    }

    if let Some(form) = host.element_by_id(CHECKOUT_FORM_ID) {
        let target = form.clone();
        host.on_submit(&target, Box::new(move |host: &H| check_checkout(host, &form)));
    }
}

/// Fades the flash message in, holds it, then fades it out.
fn dismiss_flash<H: PageHost + 'static>(host: &H, flash: &H::Element) {
    for (at, style) in FLASH_TIMELINE {
        if at.is_zero() {
            host.apply_style(flash, style);
        } else {
            let flash = flash.clone();
            host.schedule(at, Box::new(move |host: &H| host.apply_style(&flash, style)));
        }
    }
}

/// Checks the shipping fields of `form`; alerts and blocks when either trims to empty.
///
/// A field that cannot be located reads as empty.
pub fn check_checkout<H: PageHost>(host: &H, form: &H::Element) -> SubmitDecision {
    let read = |selector| host.field_value(form, selector).unwrap_or_default();

    if CheckoutForm::new(read(NAME_SELECTOR), read(ADDRESS_SELECTOR)).validate().is_ok() {
        SubmitDecision::Proceed
    } else {
        host.alert(REQUIRED_FIELDS_ALERT);
        SubmitDecision::Block
    }
}
