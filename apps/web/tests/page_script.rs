use proptest::prelude::*;
use shop_domain::checkout::trim_form_value;
use shop_web::{FlashStyle, PageHost, SubmitDecision, init_page};
use std::cell::{Cell, RefCell};
use std::time::Duration;

type Task = Box<dyn FnOnce(&FakePage)>;
type Handler = Box<dyn Fn(&FakePage) -> SubmitDecision>;

/// In-memory document with a manual clock.
#[derive(Default)]
struct FakePage {
    ids: Vec<&'static str>,
    fields: Vec<(&'static str, String)>,
    now: Cell<Duration>,
    timers: RefCell<Vec<(Duration, Task)>>,
    styles: RefCell<Vec<(Duration, &'static str, FlashStyle)>>,
    handlers: RefCell<Vec<(&'static str, Handler)>>,
    alerts: RefCell<Vec<String>>,
}

impl FakePage {
    fn with_flash() -> Self {
        Self { ids: vec!["flash-msg"], ..Self::default() }
    }

    fn checkout(name: Option<&str>, address: Option<&str>) -> Self {
        let mut fields = Vec::new();
        if let Some(name) = name {
            fields.push((r#"input[name="name"]"#, name.to_owned()));
        }
        if let Some(address) = address {
            fields.push((r#"textarea[name="address"]"#, address.to_owned()));
        }
        Self { ids: vec!["checkout-form"], fields, ..Self::default() }
    }

    /// Moves the clock to `until`, firing due timers in order.
    fn advance(&self, until: Duration) {
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _))| *at <= until)
                    .min_by_key(|(_, (at, _))| *at)
                    .map(|(index, _)| index);
                due.map(|index| timers.remove(index))
            };
            let Some((at, task)) = next else { break };
            self.now.set(at);
            task(self);
        }
        self.now.set(until);
    }

    fn submit(&self, form: &str) -> Option<SubmitDecision> {
        let handlers = self.handlers.borrow();
        handlers.iter().find(|(id, _)| *id == form).map(|(_, handler)| handler(self))
    }

    fn current_style(&self) -> Option<FlashStyle> {
        self.styles.borrow().last().map(|(_, _, style)| *style)
    }
}

impl PageHost for FakePage {
    type Element = &'static str;

    fn element_by_id(&self, id: &str) -> Option<&'static str> {
        self.ids.iter().copied().find(|known| *known == id)
    }

    fn field_value(&self, _form: &&'static str, selector: &str) -> Option<String> {
        self.fields.iter().find(|(s, _)| *s == selector).map(|(_, value)| value.clone())
    }

    fn apply_style(&self, element: &&'static str, style: FlashStyle) {
        self.styles.borrow_mut().push((self.now.get(), *element, style));
    }

    fn schedule(&self, delay: Duration, task: Task) {
        self.timers.borrow_mut().push((self.now.get() + delay, task));
    }

    fn on_submit(&self, form: &&'static str, handler: Handler) {
        self.handlers.borrow_mut().push((*form, handler));
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }
}

const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn flash_fades_in_holds_and_hides() {
    let page = FakePage::with_flash();
    init_page(&page);
    assert_eq!(page.current_style(), Some(FlashStyle::FadingIn));

    page.advance(ms(1000));
    assert_eq!(page.current_style(), Some(FlashStyle::Visible));

    page.advance(ms(1799));
    assert_eq!(page.current_style(), Some(FlashStyle::FadingOut));

    page.advance(ms(1800));
    assert_eq!(page.current_style(), Some(FlashStyle::Hidden));

    let steps: Vec<_> =
        page.styles.borrow().iter().map(|(at, id, style)| (at.as_millis(), *id, *style)).collect();
    assert_eq!(
        steps,
        [
            (0, "flash-msg", FlashStyle::FadingIn),
            (400, "flash-msg", FlashStyle::Visible),
            (1400, "flash-msg", FlashStyle::FadingOut),
            (1800, "flash-msg", FlashStyle::Hidden),
        ]
    );
    assert!(page.timers.borrow().is_empty());
}

#[test]
fn page_without_flash_or_form_is_untouched() {
    let page = FakePage::default();
    init_page(&page);
    page.advance(ms(5000));

    assert!(page.styles.borrow().is_empty());
    assert!(page.handlers.borrow().is_empty());
    assert!(page.alerts.borrow().is_empty());
}

#[test]
fn complete_checkout_submits_natively() {
    let page = FakePage::checkout(Some("Alice"), Some("123 Main St"));
    init_page(&page);

    assert_eq!(page.submit("checkout-form"), Some(SubmitDecision::Proceed));
    assert!(page.alerts.borrow().is_empty());
}

#[test]
fn empty_name_blocks_with_alert() {
    let page = FakePage::checkout(Some(""), Some("123 Main St"));
    init_page(&page);

    assert_eq!(page.submit("checkout-form"), Some(SubmitDecision::Block));
    assert_eq!(*page.alerts.borrow(), ["Please fill all required fields"]);
}

#[test]
fn whitespace_address_blocks_with_alert() {
    let page = FakePage::checkout(Some("Alice"), Some("   "));
    init_page(&page);

    assert_eq!(page.submit("checkout-form"), Some(SubmitDecision::Block));
    assert_eq!(page.alerts.borrow().len(), 1);
}

#[test]
fn missing_field_reads_as_empty() {
    let page = FakePage::checkout(Some("Alice"), None);
    init_page(&page);

    assert_eq!(page.submit("checkout-form"), Some(SubmitDecision::Block));
}

#[test]
fn every_blocked_submit_alerts_again() {
    let page = FakePage::checkout(Some(" "), Some(""));
    init_page(&page);

    page.submit("checkout-form");
    page.submit("checkout-form");
    assert_eq!(page.alerts.borrow().len(), 2);
}

#[test]
fn byte_order_mark_alone_blocks() {
    let page = FakePage::checkout(Some("\u{FEFF}"), Some("123 Main St"));
    init_page(&page);

    assert_eq!(page.submit("checkout-form"), Some(SubmitDecision::Block));
    assert_eq!(page.alerts.borrow().len(), 1);
}

#[test]
fn next_line_character_counts_as_content() {
    let page = FakePage::checkout(Some("\u{0085}"), Some("\u{A0}123 Main St\u{3000}"));
    init_page(&page);

    assert_eq!(page.submit("checkout-form"), Some(SubmitDecision::Proceed));
    assert!(page.alerts.borrow().is_empty());
}

proptest! {
    #[test]
    fn submit_proceeds_iff_both_fields_have_content(
        name in "[ \t\n\u{B}\u{A0}\u{85}\u{2028}\u{FEFF}a-z]{0,8}",
        address in "[ \t\r\u{C}\u{3000}\u{85}\u{FEFF}0-9a-z]{0,12}",
    ) {
        let page = FakePage::checkout(Some(&name), Some(&address));
        init_page(&page);

        let proceeds = !trim_form_value(&name).is_empty() && !trim_form_value(&address).is_empty();
        let expected = if proceeds { SubmitDecision::Proceed } else { SubmitDecision::Block };
        prop_assert_eq!(page.submit("checkout-form"), Some(expected));
        prop_assert_eq!(page.alerts.borrow().is_empty(), proceeds);
    }
}
