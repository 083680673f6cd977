use shop_derive::shop_error;
use std::borrow::Cow;

#[shop_error]
pub enum StockError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse_quantity(raw: &str) -> Result<u32, StockError> {
    raw.parse::<u32>().context("Parsing quantity")
}

fn main() {
    let err = parse_quantity("many").unwrap_err();
    assert!(err.to_string().starts_with("Parse error (Parsing quantity)"));

    let internal: StockError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");

    let with_context: Result<(), StockError> = Err(StockError::from("late"));
    let err = with_context.context("Checking stock").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (Checking stock): late");
}
