use shop_logger::{LevelFilter, Logger};

#[test]
fn console_logger_has_no_file_writer() {
    let logger = Logger::builder()
        .name("shop-console")
        .level(LevelFilter::DEBUG)
        .init()
        .expect("logger should initialize");

    tracing::debug!(route = "/cart", "console only");
    assert!(!logger.writes_files());
}
