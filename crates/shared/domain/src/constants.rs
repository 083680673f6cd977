//! String constants shared by the server-rendered pages and the browser page script.
//!
//! The DOM contract lives here so both sides break together if an id is renamed.

/// Id of the optional flash-message element.
pub const FLASH_ELEMENT_ID: &str = "flash-msg";
/// Id of the checkout form.
pub const CHECKOUT_FORM_ID: &str = "checkout-form";
/// `name` attribute of the shipping name input.
pub const NAME_FIELD: &str = "name";
/// `name` attribute of the shipping address textarea.
pub const ADDRESS_FIELD: &str = "address";
/// Selector the page script uses to read the name input.
pub const NAME_SELECTOR: &str = r#"input[name="name"]"#;
/// Selector the page script uses to read the address textarea.
pub const ADDRESS_SELECTOR: &str = r#"textarea[name="address"]"#;

/// Text of the blocking alert shown by the page script.
pub const REQUIRED_FIELDS_ALERT: &str = "Please fill all required fields";

// Flash texts queued by the server.
pub const FLASH_ADDED_TO_CART: &str = "Added to cart";
pub const FLASH_NOT_ENOUGH_STOCK: &str = "Not enough stock available.";
pub const FLASH_PRODUCT_NOT_FOUND: &str = "Product not found.";
pub const FLASH_INVALID_QUANTITY: &str = "Quantity must be at least 1.";
pub const FLASH_CART_UPDATED: &str = "Cart updated";
pub const FLASH_CART_EMPTY: &str = "Your cart is empty.";
pub const FLASH_REQUIRED_FIELDS: &str = "Please fill required fields";

/// Cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "shop_session";
/// Form field prefix used by the cart update form (`qty_<product id>`).
pub const CART_QTY_PREFIX: &str = "qty_";

// OpenAPI tags.
pub const SYSTEM_TAG: &str = "System";
pub const CATALOG_TAG: &str = "Catalog";
pub const CART_TAG: &str = "Cart";
