//! Glue shared by the storefront slices.
//!
//! Without features this crate only loads configuration and mints identifiers. The
//! `server` feature adds what every request handler needs: [`server::ApiState`], cookie
//! sessions with flash messages, the HTML layout and the mapping of errors to responses.
//!
//! ```rust
//! # use shop_kernel::safe_nanoid;
//! let session_id = safe_nanoid!(24);
//! assert_eq!(session_id.len(), 24);
//! ```

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use nanoid::nanoid;
pub use shop_domain as domain;

/// Letters and digits minus the easily confused `0 O 1 I l`.
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Random id over [`SAFE_ALPHABET`]; 12 characters unless a length is given.
#[macro_export]
macro_rules! safe_nanoid {
    () => {
        $crate::safe_nanoid!(12)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}
