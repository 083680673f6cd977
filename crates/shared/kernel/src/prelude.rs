//! One-stop imports for feature slices.

pub use crate::domain::constants::*;
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};
pub use crate::safe_nanoid;

#[cfg(feature = "server")]
pub use crate::server::{
    ApiError, ApiErrorExt, ApiState, Layout, MessagePage, MessagePageProps, Session, SessionStore,
    redirect_back, render_page, session_middleware,
};
