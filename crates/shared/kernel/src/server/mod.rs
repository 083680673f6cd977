//! Request-side plumbing shared by every slice: state, cookie sessions, page layout,
//! HTTP error mapping and the system routes.

mod error;
mod health;
mod page;
pub mod router;
mod session;
mod state;

pub use error::{ApiError, ApiErrorExt};
pub use page::{Layout, LayoutProps, MessagePage, MessagePageProps, STYLESHEET, redirect_back, render_page};
pub use session::{Session, SessionData, SessionStore, session_middleware};
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
