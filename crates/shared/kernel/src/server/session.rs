use super::error::ApiError;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use moka::sync::Cache;
use parking_lot::Mutex;
use shop_domain::cart::Cart;
use shop_domain::config::SessionConfig;
use shop_domain::flash::FlashMessage;
use std::sync::Arc;
use tracing::{debug, warn};

const SESSION_ID_LENGTH: usize = 24;

/// Per-visitor state kept between requests.
#[derive(Debug, Default)]
pub struct SessionData {
    pub cart: Cart,
    flashes: Vec<FlashMessage>,
}

impl SessionData {
    pub fn flash(&mut self, message: FlashMessage) {
        self.flashes.push(message);
    }

    /// Drains queued flashes in the order they were added.
    pub fn take_flashes(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.flashes)
    }
}

/// Handle to one session. Cloning shares the same data.
///
/// Locks are short and never held across an `.await`.
#[derive(Debug, Clone)]
pub struct Session {
    id: Arc<str>,
    data: Arc<Mutex<SessionData>>,
}

impl Session {
    fn new(id: String) -> Self {
        Self { id: id.into(), data: Arc::default() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Runs `f` with exclusive access to the session data.
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionData) -> R) -> R {
        f(&mut self.data.lock())
    }

    #[must_use]
    pub fn cart(&self) -> Cart {
        self.data.lock().cart.clone()
    }

    pub fn flash(&self, message: FlashMessage) {
        self.data.lock().flash(message);
    }

    pub fn take_flashes(&self) -> Vec<FlashMessage> {
        self.data.lock().take_flashes()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| ApiError::Internal {
            message: "session middleware is not installed".into(),
            context: None,
        })
    }
}

/// Bounded in-memory session table with an idle timeout.
#[derive(Debug, Clone)]
pub struct SessionStore {
    cache: Cache<String, Session>,
    cookie_name: Arc<str>,
    secure: bool,
}

impl SessionStore {
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_idle(config.idle_ttl())
            .build();
        Self { cache, cookie_name: config.cookie_name.as_str().into(), secure: config.secure_cookie }
    }

    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        self.cache.get(id)
    }

    /// Returns the session for `id`, or a fresh one when the id is absent or expired.
    /// The flag is `true` when the session was created by this call.
    #[must_use]
    pub fn open(&self, id: Option<&str>) -> (Session, bool) {
        if let Some(session) = id.and_then(|id| self.cache.get(id)) {
            return (session, false);
        }

        let session = Session::new(crate::safe_nanoid!(SESSION_ID_LENGTH));
        self.cache.insert(session.id().to_owned(), session.clone());
        debug!(session = session.id(), "Session created");
        (session, true)
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `Set-Cookie` value announcing `id` to the browser.
    ///
    /// # Errors
    /// Fails when the configured cookie name is not a valid header value.
    pub fn cookie_header(&self, id: &str) -> Result<HeaderValue, ApiError> {
        let secure = if self.secure { "; Secure" } else { "" };
        HeaderValue::try_from(format!(
            "{}={id}; Path=/; HttpOnly; SameSite=Lax{secure}",
            self.cookie_name
        ))
        .map_err(|e| ApiError::Internal {
            message: e.to_string().into(),
            context: Some("Building session cookie".into()),
        })
    }
}

/// Reads `name` from the request's `Cookie` headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}

/// Attaches the visitor's [`Session`] to the request and issues the cookie for new sessions.
pub async fn session_middleware(
    State(store): State<SessionStore>,
    mut request: Request,
    next: Next,
) -> Response {
    let requested = cookie_value(request.headers(), store.cookie_name());
    let (session, created) = store.open(requested.as_deref());
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    if created {
        match store.cookie_header(session.id()) {
            Ok(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            },
            Err(e) => warn!(error = %e, "Session cookie not issued"),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::from_config(&SessionConfig::default())
    }

    #[test]
    fn huge_idle_ttl_still_builds_a_store() {
        let store = SessionStore::from_config(&SessionConfig {
            idle_ttl_seconds: u64::MAX,
            ..SessionConfig::default()
        });
        let (session, created) = store.open(None);
        assert!(created);
        assert!(store.get(session.id()).is_some());
    }

    #[test]
    fn cookie_value_finds_named_pair() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; shop_session=abc123"));
        assert_eq!(cookie_value(&headers, "shop_session").as_deref(), Some("abc123"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn unknown_id_opens_a_new_session() {
        let store = store();
        let (session, created) = store.open(Some("never-issued"));
        assert!(created);
        assert_ne!(session.id(), "never-issued");
        assert_eq!(session.id().len(), SESSION_ID_LENGTH);
    }

    #[test]
    fn known_id_reuses_session_data() {
        let store = store();
        let (first, _) = store.open(None);
        first.with(|data| data.cart.add(2, 3));

        let (again, created) = store.open(Some(first.id()));
        assert!(!created);
        assert_eq!(again.cart().quantity(2), 3);
    }

    #[test]
    fn flashes_drain_once_in_order() {
        let (session, _) = store().open(None);
        session.flash(FlashMessage::info("one"));
        session.flash(FlashMessage::error("two"));

        let texts: Vec<_> = session.take_flashes().into_iter().map(|f| f.text).collect();
        assert_eq!(texts, ["one", "two"]);
        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn cookie_header_has_session_attributes() {
        let header = store().cookie_header("abc").expect("valid cookie");
        assert_eq!(header.to_str().ok(), Some("shop_session=abc; Path=/; HttpOnly; SameSite=Lax"));

        let secure = SessionStore::from_config(&SessionConfig {
            secure_cookie: true,
            ..SessionConfig::default()
        });
        let header = secure.cookie_header("abc").expect("valid cookie");
        assert!(header.to_str().is_ok_and(|v| v.ends_with("; Secure")));
    }
}
