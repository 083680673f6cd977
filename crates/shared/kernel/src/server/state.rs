use super::session::SessionStore;
use axum::extract::FromRef;
use fxhash::FxHashMap;
use shop_database::Database;
use shop_domain::config::ApiConfig;
use shop_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[shop_derive::shop_error]
pub enum ApiStateError {
    #[error("API state is incomplete{}: {message}", format_context(.context))]
    Incomplete { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Feature slice not registered{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Everything a request handler can reach through [`ApiState`].
#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub database: Database,
    pub sessions: SessionStore,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

/// Shared Axum state. Cloning is a reference count bump.
#[derive(Debug, Clone)]
pub struct ApiState(Arc<ApiStateInner>);

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.0.slices.get(&TypeId::of::<T>())?.downcast_ref::<T>()
    }

    /// Like [`get_slice`](Self::get_slice), for handlers that propagate with `?`.
    ///
    /// # Errors
    /// [`ApiStateError::MissingSlice`] naming `T` when it was never registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: type_name::<T>().into(),
            context: None,
        })
    }

    /// Registry names of the registered slices, for startup logs.
    pub fn slice_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.slices.values().map(|slice| slice.name)
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &ApiStateInner {
        &self.0
    }
}

macro_rules! from_state {
    ($($ty:ty => $field:ident),+ $(,)?) => {$(
        impl FromRef<ApiState> for $ty {
            fn from_ref(state: &ApiState) -> Self {
                state.$field.clone()
            }
        }
    )+};
}

from_state! {
    ApiConfig => config,
    Database => database,
    SessionStore => sessions,
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    database: Option<Database>,
    sessions: Option<SessionStore>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(self, config: ApiConfig) -> Self {
        Self { config: Some(config), ..self }
    }

    #[must_use]
    pub fn db(self, database: Database) -> Self {
        Self { database: Some(database), ..self }
    }

    /// Overrides the session store otherwise built from `config.session`.
    #[must_use]
    pub fn sessions(self, sessions: SessionStore) -> Self {
        Self { sessions: Some(sessions), ..self }
    }

    /// Adds a slice. A later slice of the same type replaces the earlier one.
    #[must_use]
    pub fn register_slice(self, slice: InitializedSlice) -> Self {
        self.register_slices([slice])
    }

    #[must_use]
    pub fn register_slices(mut self, slices: impl IntoIterator<Item = InitializedSlice>) -> Self {
        self.slices.extend(slices.into_iter().map(|slice| (slice.id, slice)));
        self
    }

    /// # Errors
    /// [`ApiStateError::Incomplete`] when the config or the database was not provided.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = required(self.config, "config")?;
        let database = required(self.database, "database")?;
        let sessions = self.sessions.unwrap_or_else(|| SessionStore::from_config(&config.session));

        Ok(ApiState(Arc::new(ApiStateInner { config, database, sessions, slices: self.slices })))
    }
}

fn required<T>(value: Option<T>, what: &'static str) -> Result<T, ApiStateError> {
    value.ok_or(ApiStateError::Incomplete { message: what.into(), context: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_config_and_database() {
        let err = ApiState::builder().build().expect_err("nothing provided");
        assert_eq!(err.to_string(), "API state is incomplete: config");

        let err = ApiState::builder().config(ApiConfig::default()).build().expect_err("no db");
        assert!(matches!(err, ApiStateError::Incomplete { ref message, .. } if message == "database"));
    }
}
