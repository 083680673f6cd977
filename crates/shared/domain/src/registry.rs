//! Type-keyed storage for the state each storefront feature builds at startup.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// State owned by one feature slice and shared by all its handlers.
///
/// Implemented by `#[shop_slice]`; handlers look it up by concrete type.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// A slice ready to be handed to the server state, keyed by its concrete type.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    /// Short name used in startup logs.
    pub name: &'static str,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(name: &'static str, state: T) -> Self {
        let id = TypeId::of::<T>();
        Self { id, name, state: Box::new(state) }
    }

    #[must_use]
    pub fn downcast_ref<T: FeatureSlice>(&self) -> Option<&T> {
        if self.id != TypeId::of::<T>() {
            return None;
        }
        self.state.as_any().downcast_ref()
    }
}
