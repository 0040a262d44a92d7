use std::{fmt, sync::Arc};

use serde::Deserialize;

/// Cost weight of a field for query-cost accounting.
///
/// Opaque to the field itself, which only carries it for the engine.
#[derive(Clone)]
pub enum Complexity {
    /// Fixed weight added to the cost of the field's children.
    Fixed(u64),
    /// Cost computed from the cost of the field's children.
    Function(Arc<dyn Fn(u64) -> u64 + Send + Sync>),
}

impl Complexity {
    /// Weight every field has unless told otherwise.
    pub const DEFAULT_WEIGHT: u64 = 1;

    /// Builds a [`Complexity::Function`].
    pub fn function(f: impl Fn(u64) -> u64 + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(f))
    }

    /// Cost of the field, given the total cost of its selected children.
    pub fn cost(&self, children: u64) -> u64 {
        match self {
            Self::Fixed(weight) => weight.saturating_add(children),
            Self::Function(f) => f(children),
        }
    }

    /// Whether this is the default fixed weight.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Fixed(Self::DEFAULT_WEIGHT))
    }
}

impl Default for Complexity {
    fn default() -> Self {
        Self::Fixed(Self::DEFAULT_WEIGHT)
    }
}

impl fmt::Debug for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(weight) => f.debug_tuple("Fixed").field(weight).finish(),
            Self::Function(_) => f.debug_tuple("Function").finish_non_exhaustive(),
        }
    }
}

/// How the engine shapes the value a derived field's projection produces.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionType {
    /// Use the projected value as is.
    #[default]
    Unmodified,
    /// Materialize the projected sequence into a list.
    ToList,
    /// Take the first element, or `null` if there is none.
    FirstOrDefault,
    /// Take the first element, failing if there is none.
    First,
}
