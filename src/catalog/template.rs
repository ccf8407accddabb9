//! Immutable trigger and action templates supplied by the host.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Identifier of a trigger template (and of every instance cloned from it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerId(pub u32);

/// Identifier of an action template (and of every instance cloned from it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u32);

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

/// Opaque renderable attached to a template.
///
/// The core never looks inside an icon. Cloning shares the underlying value,
/// so every instance derived from a template points at the same icon.
#[derive(Clone)]
pub struct Icon(Arc<dyn Any + Send + Sync>);

impl Icon {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Icon(Arc::new(value))
    }

    /// Borrow the icon as its concrete renderer type, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// True when both handles share the same allocation.
    pub fn ptr_eq(&self, other: &Icon) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Icon(..)")
    }
}

/// Catalog-level definition of a trigger or action.
///
/// Templates are never stored inside a state or transition; attachment sites
/// always hold an [`Instance`](super::Instance) produced by the cloner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Template<I> {
    pub id: I,
    pub label: String,
    pub color: String,
    #[serde(skip)]
    pub icon: Option<Icon>,
}

pub type TriggerTemplate = Template<TriggerId>;
pub type ActionTemplate = Template<ActionId>;

impl<I> Template<I> {
    pub fn new(id: I, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            color: color.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }
}
