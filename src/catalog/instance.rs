//! Per-site instances cloned from catalog templates.

use super::template::{ActionId, Icon, Template, TriggerId};
use serde::{Deserialize, Serialize};

/// A template copy owned by exactly one state or transition.
///
/// `active` records whether the editing user armed this trigger/action for
/// its owning site. Two instances cloned from the same template carry
/// independent flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Instance<I> {
    pub id: I,
    pub label: String,
    pub color: String,
    #[serde(skip)]
    pub icon: Option<Icon>,
    pub active: bool,
}

pub type TriggerInstance = Instance<TriggerId>;
pub type ActionInstance = Instance<ActionId>;

impl<I: Copy> Instance<I> {
    /// Clone a template into a fresh, unarmed instance.
    ///
    /// Label and color are owned copies; the icon is shared with the template.
    pub fn from_template(template: &Template<I>) -> Self {
        Self {
            id: template.id,
            label: template.label.clone(),
            color: template.color.clone(),
            icon: template.icon.clone(),
            active: false,
        }
    }

    pub fn armed(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// Clone every template once for a single attachment site.
///
/// Instances whose id appears in `armed` start active. Must be called once per
/// state (actions) or transition (triggers); the returned set is never shared.
pub fn clone_templates<I>(templates: &[Template<I>], armed: &[I]) -> Vec<Instance<I>>
where
    I: Copy + PartialEq,
{
    templates
        .iter()
        .map(|template| Instance::from_template(template).armed(armed.contains(&template.id)))
        .collect()
}
