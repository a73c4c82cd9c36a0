use thiserror::Error;

use super::actions::DashboardAction;
use super::state::Category;
use super::state::DashboardState;
use super::state::Widget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEffect {
    /// The durable blob is stale and must be rewritten.
    Persist,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectedAction {
    #[error("category `{id}` already exists")]
    DuplicateCategory { id: String },
    #[error("snapshot rejected: {reason}")]
    InvalidSnapshot { reason: String },
}

/// Applies `action` to `state`.
///
/// Unknown ids are no-ops and return no effects. A rejected action leaves
/// `state` untouched.
pub fn reduce(
    state: &mut DashboardState,
    action: DashboardAction,
) -> Result<Vec<DashboardEffect>, RejectedAction> {
    match action {
        DashboardAction::AddCategory { id, name } => {
            if state.find_category(&id).is_some() {
                return Err(RejectedAction::DuplicateCategory { id });
            }
            state.categories.push(Category::new(id, name));
            Ok(persist())
        }
        DashboardAction::RemoveCategory { id } => {
            let before = state.categories.len();
            state.categories.retain(|category| category.id != id);
            if state.categories.len() == before {
                return Ok(Vec::new());
            }
            let owned: Vec<String> = state
                .available_widgets
                .iter()
                .filter(|widget| widget.category_id == id)
                .map(|widget| widget.id.clone())
                .collect();
            state
                .available_widgets
                .retain(|widget| widget.category_id != id);
            for widget_id in &owned {
                strip_from_displays(state, widget_id);
            }
            Ok(persist())
        }
        DashboardAction::AddWidget { widget } => {
            if insert_widget(state, widget) {
                Ok(persist())
            } else {
                Ok(Vec::new())
            }
        }
        DashboardAction::AddAndShowWidget {
            category_id,
            mut widget,
        } => {
            let widget_id = widget.id.clone();
            widget.category_id = category_id.clone();
            let mut changed = insert_widget(state, widget);
            if let Some(category) = state.find_category_mut(&category_id) {
                changed |= category.show(&widget_id);
            }
            Ok(if changed { persist() } else { Vec::new() })
        }
        DashboardAction::RemoveWidget { widget_id } => {
            let before = state.available_widgets.len();
            state
                .available_widgets
                .retain(|widget| widget.id != widget_id);
            let mut changed = state.available_widgets.len() != before;
            changed |= strip_from_displays(state, &widget_id);
            Ok(if changed { persist() } else { Vec::new() })
        }
        DashboardAction::ToggleWidgetVisibility {
            category_id,
            widget_id,
            visible,
        } => {
            // Showing an id the catalog lacks would leave a dangling entry.
            if visible && !state.contains_widget(&widget_id) {
                return Ok(Vec::new());
            }
            let Some(category) = state.find_category_mut(&category_id) else {
                return Ok(Vec::new());
            };
            let changed = if visible {
                category.show(&widget_id)
            } else {
                category.hide(&widget_id)
            };
            Ok(if changed { persist() } else { Vec::new() })
        }
        DashboardAction::ToggleWidgetInCategory {
            category_id,
            widget,
            checked,
        } => {
            if state.find_category(&category_id).is_none() {
                return Ok(Vec::new());
            }
            let widget_id = widget.id.clone();
            let mut changed = insert_widget(state, widget);
            if let Some(category) = state.find_category_mut(&category_id) {
                changed |= if checked {
                    category.show(&widget_id)
                } else {
                    category.hide(&widget_id)
                };
            }
            Ok(if changed { persist() } else { Vec::new() })
        }
        DashboardAction::SetAll(next) => {
            next.validate()
                .map_err(|violation| RejectedAction::InvalidSnapshot {
                    reason: violation.label(),
                })?;
            *state = next;
            Ok(persist())
        }
        DashboardAction::Hydrate(next) => {
            if let Some(next) = next {
                *state = next;
            }
            Ok(Vec::new())
        }
    }
}

fn persist() -> Vec<DashboardEffect> {
    vec![DashboardEffect::Persist]
}

fn insert_widget(state: &mut DashboardState, widget: Widget) -> bool {
    if state.contains_widget(&widget.id) {
        return false;
    }
    state.available_widgets.push(widget);
    true
}

fn strip_from_displays(state: &mut DashboardState, widget_id: &str) -> bool {
    let mut changed = false;
    for category in &mut state.categories {
        changed |= category.hide(widget_id);
    }
    changed
}

#[cfg(test)]
mod tests;
