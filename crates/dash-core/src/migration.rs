//! Normalizes stored dashboard blobs into the current shape.
//!
//! Two shapes are accepted. The current one carries a top-level
//! `availableWidgets` catalog with categories referencing it by id. The
//! legacy one nests full widget records inside each category.

use log::info;
use log::warn;
use serde::Deserialize;
use serde_json::Value;

use super::state::Category;
use super::state::DashboardState;
use super::state::Widget;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StoredDashboard {
    Current(DashboardState),
    Legacy(LegacyDashboard),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyDashboard {
    pub categories: Vec<LegacyCategory>,
    // Present only when a current-shape blob failed to decode.
    #[serde(default, rename = "availableWidgets")]
    catalog: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub widgets: Option<Vec<LegacyWidget>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyWidget {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub text: String,
}

impl StoredDashboard {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    pub fn into_current(self) -> DashboardState {
        match self {
            Self::Current(state) => state,
            Self::Legacy(legacy) => legacy.migrate(),
        }
    }
}

impl LegacyDashboard {
    pub fn migrate(self) -> DashboardState {
        let mut state = DashboardState::default();
        for legacy in self.categories {
            // Categories without an embedded list carry nothing to migrate.
            let Some(widgets) = legacy.widgets else {
                continue;
            };
            state.categories.push(Category {
                id: legacy.id.clone(),
                name: legacy.name,
                displayed_widgets: widgets.iter().map(|widget| widget.id.clone()).collect(),
            });
            for widget in widgets {
                if state.contains_widget(&widget.id) {
                    continue;
                }
                state.available_widgets.push(Widget {
                    id: widget.id,
                    name: widget.name,
                    text: widget.text,
                    category_id: legacy.id.clone(),
                });
            }
        }
        state
    }
}

/// Parses a raw stored blob and returns it in the current shape.
///
/// Malformed input is treated as "no prior state".
pub fn migrate_blob(raw: &str) -> Option<DashboardState> {
    match serde_json::from_str::<StoredDashboard>(raw) {
        Ok(stored) => finish(stored),
        Err(err) => {
            warn!("event=migrate module=migration status=discarded reason=\"{err}\"");
            None
        }
    }
}

pub fn migrate_value(value: Value) -> Option<DashboardState> {
    match serde_json::from_value::<StoredDashboard>(value) {
        Ok(stored) => finish(stored),
        Err(err) => {
            warn!("event=migrate module=migration status=discarded reason=\"{err}\"");
            None
        }
    }
}

fn finish(stored: StoredDashboard) -> Option<DashboardState> {
    if let StoredDashboard::Legacy(legacy) = &stored {
        if legacy.catalog.is_some() {
            warn!("event=migrate module=migration status=discarded reason=\"malformed current shape\"");
            return None;
        }
        info!("event=migrate module=migration status=ok shape=legacy");
    }
    Some(stored.into_current())
}
