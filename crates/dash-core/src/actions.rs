use super::state::DashboardState;
use super::state::Widget;

/// The closed set of mutations the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    AddCategory {
        id: String,
        name: String,
    },
    RemoveCategory {
        id: String,
    },
    AddWidget {
        widget: Widget,
    },
    AddAndShowWidget {
        category_id: String,
        widget: Widget,
    },
    RemoveWidget {
        widget_id: String,
    },
    ToggleWidgetVisibility {
        category_id: String,
        widget_id: String,
        visible: bool,
    },
    // Older entry point kept for callers that hold a full widget record.
    ToggleWidgetInCategory {
        category_id: String,
        widget: Widget,
        checked: bool,
    },
    SetAll(DashboardState),
    Hydrate(Option<DashboardState>),
}

impl DashboardAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddCategory { .. } => "add_category",
            Self::RemoveCategory { .. } => "remove_category",
            Self::AddWidget { .. } => "add_widget",
            Self::AddAndShowWidget { .. } => "add_and_show_widget",
            Self::RemoveWidget { .. } => "remove_widget",
            Self::ToggleWidgetVisibility { .. } => "toggle_widget_visibility",
            Self::ToggleWidgetInCategory { .. } => "toggle_widget_in_category",
            Self::SetAll(_) => "set_all",
            Self::Hydrate(_) => "hydrate",
        }
    }
}
