use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    pub name: String,
    pub text: String,
    /// Owning category. Ownership is independent of where the widget is displayed.
    pub category_id: String,
}

impl Widget {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
            category_id: category_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Visibility list: ids shown in this category's grid, in display order.
    pub displayed_widgets: Vec<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            displayed_widgets: Vec::new(),
        }
    }

    pub fn displays(&self, widget_id: &str) -> bool {
        self.displayed_widgets.iter().any(|id| id == widget_id)
    }

    /// Appends `widget_id` unless already displayed. Returns whether it was added.
    pub(crate) fn show(&mut self, widget_id: &str) -> bool {
        if self.displays(widget_id) {
            return false;
        }
        self.displayed_widgets.push(widget_id.to_string());
        true
    }

    /// Removes `widget_id` preserving the order of the rest. Returns whether it was present.
    pub(crate) fn hide(&mut self, widget_id: &str) -> bool {
        let before = self.displayed_widgets.len();
        self.displayed_widgets.retain(|id| id != widget_id);
        self.displayed_widgets.len() != before
    }
}

/// The single source of truth for the dashboard.
///
/// `available_widgets` is the catalog: a set keyed by widget id, kept in
/// insertion order so serialized snapshots round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub categories: Vec<Category>,
    pub available_widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateViolation {
    DuplicateCategoryId(String),
    DuplicateWidgetId(String),
    DanglingReference {
        category_id: String,
        widget_id: String,
    },
}

impl StateViolation {
    pub fn label(&self) -> String {
        match self {
            Self::DuplicateCategoryId(id) => format!("duplicate category id `{id}`"),
            Self::DuplicateWidgetId(id) => format!("duplicate widget id `{id}`"),
            Self::DanglingReference {
                category_id,
                widget_id,
            } => format!("category `{category_id}` displays unknown widget `{widget_id}`"),
        }
    }
}

impl DashboardState {
    pub fn new(categories: Vec<Category>, available_widgets: Vec<Widget>) -> Self {
        Self {
            categories,
            available_widgets,
        }
    }

    pub fn find_category(&self, category_id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
    }

    pub(crate) fn find_category_mut(&mut self, category_id: &str) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.id == category_id)
    }

    pub fn find_widget(&self, widget_id: &str) -> Option<&Widget> {
        self.available_widgets
            .iter()
            .find(|widget| widget.id == widget_id)
    }

    pub fn contains_widget(&self, widget_id: &str) -> bool {
        self.find_widget(widget_id).is_some()
    }

    /// Checks id uniqueness for categories and widgets, and that every
    /// displayed id resolves to a catalog entry.
    pub fn validate(&self) -> Result<(), StateViolation> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                return Err(StateViolation::DuplicateCategoryId(category.id.clone()));
            }
        }
        let mut seen = HashSet::new();
        for widget in &self.available_widgets {
            if !seen.insert(widget.id.as_str()) {
                return Err(StateViolation::DuplicateWidgetId(widget.id.clone()));
            }
        }
        if let Some((category_id, widget_id)) = self.dangling_references().first() {
            return Err(StateViolation::DanglingReference {
                category_id: category_id.to_string(),
                widget_id: widget_id.to_string(),
            });
        }
        Ok(())
    }

    /// Displayed ids that no longer resolve to a catalog entry, as `(category_id, widget_id)`.
    pub fn dangling_references(&self) -> Vec<(&str, &str)> {
        self.categories
            .iter()
            .flat_map(|category| {
                category
                    .displayed_widgets
                    .iter()
                    .filter(|id| !self.contains_widget(id))
                    .map(move |id| (category.id.as_str(), id.as_str()))
            })
            .collect()
    }

    /// Built-in dataset used when nothing usable is stored.
    pub fn sample() -> Self {
        let categories = vec![
            sample_category("cspm", "CSPM Executive Dashboard", &["w1", "w2"]),
            sample_category("cwpp", "CWPP Dashboard", &["w3"]),
            sample_category("registry", "Registry Scan", &["w4", "w5"]),
            sample_category("ticket", "Ticket Dashboard", &["w6", "w7"]),
            sample_category("compliance", "Compliance Dashboard", &["w8", "w9"]),
            sample_category("performance", "Performance Metrics", &["w10", "w11"]),
        ];
        let available_widgets = vec![
            Widget::new("w1", "Cloud Accounts", "Cloud accounts summary...", "cspm"),
            Widget::new(
                "w2",
                "Cloud Account Risk Assessment",
                "Risk donut chart placeholder",
                "cspm",
            ),
            Widget::new(
                "w3",
                "Top 5 Namespace Specific Alerts",
                "No graph data available",
                "cwpp",
            ),
            Widget::new("w4", "Image Risk Assessment", "Registry scan results", "registry"),
            Widget::new(
                "w5",
                "Image Security Issues",
                "Security vulnerabilities found",
                "registry",
            ),
            Widget::new("w6", "Open Tickets", "Current open support tickets", "ticket"),
            Widget::new("w7", "Ticket Trends", "Monthly ticket trends", "ticket"),
            Widget::new("w8", "Compliance Score", "Overall compliance rating", "compliance"),
            Widget::new("w9", "Policy Violations", "Current policy violations", "compliance"),
            Widget::new("w10", "System Performance", "Current system metrics", "performance"),
            Widget::new(
                "w11",
                "Resource Utilization",
                "Resource usage statistics",
                "performance",
            ),
        ];
        Self {
            categories,
            available_widgets,
        }
    }
}

fn sample_category(id: &str, name: &str, displayed: &[&str]) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        displayed_widgets: displayed.iter().map(|id| id.to_string()).collect(),
    }
}
