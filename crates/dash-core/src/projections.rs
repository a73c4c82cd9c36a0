//! Read-only views derived from [`DashboardState`].

use std::collections::HashSet;

use super::state::Category;
use super::state::DashboardState;
use super::state::Widget;

/// A catalog entry annotated with its owning category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatWidget<'a> {
    pub widget: &'a Widget,
    pub category_id: &'a str,
    /// `None` when the owning category no longer exists.
    pub category_name: Option<&'a str>,
}

impl FlatWidget<'_> {
    fn matches(&self, needle: &str) -> bool {
        self.widget.name.to_lowercase().contains(needle)
            || self.widget.text.to_lowercase().contains(needle)
            || self
                .category_name
                .is_some_and(|name| name.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView<'a> {
    pub category: &'a Category,
    pub widgets: Vec<&'a Widget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGroup<'a> {
    pub category_id: &'a str,
    pub category_name: &'a str,
    pub widgets: Vec<&'a Widget>,
}

pub fn flattened_widgets(state: &DashboardState) -> Vec<FlatWidget<'_>> {
    state
        .available_widgets
        .iter()
        .map(|widget| FlatWidget {
            widget,
            category_id: widget.category_id.as_str(),
            category_name: state
                .find_category(&widget.category_id)
                .map(|category| category.name.as_str()),
        })
        .collect()
}

/// Case-insensitive substring search over widget name, widget text and
/// owning category name. A blank query returns everything.
pub fn search_widgets<'a>(state: &'a DashboardState, query: &str) -> Vec<FlatWidget<'a>> {
    let needle = query.trim().to_lowercase();
    let flat = flattened_widgets(state);
    if needle.is_empty() {
        return flat;
    }
    flat.into_iter().filter(|entry| entry.matches(&needle)).collect()
}

/// Resolves a category's visibility list, skipping ids missing from the catalog.
pub fn displayed_widgets<'a>(state: &'a DashboardState, category_id: &str) -> Vec<&'a Widget> {
    state
        .find_category(category_id)
        .map(|category| resolve(state, category))
        .unwrap_or_default()
}

pub fn all_displayed(state: &DashboardState) -> Vec<CategoryView<'_>> {
    state
        .categories
        .iter()
        .map(|category| CategoryView {
            category,
            widgets: resolve(state, category),
        })
        .collect()
}

/// Groups the catalog by owning category, in category order. Categories
/// owning nothing still get an empty group.
pub fn catalog_by_category(state: &DashboardState) -> Vec<CatalogGroup<'_>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut groups: Vec<CatalogGroup<'_>> = Vec::with_capacity(state.categories.len());
    for category in &state.categories {
        if !seen.insert(category.id.as_str()) {
            continue;
        }
        groups.push(CatalogGroup {
            category_id: category.id.as_str(),
            category_name: category.name.as_str(),
            widgets: Vec::new(),
        });
    }
    for widget in &state.available_widgets {
        let Some(group) = groups
            .iter_mut()
            .find(|group| group.category_id == widget.category_id)
        else {
            continue;
        };
        if group.widgets.iter().all(|existing| existing.id != widget.id) {
            group.widgets.push(widget);
        }
    }
    groups
}

pub fn is_widget_displayed(state: &DashboardState, category_id: &str, widget_id: &str) -> bool {
    state
        .find_category(category_id)
        .is_some_and(|category| category.displays(widget_id))
}

fn resolve<'a>(state: &'a DashboardState, category: &Category) -> Vec<&'a Widget> {
    category
        .displayed_widgets
        .iter()
        .filter_map(|id| state.find_widget(id))
        .collect()
}
