use std::fmt::Write;

use dash_core::projections::CatalogGroup;
use dash_core::projections::CategoryView;
use dash_core::projections::FlatWidget;
use dash_core::state::DashboardState;

pub fn dashboard(views: &[CategoryView<'_>]) -> String {
    let mut out = String::new();
    if views.is_empty() {
        out.push_str("(no categories)\n");
        return out;
    }
    for view in views {
        let _ = writeln!(out, "{} [{}]", view.category.name, view.category.id);
        if view.widgets.is_empty() {
            out.push_str("  (no widgets)\n");
        }
        for widget in &view.widgets {
            let _ = writeln!(out, "  - {} [{}]: {}", widget.name, widget.id, widget.text);
        }
    }
    out
}

pub fn catalog(state: &DashboardState, groups: &[CatalogGroup<'_>]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{} [{}]", group.category_name, group.category_id);
        if group.widgets.is_empty() {
            out.push_str("  No widgets available for this category.\n");
        }
        for widget in &group.widgets {
            let mark = if dash_core::projections::is_widget_displayed(
                state,
                group.category_id,
                &widget.id,
            ) {
                'x'
            } else {
                ' '
            };
            let _ = writeln!(out, "  [{mark}] {} [{}]", widget.name, widget.id);
        }
    }
    out
}

pub fn search_results(hits: &[FlatWidget<'_>]) -> String {
    let mut out = String::new();
    if hits.is_empty() {
        out.push_str("no matching widgets\n");
        return out;
    }
    for hit in hits {
        let _ = writeln!(
            out,
            "{} [{}] in {}: {}",
            hit.widget.name,
            hit.widget.id,
            hit.category_name.unwrap_or(hit.category_id),
            hit.widget.text
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use dash_core::projections;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dashboard_lists_displayed_widgets_per_category() {
        let mut state = DashboardState::sample();
        state.categories.truncate(2);
        let text = dashboard(&projections::all_displayed(&state));
        assert_eq!(
            text,
            "CSPM Executive Dashboard [cspm]\n  - Cloud Accounts [w1]: Cloud accounts summary...\n  - Cloud Account Risk Assessment [w2]: Risk donut chart placeholder\nCWPP Dashboard [cwpp]\n  - Top 5 Namespace Specific Alerts [w3]: No graph data available\n"
        );
    }

    #[test]
    fn catalog_marks_displayed_widgets() {
        let mut state = DashboardState::sample();
        state.categories.truncate(1);
        state.categories[0].displayed_widgets = vec!["w2".to_string()];
        let text = catalog(&state, &projections::catalog_by_category(&state));
        assert_eq!(
            text,
            "CSPM Executive Dashboard [cspm]\n  [ ] Cloud Accounts [w1]\n  [x] Cloud Account Risk Assessment [w2]\n"
        );
    }

    #[test]
    fn empty_search_says_so() {
        assert_eq!(search_results(&[]), "no matching widgets\n");
    }
}
