use super::*;
use pretty_assertions::assert_eq;

fn toggle(category_id: &str, widget_id: &str, visible: bool) -> DashboardAction {
    DashboardAction::ToggleWidgetVisibility {
        category_id: category_id.to_string(),
        widget_id: widget_id.to_string(),
        visible,
    }
}

#[test]
fn showing_twice_leaves_single_entry() {
    let mut state = state();
    assert_persisted(&run(&mut state, toggle("cwpp", "w8", true)));
    assert!(run(&mut state, toggle("cwpp", "w8", true)).is_empty());
    assert_eq!(displayed(&state, "cwpp"), vec!["w3", "w8"]);
}

#[test]
fn hiding_removes_and_repeats_are_noops() {
    let mut state = state();
    assert_persisted(&run(&mut state, toggle("cspm", "w1", false)));
    assert!(run(&mut state, toggle("cspm", "w1", false)).is_empty());
    assert_eq!(displayed(&state, "cspm"), vec!["w2"]);
    assert!(state.contains_widget("w1"));
}

#[test]
fn showing_uncataloged_id_is_refused_but_hiding_cleans_up() {
    let mut state = state();
    assert!(run(&mut state, toggle("cspm", "ghost", true)).is_empty());
    assert_eq!(displayed(&state, "cspm"), vec!["w1", "w2"]);

    state.categories[0].displayed_widgets.push("ghost".to_string());
    assert_persisted(&run(&mut state, toggle("cspm", "ghost", false)));
    assert_eq!(displayed(&state, "cspm"), vec!["w1", "w2"]);
}

#[test]
fn toggle_in_unknown_category_is_noop() {
    let mut state = state();
    let before = state.clone();
    assert!(run(&mut state, toggle("missing", "w1", true)).is_empty());
    assert_eq!(state, before);
}

#[test]
fn toggle_in_category_heals_missing_catalog_entry() {
    let mut state = state();
    let stray = widget("w_stray", "ticket");
    let effects = run(
        &mut state,
        DashboardAction::ToggleWidgetInCategory {
            category_id: "ticket".to_string(),
            widget: stray.clone(),
            checked: true,
        },
    );
    assert_persisted(&effects);
    assert_eq!(state.find_widget("w_stray"), Some(&stray));
    assert_eq!(displayed(&state, "ticket"), vec!["w6", "w7", "w_stray"]);

    run(
        &mut state,
        DashboardAction::ToggleWidgetInCategory {
            category_id: "ticket".to_string(),
            widget: stray,
            checked: false,
        },
    );
    assert_eq!(displayed(&state, "ticket"), vec!["w6", "w7"]);
    assert!(state.contains_widget("w_stray"));
}

#[test]
fn toggle_in_category_keeps_existing_record() {
    let mut state = state();
    let mut imposter = widget("w3", "cwpp");
    imposter.name = "Imposter".to_string();
    run(
        &mut state,
        DashboardAction::ToggleWidgetInCategory {
            category_id: "cspm".to_string(),
            widget: imposter,
            checked: true,
        },
    );
    assert_eq!(
        state.find_widget("w3").map(|w| w.name.as_str()),
        Some("Top 5 Namespace Specific Alerts")
    );
    assert_eq!(displayed(&state, "cspm"), vec!["w1", "w2", "w3"]);
}

#[test]
fn toggle_in_unknown_category_does_not_catalog() {
    let mut state = state();
    let effects = run(
        &mut state,
        DashboardAction::ToggleWidgetInCategory {
            category_id: "missing".to_string(),
            widget: widget("w_stray", "missing"),
            checked: true,
        },
    );
    assert!(effects.is_empty());
    assert!(!state.contains_widget("w_stray"));
}
