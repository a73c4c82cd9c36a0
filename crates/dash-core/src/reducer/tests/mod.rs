pub(super) use super::reduce;
pub(super) use crate::actions::DashboardAction;
pub(super) use crate::reducer::DashboardEffect;
pub(super) use crate::reducer::RejectedAction;
pub(super) use crate::state::Category;
pub(super) use crate::state::DashboardState;
pub(super) use crate::state::Widget;

mod visibility;

fn state() -> DashboardState {
    DashboardState::sample()
}

fn widget(id: &str, category_id: &str) -> Widget {
    Widget::new(id, format!("Widget {id}"), "placeholder", category_id)
}

fn run(state: &mut DashboardState, action: DashboardAction) -> Vec<DashboardEffect> {
    reduce(state, action).expect("action accepted")
}

fn assert_persisted(effects: &[DashboardEffect]) {
    assert!(matches!(effects, [DashboardEffect::Persist]));
}

fn displayed<'a>(state: &'a DashboardState, category_id: &str) -> Vec<&'a str> {
    state
        .find_category(category_id)
        .map(|category| {
            category
                .displayed_widgets
                .iter()
                .map(String::as_str)
                .collect()
        })
        .unwrap_or_default()
}

fn catalog_ids(state: &DashboardState) -> Vec<&str> {
    state
        .available_widgets
        .iter()
        .map(|widget| widget.id.as_str())
        .collect()
}

fn assert_no_dangling(state: &DashboardState) {
    assert!(
        state.dangling_references().is_empty(),
        "dangling references: {:?}",
        state.dangling_references()
    );
}
