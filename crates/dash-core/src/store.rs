use log::debug;
use log::info;

use super::actions::DashboardAction;
use super::persistence::PersistenceAdapter;
use super::persistence::SlotStorage;
use super::persistence::WriteStatus;
use super::projections;
use super::projections::CatalogGroup;
use super::projections::CategoryView;
use super::projections::FlatWidget;
use super::reducer::reduce;
use super::reducer::DashboardEffect;
use super::reducer::RejectedAction;
use super::state::DashboardState;
use super::state::Widget;

/// Outcome of one dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub operation: &'static str,
    /// Whether the state changed in a way that needs persisting.
    pub changed: bool,
    /// `None` when nothing needed writing.
    pub write: Option<WriteStatus>,
}

/// Owns the dashboard state; operations are the only way to change it.
#[derive(Debug)]
pub struct DashboardStore<S> {
    state: DashboardState,
    persistence: PersistenceAdapter<S>,
}

impl<S: SlotStorage> DashboardStore<S> {
    /// Cold start: loads and migrates the stored blob, falling back to the
    /// sample dataset. Nothing is written.
    pub fn open(storage: S) -> Self {
        Self::with_adapter(PersistenceAdapter::new(storage))
    }

    pub fn with_adapter(persistence: PersistenceAdapter<S>) -> Self {
        let snapshot = persistence.load();
        info!(
            "event=store_open module=store status=ok source={}",
            if snapshot.is_some() { "storage" } else { "sample" }
        );
        let mut store = Self {
            state: DashboardState::sample(),
            persistence,
        };
        store.hydrate(snapshot);
        store
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    pub fn dispatch(&mut self, action: DashboardAction) -> Result<DispatchReport, RejectedAction> {
        let operation = action.label();
        let effects = reduce(&mut self.state, action).inspect_err(|err| {
            info!("event=dispatch module=store status=rejected op={operation} reason=\"{err}\"");
        })?;
        let mut write = None;
        for effect in &effects {
            match effect {
                DashboardEffect::Persist => {
                    write = Some(self.persistence.save(&self.state));
                }
            }
        }
        debug!(
            "event=dispatch module=store status=ok op={operation} changed={}",
            !effects.is_empty()
        );
        Ok(DispatchReport {
            operation,
            changed: !effects.is_empty(),
            write,
        })
    }

    pub fn add_category(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<DispatchReport, RejectedAction> {
        self.dispatch(DashboardAction::AddCategory {
            id: id.into(),
            name: name.into(),
        })
    }

    pub fn remove_category(&mut self, id: &str) -> DispatchReport {
        self.apply(DashboardAction::RemoveCategory { id: id.to_string() })
    }

    pub fn add_widget(&mut self, widget: Widget) -> DispatchReport {
        self.apply(DashboardAction::AddWidget { widget })
    }

    pub fn add_and_show_widget(&mut self, category_id: &str, widget: Widget) -> DispatchReport {
        self.apply(DashboardAction::AddAndShowWidget {
            category_id: category_id.to_string(),
            widget,
        })
    }

    pub fn remove_widget(&mut self, widget_id: &str) -> DispatchReport {
        self.apply(DashboardAction::RemoveWidget {
            widget_id: widget_id.to_string(),
        })
    }

    pub fn toggle_widget_visibility(
        &mut self,
        category_id: &str,
        widget_id: &str,
        visible: bool,
    ) -> DispatchReport {
        self.apply(DashboardAction::ToggleWidgetVisibility {
            category_id: category_id.to_string(),
            widget_id: widget_id.to_string(),
            visible,
        })
    }

    pub fn toggle_widget_in_category(
        &mut self,
        category_id: &str,
        widget: Widget,
        checked: bool,
    ) -> DispatchReport {
        self.apply(DashboardAction::ToggleWidgetInCategory {
            category_id: category_id.to_string(),
            widget,
            checked,
        })
    }

    pub fn set_all(&mut self, next: DashboardState) -> Result<DispatchReport, RejectedAction> {
        self.dispatch(DashboardAction::SetAll(next))
    }

    pub fn hydrate(&mut self, snapshot: Option<DashboardState>) -> DispatchReport {
        self.apply(DashboardAction::Hydrate(snapshot))
    }

    pub fn search(&self, query: &str) -> Vec<FlatWidget<'_>> {
        projections::search_widgets(&self.state, query)
    }

    pub fn displayed_widgets(&self, category_id: &str) -> Vec<&Widget> {
        projections::displayed_widgets(&self.state, category_id)
    }

    pub fn category_views(&self) -> Vec<CategoryView<'_>> {
        projections::all_displayed(&self.state)
    }

    pub fn catalog_by_category(&self) -> Vec<CatalogGroup<'_>> {
        projections::catalog_by_category(&self.state)
    }

    // For actions the reducer never rejects.
    fn apply(&mut self, action: DashboardAction) -> DispatchReport {
        let operation = action.label();
        self.dispatch(action).unwrap_or(DispatchReport {
            operation,
            changed: false,
            write: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::persistence::MemorySlotStorage;
    use crate::persistence::StorageError;
    use crate::persistence::DEFAULT_SLOT_KEY;

    #[derive(Debug, Default)]
    struct FullDisk {
        writes: usize,
    }

    impl SlotStorage for FullDisk {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            self.writes += 1;
            Err(StorageError::Io(std::io::Error::other("quota exceeded")))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn stored(store: &DashboardStore<MemorySlotStorage>) -> Option<DashboardState> {
        store
            .persistence()
            .storage()
            .read(DEFAULT_SLOT_KEY)
            .expect("read")
            .map(|raw| serde_json::from_str(&raw).expect("decode"))
    }

    #[test]
    fn open_without_blob_uses_sample_and_writes_nothing() {
        let store = DashboardStore::open(MemorySlotStorage::new());
        assert_eq!(store.state(), &DashboardState::sample());
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn open_with_corrupt_blob_falls_back_to_sample() {
        let store =
            DashboardStore::open(MemorySlotStorage::with_slot(DEFAULT_SLOT_KEY, "not json"));
        assert_eq!(store.state(), &DashboardState::sample());
    }

    #[test]
    fn open_migrates_legacy_blob() {
        let raw = r#"{"categories":[{"id":"cspm","name":"CSPM","widgets":[{"id":"w1","name":"Cloud Accounts","text":"t"}]}]}"#;
        let store = DashboardStore::open(MemorySlotStorage::with_slot(DEFAULT_SLOT_KEY, raw));
        assert_eq!(store.state().categories.len(), 1);
        assert_eq!(store.displayed_widgets("cspm")[0].name, "Cloud Accounts");
        // Loading alone does not rewrite the slot.
        assert_eq!(
            store
                .persistence()
                .storage()
                .read(DEFAULT_SLOT_KEY)
                .expect("read")
                .as_deref(),
            Some(raw)
        );
    }

    #[test]
    fn every_mutation_is_persisted_synchronously() {
        let mut store = DashboardStore::open(MemorySlotStorage::new());
        let report = store.add_category("ops", "Ops").expect("added");
        assert_eq!(report.write, Some(WriteStatus::Written));
        assert_eq!(stored(&store).as_ref(), Some(store.state()));

        store.add_and_show_widget("ops", Widget::new("w_ops", "Latency", "p99", "ignored"));
        assert_eq!(stored(&store).as_ref(), Some(store.state()));
        assert_eq!(store.state().find_widget("w_ops").map(|w| w.category_id.as_str()), Some("ops"));
    }

    #[test]
    fn reopened_store_sees_previous_session() {
        let mut store = DashboardStore::open(MemorySlotStorage::new());
        store.remove_widget("w1");
        let storage = store.persistence().storage().clone();

        let reopened = DashboardStore::open(storage);
        assert_eq!(reopened.state(), store.state());
        assert!(reopened.state().find_widget("w1").is_none());
    }

    #[test]
    fn noop_operations_skip_the_write() {
        let mut store = DashboardStore::open(MemorySlotStorage::new());
        let report = store.remove_category("missing");
        assert!(!report.changed);
        assert_eq!(report.write, None);
        assert_eq!(stored(&store), None);

        let report = store.toggle_widget_visibility("cspm", "w1", true);
        assert!(!report.changed);
        assert_eq!(report.operation, "toggle_widget_visibility");
    }

    #[test]
    fn failed_write_keeps_in_memory_state_authoritative() {
        let mut store = DashboardStore::open(FullDisk::default());
        let report = store.remove_widget("w2");
        assert!(report.changed);
        assert!(matches!(report.write, Some(WriteStatus::Failed(_))));
        assert!(store.state().find_widget("w2").is_none());
        assert_eq!(store.persistence().storage().writes, 1);
    }

    #[test]
    fn duplicate_category_is_rejected_without_write() {
        let mut store = DashboardStore::open(MemorySlotStorage::new());
        let err = store.add_category("cspm", "Again").expect_err("rejected");
        assert_eq!(
            err,
            RejectedAction::DuplicateCategory {
                id: "cspm".to_string()
            }
        );
        assert_eq!(stored(&store), None);
        assert_eq!(
            store.state().find_category("cspm").map(|c| c.name.as_str()),
            Some("CSPM Executive Dashboard")
        );
    }

    #[test]
    fn hydrate_replaces_without_persisting() {
        let mut store = DashboardStore::open(MemorySlotStorage::new());
        let report = store.hydrate(Some(DashboardState::default()));
        assert_eq!(report.write, None);
        assert!(store.state().categories.is_empty());

        store.hydrate(None);
        assert!(store.state().categories.is_empty());
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn set_all_persists_replacement() {
        let mut store = DashboardStore::open(MemorySlotStorage::new());
        let report = store.set_all(DashboardState::default()).expect("set");
        assert_eq!(report.write, Some(WriteStatus::Written));
        assert_eq!(stored(&store), Some(DashboardState::default()));
    }

    #[test]
    fn store_projections_read_current_state() {
        let mut store = DashboardStore::open(MemorySlotStorage::new());
        assert_eq!(store.search("risk").len(), 2);
        store.remove_widget("w2");
        assert_eq!(store.search("risk").len(), 1);
        assert_eq!(store.category_views()[0].widgets.len(), 1);
        assert_eq!(store.catalog_by_category()[0].widgets.len(), 1);
    }
}
