use crate::error::WidgetError;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use types::{
    DispatchKey, InstanceId, LaunchIntent, RenderedView, SlotId, WidgetVariant,
};

/// The OS surface the widgets live on.
///
/// The host owns instance identity, launch registrations and the views it
/// displays. The pipeline only ever calls into it.
pub trait WidgetHost {
    /// Variant the instance was registered with, `None` if the host cannot
    /// place it
    fn variant_of(&self, id: InstanceId) -> Option<WidgetVariant>;

    /// Register a tap target. A registration under an existing key replaces
    /// that registration.
    fn register_launch(&mut self, key: DispatchKey, intent: LaunchIntent);

    /// Display a view.
    ///
    /// # Errors
    /// `WidgetError::MissingInstance` if the instance was removed.
    fn commit(&mut self, view: RenderedView) -> Result<(), WidgetError>;
}

/// Host kept entirely in memory. Also simulates taps so links can be
/// exercised end to end.
#[derive(Debug, Default)]
pub struct InMemoryWidgetHost {
    placed: BTreeMap<InstanceId, WidgetVariant>,
    launches: HashMap<DispatchKey, LaunchIntent>,
    views: BTreeMap<InstanceId, RenderedView>,
    dispatched: Vec<LaunchIntent>,
}

impl InMemoryWidgetHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, id: InstanceId, variant: WidgetVariant) {
        self.placed.insert(id, variant);
    }

    /// Remove an instance along with whatever it was showing
    pub fn remove(&mut self, id: InstanceId) {
        self.placed.remove(&id);
        self.views.remove(&id);
    }

    pub fn view(&self, id: InstanceId) -> Option<&RenderedView> {
        self.views.get(&id)
    }

    pub fn views(&self) -> impl Iterator<Item = &RenderedView> {
        self.views.values()
    }

    pub fn registration_count(&self) -> usize {
        self.launches.len()
    }

    pub fn registration(&self, key: DispatchKey) -> Option<&LaunchIntent> {
        self.launches.get(&key)
    }

    /// Simulate the user tapping `slot` on an instance. Returns the launch
    /// that fired, if the slot is bound.
    pub fn tap(&mut self, id: InstanceId, slot: SlotId) -> Option<&LaunchIntent> {
        let key = self.views.get(&id)?.taps.get(&slot)?;
        let intent = self.launches.get(key)?.clone();

        debug!("Dispatching {} from instance {}", intent.uri, id);
        self.dispatched.push(intent);
        self.dispatched.last()
    }

    /// Launches fired so far, oldest first
    pub fn dispatched(&self) -> &[LaunchIntent] {
        &self.dispatched
    }
}

impl WidgetHost for InMemoryWidgetHost {
    fn variant_of(&self, id: InstanceId) -> Option<WidgetVariant> {
        self.placed.get(&id).copied()
    }

    fn register_launch(&mut self, key: DispatchKey, intent: LaunchIntent) {
        self.launches.insert(key, intent);
    }

    fn commit(&mut self, view: RenderedView) -> Result<(), WidgetError> {
        if !self.placed.contains_key(&view.instance_id) {
            return Err(WidgetError::MissingInstance(view.instance_id));
        }

        self.views.insert(view.instance_id, view);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::LaunchMode;

    fn view_for(id: InstanceId, taps: BTreeMap<SlotId, DispatchKey>) -> RenderedView {
        RenderedView {
            instance_id: id,
            variant: WidgetVariant::Shortcuts,
            origin: None,
            texts: BTreeMap::new(),
            progress: None,
            taps,
            rendered_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn intent(uri: &str) -> LaunchIntent {
        LaunchIntent {
            action: "view".to_string(),
            uri: uri.to_string(),
            mode: LaunchMode::SingleTop,
        }
    }

    #[test]
    fn test_commit_to_removed_instance_is_missing() {
        let mut host = InMemoryWidgetHost::new();
        host.place(InstanceId(3), WidgetVariant::Shortcuts);
        host.remove(InstanceId(3));

        let result = host.commit(view_for(InstanceId(3), BTreeMap::new()));

        assert!(matches!(result, Err(WidgetError::MissingInstance(InstanceId(3)))));
        assert!(host.view(InstanceId(3)).is_none());
    }

    #[test]
    fn test_register_launch_replaces_in_place() {
        let mut host = InMemoryWidgetHost::new();

        host.register_launch(DispatchKey(7), intent("calorize://old"));
        host.register_launch(DispatchKey(7), intent("calorize://new"));

        assert_eq!(host.registration_count(), 1);
        assert_eq!(
            host.registration(DispatchKey(7)).map(|i| i.uri.as_str()),
            Some("calorize://new")
        );
    }

    #[test]
    fn test_tap_unbound_slot_dispatches_nothing() {
        let mut host = InMemoryWidgetHost::new();
        host.place(InstanceId(1), WidgetVariant::Shortcuts);
        host.register_launch(DispatchKey(7), intent("calorize://scan_ai"));
        host.commit(view_for(
            InstanceId(1),
            BTreeMap::from([(SlotId::ScanFood, DispatchKey(7))]),
        ))
        .unwrap();

        assert!(host.tap(InstanceId(1), SlotId::LogFood).is_none());
        assert!(host.tap(InstanceId(2), SlotId::ScanFood).is_none());
        assert!(host.dispatched().is_empty());

        assert!(host.tap(InstanceId(1), SlotId::ScanFood).is_some());
        assert_eq!(host.dispatched().len(), 1);
    }
}
