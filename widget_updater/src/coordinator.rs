use crate::decoder::{self, DecodedSnapshot};
use crate::deeplinks::{dispatch_key, launch_intent};
use crate::error::WidgetError;
use crate::host::WidgetHost;
use crate::renderers::{SnapshotSource, renderer_for};
use crate::store::{DEFAULT_SNAPSHOT_KEY, SnapshotStore};
use chrono::Utc;
use serde::Serialize;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use types::{InstanceId, RenderedView, WidgetInstance, WidgetVariant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInstance {
    pub instance_id: InstanceId,
    pub reason: String,
}

/// Outcome of one update batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub widgets_processed: usize,
    pub widgets_updated: usize,
    pub skipped: Vec<SkippedInstance>,
}

/// Reads and decodes the snapshot on first use, then hands out the same
/// value to every dashboard in the batch.
struct BatchSnapshot<'a, S: ?Sized> {
    store: &'a S,
    key: &'a str,
    decoded: OnceCell<DecodedSnapshot>,
}

impl<'a, S: SnapshotStore + ?Sized> BatchSnapshot<'a, S> {
    const fn new(store: &'a S, key: &'a str) -> Self {
        Self {
            store,
            key,
            decoded: OnceCell::new(),
        }
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotSource for BatchSnapshot<'_, S> {
    fn snapshot(&self) -> &DecodedSnapshot {
        self.decoded.get_or_init(|| match self.store.read(self.key) {
            Ok(raw) => decoder::decode(raw.as_deref()),
            Err(e) => {
                warn!("{}", WidgetError::from(e));
                DecodedSnapshot::fallback()
            }
        })
    }
}

/// Runs the update pipeline for batches handed over by the widget host.
pub struct UpdateCoordinator<'a, S: ?Sized, H: ?Sized> {
    store: &'a S,
    host: &'a mut H,
    snapshot_key: &'a str,
}

impl<'a, S, H> UpdateCoordinator<'a, S, H>
where
    S: SnapshotStore + ?Sized,
    H: WidgetHost + ?Sized,
{
    pub fn new(store: &'a S, host: &'a mut H) -> Self {
        Self {
            store,
            host,
            snapshot_key: DEFAULT_SNAPSHOT_KEY,
        }
    }

    #[must_use]
    pub fn with_snapshot_key(mut self, key: &'a str) -> Self {
        self.snapshot_key = key;
        self
    }

    /// Trigger entry point: the host hands over bare ids and the variant of
    /// each is looked up on the host.
    pub fn on_update(&mut self, ids: &[InstanceId]) -> BatchReport {
        let resolved: Vec<_> = ids
            .iter()
            .map(|&id| (id, self.host.variant_of(id)))
            .collect();

        self.run_batch(resolved)
    }

    /// Update each instance in order. A fault in one instance never stops
    /// the rest of the batch.
    pub fn update(&mut self, batch: &[WidgetInstance]) -> BatchReport {
        self.run_batch(
            batch
                .iter()
                .map(|instance| (instance.id, Some(instance.variant)))
                .collect(),
        )
    }

    fn run_batch(
        &mut self,
        batch: Vec<(InstanceId, Option<WidgetVariant>)>,
    ) -> BatchReport {
        let snapshots = BatchSnapshot::new(self.store, self.snapshot_key);
        let now = Utc::now().to_rfc3339();
        let mut report = BatchReport::default();

        for (id, variant) in batch {
            report.widgets_processed += 1;

            let result = variant
                .ok_or(WidgetError::UnsupportedVariant(id))
                .and_then(|variant| {
                    self.update_instance(
                        WidgetInstance { id, variant },
                        &snapshots,
                        &now,
                    )
                });

            match result {
                Ok(()) => report.widgets_updated += 1,
                Err(e) => {
                    if e.is_recoverable() {
                        debug!("Skipping widget {}: {}", id, e);
                    } else {
                        warn!("Skipping widget {}: {}", id, e);
                    }
                    report.skipped.push(SkippedInstance {
                        instance_id: id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Processed {} widgets, updated {}",
            report.widgets_processed, report.widgets_updated
        );

        report
    }

    fn update_instance(
        &mut self,
        instance: WidgetInstance,
        snapshots: &dyn SnapshotSource,
        now: &str,
    ) -> Result<(), WidgetError> {
        let renderer = renderer_for(instance.variant);
        let rendered = renderer.render(snapshots);

        let mut taps = BTreeMap::new();
        for binding in renderer.bindings() {
            let key = dispatch_key(binding.uri);
            debug!(
                "Binding {:?} on widget {} to {}",
                binding.slot_id, instance.id, binding.uri
            );
            self.host.register_launch(key, launch_intent(binding));
            taps.insert(binding.slot_id, key);
        }

        self.host.commit(RenderedView {
            instance_id: instance.id,
            variant: instance.variant,
            origin: rendered.origin,
            texts: rendered.view_model.texts,
            progress: rendered.view_model.progress,
            taps,
            rendered_at: now.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::host::InMemoryWidgetHost;
    use crate::store::MemorySnapshotStore;
    use std::cell::Cell;
    use types::{SlotId, SnapshotOrigin};

    /// Counts reads so tests can tell whether the store was touched
    #[derive(Default)]
    struct CountingStore {
        inner: MemorySnapshotStore,
        reads: Cell<usize>,
    }

    impl SnapshotStore for CountingStore {
        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.reads.set(self.reads.get() + 1);
            self.inner.read(key)
        }
    }

    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    fn dashboard(id: i32) -> WidgetInstance {
        WidgetInstance {
            id: InstanceId(id),
            variant: WidgetVariant::Dashboard,
        }
    }

    fn shortcuts(id: i32) -> WidgetInstance {
        WidgetInstance {
            id: InstanceId(id),
            variant: WidgetVariant::Shortcuts,
        }
    }

    fn host_with(instances: &[WidgetInstance]) -> InMemoryWidgetHost {
        let mut host = InMemoryWidgetHost::new();
        for instance in instances {
            host.place(instance.id, instance.variant);
        }
        host
    }

    #[test]
    fn test_shortcuts_only_batch_never_reads_store() {
        let store = CountingStore::default();
        let batch = [shortcuts(1), shortcuts(2)];
        let mut host = host_with(&batch);

        let report = UpdateCoordinator::new(&store, &mut host).update(&batch);

        assert_eq!(report.widgets_updated, 2);
        assert_eq!(store.reads.get(), 0);
    }

    #[test]
    fn test_snapshot_read_once_per_batch() {
        let store = CountingStore::default();
        let batch = [dashboard(1), shortcuts(2), dashboard(3)];
        let mut host = host_with(&batch);

        let report = UpdateCoordinator::new(&store, &mut host).update(&batch);

        assert_eq!(report.widgets_updated, 3);
        assert_eq!(store.reads.get(), 1);
        assert_eq!(
            host.view(InstanceId(1)).unwrap().texts,
            host.view(InstanceId(3)).unwrap().texts
        );
    }

    #[test]
    fn test_custom_snapshot_key() {
        let store = MemorySnapshotStore::new()
            .with_entry("widget_data", r#"{"progress": 10}"#)
            .with_entry("other_key", r#"{"progress": 90}"#);
        let batch = [dashboard(1)];
        let mut host = host_with(&batch);

        UpdateCoordinator::new(&store, &mut host)
            .with_snapshot_key("other_key")
            .update(&batch);

        assert_eq!(host.view(InstanceId(1)).unwrap().progress.unwrap().value, 90);
    }

    #[test]
    fn test_store_failure_renders_fallback() {
        let batch = [dashboard(1)];
        let mut host = host_with(&batch);

        let report = UpdateCoordinator::new(&BrokenStore, &mut host).update(&batch);

        assert_eq!(report.widgets_updated, 1);
        let view = host.view(InstanceId(1)).unwrap();
        assert_eq!(view.origin, Some(SnapshotOrigin::Fallback));
        assert_eq!(view.texts[&SlotId::ConsumedGoal], "500 / 2000");
    }

    #[test]
    fn test_missing_instance_does_not_abort_batch() {
        let store = MemorySnapshotStore::new();
        let mut host = host_with(&[dashboard(2)]);

        let report = UpdateCoordinator::new(&store, &mut host)
            .update(&[dashboard(1), dashboard(2)]);

        assert_eq!(report.widgets_processed, 2);
        assert_eq!(report.widgets_updated, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].instance_id, InstanceId(1));
        assert!(host.view(InstanceId(2)).is_some());
    }

    #[test]
    fn test_on_update_skips_unknown_variant() {
        let store = MemorySnapshotStore::new();
        let mut host = host_with(&[shortcuts(5)]);

        let report =
            UpdateCoordinator::new(&store, &mut host).on_update(&[InstanceId(4), InstanceId(5)]);

        assert_eq!(report.widgets_processed, 2);
        assert_eq!(report.widgets_updated, 1);
        assert_eq!(
            report.skipped,
            vec![SkippedInstance {
                instance_id: InstanceId(4),
                reason: "Widget instance 4 has no known variant".to_string(),
            }]
        );
        assert_eq!(
            host.view(InstanceId(5)).unwrap().variant,
            WidgetVariant::Shortcuts
        );
    }

    #[test]
    fn test_view_taps_use_dispatch_keys() {
        let store = MemorySnapshotStore::new();
        let batch = [dashboard(1)];
        let mut host = host_with(&batch);

        UpdateCoordinator::new(&store, &mut host).update(&batch);

        let view = host.view(InstanceId(1)).unwrap();
        assert_eq!(
            view.taps,
            BTreeMap::from([(SlotId::LogFood, dispatch_key("calorize://manual_log"))])
        );
    }
}
