use super::{Rendered, SnapshotSource, WidgetRenderer};
use crate::mapper;
use types::WidgetVariant;

/// Renderer for the quick-actions widget: a static layout with an AI scan
/// button and a barcode scan button. Never touches the snapshot.
pub struct ShortcutsRenderer;

impl WidgetRenderer for ShortcutsRenderer {
    fn variant(&self) -> WidgetVariant {
        WidgetVariant::Shortcuts
    }

    fn render(&self, _snapshots: &dyn SnapshotSource) -> Rendered {
        Rendered {
            view_model: mapper::shortcuts(),
            origin: None,
        }
    }
}
