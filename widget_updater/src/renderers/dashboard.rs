use super::{Rendered, SnapshotSource, WidgetRenderer};
use crate::mapper;
use types::WidgetVariant;

/// Renderer for the dashboard summary widget
///
/// Shows:
/// - the calories percentage text and a consumed / goal line
/// - protein, carbs and fats left, in grams
/// - a calories bar out of 100, fed from `progress` without clamping
///
/// Its single button opens manual food logging.
pub struct DashboardRenderer;

impl WidgetRenderer for DashboardRenderer {
    fn variant(&self) -> WidgetVariant {
        WidgetVariant::Dashboard
    }

    fn render(&self, snapshots: &dyn SnapshotSource) -> Rendered {
        let decoded = snapshots.snapshot();

        Rendered {
            view_model: mapper::dashboard(&decoded.snapshot),
            origin: Some(decoded.origin),
        }
    }
}
