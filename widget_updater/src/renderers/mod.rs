pub mod dashboard;
pub mod shortcuts;

use crate::decoder::DecodedSnapshot;
use crate::mapper::ViewModel;
use types::{DeepLinkBinding, SnapshotOrigin, WidgetVariant};

/// Lazily decoded snapshot shared by every renderer in a batch
pub trait SnapshotSource {
    fn snapshot(&self) -> &DecodedSnapshot;
}

/// Output of a renderer before links are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub view_model: ViewModel,
    pub origin: Option<SnapshotOrigin>,
}

/// Trait for variant-specific render logic
pub trait WidgetRenderer: Send + Sync {
    fn variant(&self) -> WidgetVariant;

    /// Map whatever input this variant needs onto its slots
    fn render(&self, snapshots: &dyn SnapshotSource) -> Rendered;

    fn bindings(&self) -> &'static [DeepLinkBinding] {
        crate::deeplinks::bindings(self.variant())
    }
}

/// Picks the renderer for a variant. Called once per instance, nothing
/// downstream branches on the variant again.
pub fn renderer_for(variant: WidgetVariant) -> &'static dyn WidgetRenderer {
    match variant {
        WidgetVariant::Dashboard => &dashboard::DashboardRenderer,
        WidgetVariant::Shortcuts => &shortcuts::ShortcutsRenderer,
    }
}
