// Shared data model for the Calorize widgets.
//
// Everything here serializes with serde_json: the snapshot is persisted as
// JSON by the host app and the rendered views are handed to the widget host
// as JSON by the `widget_updater` binary.
//
// ```rust
// let snapshot: types::NutrientSnapshot =
//     serde_json::from_str(r#"{"caloriesLeft": 1200}"#).unwrap();
// ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Summary of the current nutrition state, as published by the main app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutrientSnapshot {
    pub calories_left: i64,

    pub calories_consumed: i64,

    pub calories_goal: i64,

    /// Pre-formatted by the app, e.g. "25%"
    pub percentage_text: String,

    pub protein_left: i64,

    pub carbs_left: i64,

    pub fats_left: i64,

    /// Calories progress out of 100. Not clamped.
    pub progress: i64,
}

impl Default for NutrientSnapshot {
    fn default() -> Self {
        Self {
            calories_left: 1737,
            calories_consumed: 500,
            calories_goal: 2000,
            percentage_text: "25%".to_string(),
            protein_left: 117,
            carbs_left: 209,
            fats_left: 48,
            progress: 25,
        }
    }
}

/// Where a decoded snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOrigin {
    /// Parsed from the persisted blob
    Stored,

    /// Nothing was ever persisted, defaults were used
    Missing,

    /// A blob was present but could not be used, defaults were used
    Fallback,
}

/// Widget kind. Fixed for the lifetime of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetVariant {
    Dashboard,

    Shortcuts,
}

impl fmt::Display for WidgetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard => f.write_str("dashboard"),
            Self::Shortcuts => f.write_str("shortcuts"),
        }
    }
}

/// Opaque identifier the host assigns to a placed widget
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InstanceId(pub i32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetInstance {
    pub id: InstanceId,

    pub variant: WidgetVariant,
}

/// Symbolic name of a view slot, resolved to a concrete layout element by
/// the rendering collaborator
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    Percentage,

    ConsumedGoal,

    ProteinValue,

    CarbsValue,

    FatsValue,

    CaloriesProgress,

    LogFood,

    ScanFood,

    ScanBarcode,
}

/// Binds a tappable slot to the deep link it opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepLinkBinding {
    pub slot_id: SlotId,

    pub uri: &'static str,
}

/// Identity of a launch registration. Derived from the deep link URI, so
/// the same URI always lands on the same registration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DispatchKey(pub i32);

/// How the host should bring up the main app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchMode {
    /// Reuse the running app instead of stacking a new one on top
    SingleTop,
}

/// What a tap on a bound slot launches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchIntent {
    pub action: String,

    pub uri: String,

    pub mode: LaunchMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSlot {
    pub max: i64,

    pub value: i64,
}

/// Fully populated view for one widget instance, ready to commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedView {
    pub instance_id: InstanceId,

    pub variant: WidgetVariant,

    /// Only set for variants that read the snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<SnapshotOrigin>,

    pub texts: BTreeMap<SlotId, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressSlot>,

    pub taps: BTreeMap<SlotId, DispatchKey>,

    /// ISO 8601 timestamp of the render
    pub rendered_at: String,
}
