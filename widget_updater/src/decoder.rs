use crate::error::WidgetError;
use serde_json::{Map, Value as JsonValue};
use tracing::warn;
use types::{NutrientSnapshot, SnapshotOrigin};

/// A decoded snapshot along with where its values came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub snapshot: NutrientSnapshot,
    pub origin: SnapshotOrigin,
}

impl DecodedSnapshot {
    pub fn fallback() -> Self {
        Self {
            snapshot: NutrientSnapshot::default(),
            origin: SnapshotOrigin::Fallback,
        }
    }
}

/// Decode the persisted blob, falling back to the default snapshot when the
/// blob is absent or unusable. Never fails.
///
/// Fields that are missing, `null`, or of the wrong type take their default
/// individually. Unknown fields are ignored.
pub fn decode(raw: Option<&str>) -> DecodedSnapshot {
    let Some(raw) = raw else {
        return DecodedSnapshot {
            snapshot: NutrientSnapshot::default(),
            origin: SnapshotOrigin::Missing,
        };
    };

    match try_decode(raw) {
        Ok(snapshot) => DecodedSnapshot {
            snapshot,
            origin: SnapshotOrigin::Stored,
        },
        Err(e) => {
            warn!("Falling back to default snapshot: {}", e);
            DecodedSnapshot::fallback()
        }
    }
}

/// Strict variant of [`decode`] that reports why a blob was rejected.
///
/// # Errors
/// `WidgetError::Decode` if the blob is not JSON, `WidgetError::NotAnObject`
/// if it is JSON but not an object.
pub fn try_decode(raw: &str) -> Result<NutrientSnapshot, WidgetError> {
    let value: JsonValue = serde_json::from_str(raw)?;
    let fields = value.as_object().ok_or(WidgetError::NotAnObject)?;

    let defaults = NutrientSnapshot::default();

    Ok(NutrientSnapshot {
        calories_left: int_field(fields, "caloriesLeft", defaults.calories_left),
        calories_consumed: int_field(
            fields,
            "caloriesConsumed",
            defaults.calories_consumed,
        ),
        calories_goal: int_field(fields, "caloriesGoal", defaults.calories_goal),
        percentage_text: fields
            .get("percentageText")
            .and_then(JsonValue::as_str)
            .map_or(defaults.percentage_text, str::to_string),
        protein_left: int_field(fields, "proteinLeft", defaults.protein_left),
        carbs_left: int_field(fields, "carbsLeft", defaults.carbs_left),
        fats_left: int_field(fields, "fatsLeft", defaults.fats_left),
        progress: int_field(fields, "progress", defaults.progress),
    })
}

// Integers as written, floats truncated toward zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn int_field(fields: &Map<String, JsonValue>, name: &str, default: i64) -> i64 {
    let Some(value) = fields.get(name) else {
        return default;
    };

    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        })
        .unwrap_or(default)
}
