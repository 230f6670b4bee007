use std::collections::BTreeMap;
use types::{NutrientSnapshot, ProgressSlot, SlotId};

/// Denominator of the dashboard calories bar
pub const PROGRESS_MAX: i64 = 100;

/// Data-bearing slot values for one view, before links are attached
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub texts: BTreeMap<SlotId, String>,
    pub progress: Option<ProgressSlot>,
}

/// Project a snapshot onto the dashboard slots.
///
/// `progress` is handed to the bar as-is, values outside 0..=100 included.
/// `caloriesLeft` has no slot on this layout.
pub fn dashboard(snapshot: &NutrientSnapshot) -> ViewModel {
    let texts = BTreeMap::from([
        (SlotId::Percentage, snapshot.percentage_text.clone()),
        (
            SlotId::ConsumedGoal,
            format!(
                "{} / {}",
                snapshot.calories_consumed, snapshot.calories_goal
            ),
        ),
        (SlotId::ProteinValue, format!("{}g", snapshot.protein_left)),
        (SlotId::CarbsValue, format!("{}g", snapshot.carbs_left)),
        (SlotId::FatsValue, format!("{}g", snapshot.fats_left)),
    ]);

    ViewModel {
        texts,
        progress: Some(ProgressSlot {
            max: PROGRESS_MAX,
            value: snapshot.progress,
        }),
    }
}

/// The shortcuts layout is static, only its buttons get bound.
pub fn shortcuts() -> ViewModel {
    ViewModel::default()
}
