use types::{
    DeepLinkBinding, DispatchKey, LaunchIntent, LaunchMode, SlotId, WidgetVariant,
};

pub const MANUAL_LOG_URI: &str = "calorize://manual_log";
pub const SCAN_AI_URI: &str = "calorize://scan_ai";
pub const SCAN_BARCODE_URI: &str = "calorize://scan_barcode";

/// Action the main app's entry surface is launched with
pub const VIEW_ACTION: &str = "view";

const DASHBOARD_BINDINGS: &[DeepLinkBinding] = &[DeepLinkBinding {
    slot_id: SlotId::LogFood,
    uri: MANUAL_LOG_URI,
}];

const SHORTCUTS_BINDINGS: &[DeepLinkBinding] = &[
    DeepLinkBinding {
        slot_id: SlotId::ScanFood,
        uri: SCAN_AI_URI,
    },
    DeepLinkBinding {
        slot_id: SlotId::ScanBarcode,
        uri: SCAN_BARCODE_URI,
    },
];

/// Tappable slots of a variant and the deep links they open
pub const fn bindings(variant: WidgetVariant) -> &'static [DeepLinkBinding] {
    match variant {
        WidgetVariant::Dashboard => DASHBOARD_BINDINGS,
        WidgetVariant::Shortcuts => SHORTCUTS_BINDINGS,
    }
}

/// Stable registration key for a deep link.
///
/// This is the 31-multiplier string hash over UTF-16 code units with
/// wrapping arithmetic, matching the request codes the host platform already
/// holds for these links, so existing registrations are updated in place.
pub fn dispatch_key(uri: &str) -> DispatchKey {
    DispatchKey(uri.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    }))
}

pub fn launch_intent(binding: &DeepLinkBinding) -> LaunchIntent {
    LaunchIntent {
        action: VIEW_ACTION.to_string(),
        uri: binding.uri.to_string(),
        mode: LaunchMode::SingleTop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_counts() {
        assert_eq!(bindings(WidgetVariant::Dashboard).len(), 1);
        assert_eq!(bindings(WidgetVariant::Shortcuts).len(), 2);
    }

    #[test]
    fn test_bindings_are_variant_pure() {
        let dashboard = bindings(WidgetVariant::Dashboard);
        let shortcuts = bindings(WidgetVariant::Shortcuts);

        for binding in dashboard {
            assert!(!shortcuts.iter().any(|b| b.uri == binding.uri));
            assert!(!shortcuts.iter().any(|b| b.slot_id == binding.slot_id));
        }
    }

    #[test]
    fn test_binding_uris() {
        assert_eq!(
            bindings(WidgetVariant::Dashboard)[0],
            DeepLinkBinding {
                slot_id: SlotId::LogFood,
                uri: "calorize://manual_log",
            }
        );

        let shortcuts: Vec<_> = bindings(WidgetVariant::Shortcuts)
            .iter()
            .map(|b| (b.slot_id, b.uri))
            .collect();
        assert_eq!(
            shortcuts,
            vec![
                (SlotId::ScanFood, "calorize://scan_ai"),
                (SlotId::ScanBarcode, "calorize://scan_barcode"),
            ]
        );
    }

    #[test]
    fn test_dispatch_key_known_values() {
        assert_eq!(dispatch_key(""), DispatchKey(0));
        assert_eq!(dispatch_key("a"), DispatchKey(97));
        assert_eq!(dispatch_key("ab"), DispatchKey(97 * 31 + 98));
        // long enough to overflow
        assert_eq!(dispatch_key("hello world"), DispatchKey(1_794_106_052));
        assert_eq!(dispatch_key(SCAN_AI_URI), DispatchKey(-1_689_583_085));
        assert_eq!(dispatch_key(SCAN_BARCODE_URI), DispatchKey(1_936_125_301));
    }

    #[test]
    fn test_dispatch_keys_are_distinct_and_stable() {
        let keys = [
            dispatch_key(MANUAL_LOG_URI),
            dispatch_key(SCAN_AI_URI),
            dispatch_key(SCAN_BARCODE_URI),
        ];

        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
        assert_ne!(keys[0], keys[2]);
        assert_eq!(keys[2], dispatch_key("calorize://scan_barcode"));
    }

    #[test]
    fn test_launch_intent_reuses_running_app() {
        let intent = launch_intent(&bindings(WidgetVariant::Shortcuts)[1]);

        assert_eq!(intent.action, "view");
        assert_eq!(intent.uri, "calorize://scan_barcode");
        assert_eq!(intent.mode, LaunchMode::SingleTop);
    }
}
