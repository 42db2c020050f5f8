// Per-game override records
// One record per (title id, version); stored together in games.json

use serde::{Deserialize, Serialize};

use crate::drivers::SYSTEM_GPU_DRIVER;

/// System language codes (persisted as integers)
pub const LANGUAGE_AMERICAN_ENGLISH: i32 = 1;

/// System region code meaning "follow the console's auto-detected region"
pub const REGION_AUTO: i32 = -1;

// Screen orientation codes mirror the platform's activity-orientation integers
pub const ORIENTATION_LANDSCAPE: i32 = 0;
pub const ORIENTATION_PORTRAIT: i32 = 1;
pub const ORIENTATION_SENSOR_LANDSCAPE: i32 = 6;
pub const ORIENTATION_SENSOR_PORTRAIT: i32 = 7;

/// Stored override data for one game.
///
/// Every tunable field carries a documented default so that documents
/// written by older versions (with fewer fields) still decode cleanly:
/// an absent key resolves to the default below, never to a zero value.
///
/// The override fields are only consulted by the resolver while
/// `custom_settings_enabled` is true, but stale values are kept verbatim
/// across save/load so re-enabling the switch restores the old choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameRecord {
    // Identity: (title_id, version) is the lookup key. Both may be empty
    // for titles with unknown metadata; that is still a valid key.
    pub title_id: String,
    pub version: String,
    /// Display name only, never part of the key
    pub title: String,

    // Usage metadata
    pub play_count: u32,
    pub is_favorite: bool,

    /// Master switch: when false, every override below is ignored at
    /// resolution time regardless of its stored value
    pub custom_settings_enabled: bool,

    // System
    pub is_docked: bool,
    pub system_language: i32,
    pub system_region: i32,
    pub internet_enabled: bool,

    // Display
    pub force_triple_buffering: bool,
    pub disable_frame_throttling: bool,
    pub max_refresh_rate: bool,
    pub aspect_ratio: i32,
    pub orientation: i32,

    // GPU
    pub gpu_driver: String,
    pub disable_shader_cache: bool,
    pub executor_slot_count_scale: u32,
    pub executor_flush_threshold: u32,
    pub use_direct_memory_import: bool,
    pub force_max_gpu_clocks: bool,

    // Hacks
    pub enable_fast_gpu_readback_hack: bool,
    pub free_guest_texture_memory: bool,

    // Audio
    pub is_audio_output_disabled: bool,

    // Debug
    pub validation_layer: bool,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self {
            title_id: String::new(),
            version: String::new(),
            title: String::new(),
            play_count: 0,
            is_favorite: false,
            custom_settings_enabled: false,
            is_docked: true,
            system_language: LANGUAGE_AMERICAN_ENGLISH,
            system_region: REGION_AUTO,
            internet_enabled: true,
            force_triple_buffering: true,
            disable_frame_throttling: false,
            max_refresh_rate: false,
            aspect_ratio: 0,
            orientation: ORIENTATION_SENSOR_LANDSCAPE,
            gpu_driver: SYSTEM_GPU_DRIVER.to_string(),
            disable_shader_cache: false,
            executor_slot_count_scale: 4,
            executor_flush_threshold: 256,
            use_direct_memory_import: false,
            force_max_gpu_clocks: false,
            enable_fast_gpu_readback_hack: false,
            free_guest_texture_memory: false,
            is_audio_output_disabled: false,
            validation_layer: false,
        }
    }
}

impl GameRecord {
    /// Build a record for a game that has no stored overrides yet.
    /// Identity comes from the caller, every tunable stays at its default.
    pub fn new(title_id: &str, version: &str, title: &str) -> Self {
        Self {
            title_id: title_id.to_string(),
            version: version.to_string(),
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// The compound lookup key
    pub fn key(&self) -> (&str, &str) {
        (&self.title_id, &self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_uses_documented_defaults() {
        let record = GameRecord::new("0100ABCD", "1.2.0", "Some Game");

        assert_eq!(record.title_id, "0100ABCD");
        assert_eq!(record.version, "1.2.0");
        assert_eq!(record.title, "Some Game");
        assert_eq!(record.play_count, 0);
        assert!(!record.is_favorite);
        assert!(!record.custom_settings_enabled);
        assert!(record.is_docked);
        assert_eq!(record.system_language, LANGUAGE_AMERICAN_ENGLISH);
        assert_eq!(record.system_region, REGION_AUTO);
        assert!(record.internet_enabled);
        assert!(record.force_triple_buffering);
        assert!(!record.disable_frame_throttling);
        assert_eq!(record.orientation, ORIENTATION_SENSOR_LANDSCAPE);
        assert_eq!(record.gpu_driver, SYSTEM_GPU_DRIVER);
        assert_eq!(record.executor_slot_count_scale, 4);
        assert_eq!(record.executor_flush_threshold, 256);
        assert!(!record.validation_layer);
    }

    #[test]
    fn roundtrip_preserves_every_field() {
        let mut record = GameRecord::new("0100ABCD", "1.2.0", "Some Game");
        record.play_count = 17;
        record.is_favorite = true;
        record.custom_settings_enabled = true;
        record.is_docked = false;
        record.system_language = 10;
        record.system_region = 2;
        record.internet_enabled = false;
        record.force_triple_buffering = false;
        record.disable_frame_throttling = true;
        record.max_refresh_rate = true;
        record.aspect_ratio = 2;
        record.orientation = ORIENTATION_PORTRAIT;
        record.gpu_driver = "turnip-24.1".to_string();
        record.disable_shader_cache = true;
        record.executor_slot_count_scale = 6;
        record.executor_flush_threshold = 1024;
        record.use_direct_memory_import = true;
        record.force_max_gpu_clocks = true;
        record.enable_fast_gpu_readback_hack = true;
        record.free_guest_texture_memory = true;
        record.is_audio_output_disabled = true;
        record.validation_layer = true;

        let json = serde_json::to_string_pretty(&record).unwrap();
        let decoded: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn roundtrip_at_defaults() {
        let record = GameRecord::new("0100ABCD", "", "Some Game");
        let json = serde_json::to_string(&record).unwrap();
        let decoded: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn missing_fields_decode_to_defaults() {
        // A document written before most fields existed
        let json = r#"{"titleId": "0100ABCD", "version": "1.0.0", "title": "Old Game"}"#;
        let record: GameRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.title_id, "0100ABCD");
        assert!(record.is_docked);
        assert_eq!(record.system_language, LANGUAGE_AMERICAN_ENGLISH);
        assert_eq!(record.system_region, REGION_AUTO);
        assert!(record.internet_enabled);
        assert!(record.force_triple_buffering);
        assert_eq!(record.orientation, ORIENTATION_SENSOR_LANDSCAPE);
        assert_eq!(record.gpu_driver, SYSTEM_GPU_DRIVER);
        assert_eq!(record.executor_slot_count_scale, 4);
        assert_eq!(record.executor_flush_threshold, 256);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{
            "titleId": "0100ABCD",
            "version": "1.0.0",
            "futureField": 42,
            "anotherUnknown": {"nested": true}
        }"#;
        let record: GameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title_id, "0100ABCD");
        assert_eq!(record.version, "1.0.0");
    }

    #[test]
    fn stale_overrides_survive_roundtrip_while_disabled() {
        // Values under a disabled master switch are kept, not discarded
        let mut record = GameRecord::new("0100ABCD", "1.0.0", "Some Game");
        record.custom_settings_enabled = false;
        record.gpu_driver = "turnip-24.1".to_string();
        record.executor_flush_threshold = 512;

        let json = serde_json::to_string(&record).unwrap();
        let decoded: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.gpu_driver, "turnip-24.1");
        assert_eq!(decoded.executor_flush_threshold, 512);
    }
}
