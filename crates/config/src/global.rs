// Global emulator settings
// Loaded from ~/.config/polaris/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::drivers::SYSTEM_GPU_DRIVER;
use crate::game::{
    LANGUAGE_AMERICAN_ENGLISH, ORIENTATION_SENSOR_LANDSCAPE, REGION_AUTO,
};

/// Application-wide default settings.
///
/// The resolver takes this as an immutable snapshot: build (or load) one
/// per resolution instead of reading a live preference registry field by
/// field. Per-game records override most of these; the profile fields and
/// the two readback hacks are global-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    // Profile (never overridable per game)
    #[serde(rename = "system.username")]
    pub username: String,

    #[serde(rename = "system.profilePicture")]
    pub profile_picture: String,

    // System
    #[serde(rename = "system.docked")]
    pub is_docked: bool,

    #[serde(rename = "system.language")]
    pub system_language: i32,

    #[serde(rename = "system.region")]
    pub system_region: i32,

    #[serde(rename = "system.internetEnabled")]
    pub internet_enabled: bool,

    // Display
    #[serde(rename = "display.forceTripleBuffering")]
    pub force_triple_buffering: bool,

    #[serde(rename = "display.disableFrameThrottling")]
    pub disable_frame_throttling: bool,

    #[serde(rename = "display.maxRefreshRate")]
    pub max_refresh_rate: bool,

    #[serde(rename = "display.aspectRatio")]
    pub aspect_ratio: i32,

    #[serde(rename = "display.orientation")]
    pub orientation: i32,

    // GPU
    #[serde(rename = "gpu.driver")]
    pub gpu_driver: String,

    #[serde(rename = "gpu.disableShaderCache")]
    pub disable_shader_cache: bool,

    #[serde(rename = "gpu.executorSlotCountScale")]
    pub executor_slot_count_scale: u32,

    #[serde(rename = "gpu.executorFlushThreshold")]
    pub executor_flush_threshold: u32,

    #[serde(rename = "gpu.useDirectMemoryImport")]
    pub use_direct_memory_import: bool,

    #[serde(rename = "gpu.forceMaxGpuClocks")]
    pub force_max_gpu_clocks: bool,

    // Hacks
    #[serde(rename = "hacks.enableFastGpuReadback")]
    pub enable_fast_gpu_readback_hack: bool,

    #[serde(rename = "hacks.enableFastReadbackWrites")]
    pub enable_fast_readback_writes: bool,

    #[serde(rename = "hacks.disableSubgroupShuffle")]
    pub disable_subgroup_shuffle: bool,

    #[serde(rename = "hacks.freeGuestTextureMemory")]
    pub free_guest_texture_memory: bool,

    // Audio
    #[serde(rename = "audio.outputDisabled")]
    pub is_audio_output_disabled: bool,

    // Debug
    #[serde(rename = "debug.validationLayer")]
    pub validation_layer: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            // Profile
            username: "Player".to_string(),
            profile_picture: String::new(),
            // System
            is_docked: true,
            system_language: LANGUAGE_AMERICAN_ENGLISH,
            system_region: REGION_AUTO,
            internet_enabled: true,
            // Display
            force_triple_buffering: true,
            disable_frame_throttling: false,
            max_refresh_rate: false,
            aspect_ratio: 0,
            orientation: ORIENTATION_SENSOR_LANDSCAPE,
            // GPU
            gpu_driver: SYSTEM_GPU_DRIVER.to_string(),
            disable_shader_cache: false,
            executor_slot_count_scale: 4,
            executor_flush_threshold: 256,
            use_direct_memory_import: false,
            force_max_gpu_clocks: false,
            // Hacks
            enable_fast_gpu_readback_hack: false,
            enable_fast_readback_writes: false,
            disable_subgroup_shuffle: false,
            free_guest_texture_memory: false,
            // Audio
            is_audio_output_disabled: false,
            // Debug
            validation_layer: false,
        }
    }
}

impl GlobalSettings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("polaris");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file();
            return settings;
        }

        match fs::read_to_string(&path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str(&cleaned) {
                    Ok(settings) => settings,
                    Err(e) => {
                        eprintln!("Error parsing settings.json: {}", e);
                        eprintln!("Using default settings");
                        Self::default()
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())?;

        fs::write(&path, json).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self) {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Profile
    "system.username": "Player",
    "system.profilePicture": "",

    // System ("system.region": -1 follows the console's region)
    "system.docked": true,
    "system.language": 1,
    "system.region": -1,
    "system.internetEnabled": true,

    // Display
    "display.forceTripleBuffering": true,
    "display.disableFrameThrottling": false,
    "display.maxRefreshRate": false,
    "display.aspectRatio": 0,
    "display.orientation": 6,

    // GPU ("gpu.driver": "system" uses the platform driver)
    "gpu.driver": "system",
    "gpu.disableShaderCache": false,
    "gpu.executorSlotCountScale": 4,
    "gpu.executorFlushThreshold": 256,
    "gpu.useDirectMemoryImport": false,
    "gpu.forceMaxGpuClocks": false,

    // Hacks
    "hacks.enableFastGpuReadback": false,
    "hacks.enableFastReadbackWrites": false,
    "hacks.disableSubgroupShuffle": false,
    "hacks.freeGuestTextureMemory": false,

    // Audio
    "audio.outputDisabled": false,

    // Debug (ignored in release builds)
    "debug.validationLayer": false
}
"#;

        if let Err(e) = fs::write(&path, default_config) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_record_defaults() {
        let settings = GlobalSettings::default();
        assert!(settings.is_docked);
        assert_eq!(settings.system_language, LANGUAGE_AMERICAN_ENGLISH);
        assert_eq!(settings.system_region, REGION_AUTO);
        assert_eq!(settings.gpu_driver, SYSTEM_GPU_DRIVER);
        assert_eq!(settings.executor_slot_count_scale, 4);
        assert_eq!(settings.executor_flush_threshold, 256);
        assert!(!settings.validation_layer);
    }

    #[test]
    fn roundtrip_uses_dotted_keys() {
        let mut settings = GlobalSettings::default();
        settings.username = "Riley".to_string();
        settings.gpu_driver = "turnip-24.1".to_string();

        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("\"system.username\""));
        assert!(json.contains("\"gpu.driver\""));

        let decoded: GlobalSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, settings);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let json = r#"{"system.username": "Riley"}"#;
        let settings: GlobalSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.username, "Riley");
        assert!(settings.is_docked);
        assert_eq!(settings.gpu_driver, SYSTEM_GPU_DRIVER);
    }

    #[test]
    fn commented_default_file_parses_to_defaults() {
        // The first-run file carries // comments; the loader strips them
        let contents = r#"{
    // Profile
    "system.username": "Player",
    // GPU ("gpu.driver": "system" uses the platform driver)
    "gpu.driver": "system"
}"#;
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        let settings: GlobalSettings = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(settings, GlobalSettings::default());
    }
}
