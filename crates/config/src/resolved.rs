// Effective settings (runtime truth)
//
// EffectiveSettings = GlobalSettings overlaid with one game's record.
// Merge rule: record value (while the record's master switch is on) > global.
// Profile fields and the readback hacks are always global; the validation
// layer is forced off in release builds.

use serde::Serialize;

use crate::drivers::{DriverLookup, SYSTEM_GPU_DRIVER};
use crate::game::GameRecord;
use crate::global::GlobalSettings;

/// The resolved settings handed to the native runtime.
///
/// All fields are concrete values because overriding has been resolved.
/// Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
    // System
    pub is_docked: bool,
    pub username: String,
    pub profile_picture: String,
    pub system_language: i32,
    pub system_region: i32,
    pub internet_enabled: bool,

    // Display
    pub force_triple_buffering: bool,
    pub disable_frame_throttling: bool,
    pub max_refresh_rate: bool,
    pub aspect_ratio: i32,
    pub orientation: i32,

    // GPU: `gpu_driver` is the selected package id, or empty for the
    // platform driver; `gpu_driver_library_name` is the loadable library
    // resolved from that package, empty when there is nothing to load.
    pub gpu_driver: String,
    pub gpu_driver_library_name: String,
    pub disable_shader_cache: bool,
    pub executor_slot_count_scale: u32,
    pub executor_flush_threshold: u32,
    pub use_direct_memory_import: bool,
    pub force_max_gpu_clocks: bool,

    // Hacks
    pub enable_fast_gpu_readback_hack: bool,
    pub enable_fast_readback_writes: bool,
    pub disable_subgroup_shuffle: bool,
    pub free_guest_texture_memory: bool,

    // Audio
    pub is_audio_output_disabled: bool,

    // Debug
    pub validation_layer: bool,
}

impl EffectiveSettings {
    /// Merge a global snapshot with a game's record.
    ///
    /// The record contributes only while its `custom_settings_enabled`
    /// switch is on; otherwise (or with no record at all) every field comes
    /// from `global`. Pure in its inputs apart from `drivers`, and never
    /// fails: an unknown driver selection resolves to an empty library name.
    pub fn resolve(
        global: &GlobalSettings,
        record: Option<&GameRecord>,
        release_build: bool,
        drivers: &dyn DriverLookup,
    ) -> Self {
        let overrides = record.filter(|r| r.custom_settings_enabled);

        let selected_driver = overrides.map_or(&global.gpu_driver, |r| &r.gpu_driver);
        let (gpu_driver, gpu_driver_library_name) = if selected_driver == SYSTEM_GPU_DRIVER {
            (String::new(), String::new())
        } else {
            (
                selected_driver.clone(),
                drivers.library_name(selected_driver).unwrap_or_default(),
            )
        };

        // Release builds never run the validation layer
        let validation_layer = !release_build
            && overrides.map_or(global.validation_layer, |r| r.validation_layer);

        Self {
            is_docked: overrides.map_or(global.is_docked, |r| r.is_docked),
            username: global.username.clone(),
            profile_picture: global.profile_picture.clone(),
            system_language: overrides.map_or(global.system_language, |r| r.system_language),
            system_region: overrides.map_or(global.system_region, |r| r.system_region),
            internet_enabled: overrides.map_or(global.internet_enabled, |r| r.internet_enabled),
            force_triple_buffering: overrides
                .map_or(global.force_triple_buffering, |r| r.force_triple_buffering),
            disable_frame_throttling: overrides
                .map_or(global.disable_frame_throttling, |r| r.disable_frame_throttling),
            max_refresh_rate: overrides.map_or(global.max_refresh_rate, |r| r.max_refresh_rate),
            aspect_ratio: overrides.map_or(global.aspect_ratio, |r| r.aspect_ratio),
            orientation: overrides.map_or(global.orientation, |r| r.orientation),
            gpu_driver,
            gpu_driver_library_name,
            disable_shader_cache: overrides
                .map_or(global.disable_shader_cache, |r| r.disable_shader_cache),
            executor_slot_count_scale: overrides
                .map_or(global.executor_slot_count_scale, |r| r.executor_slot_count_scale),
            executor_flush_threshold: overrides
                .map_or(global.executor_flush_threshold, |r| r.executor_flush_threshold),
            use_direct_memory_import: overrides
                .map_or(global.use_direct_memory_import, |r| r.use_direct_memory_import),
            force_max_gpu_clocks: overrides
                .map_or(global.force_max_gpu_clocks, |r| r.force_max_gpu_clocks),
            enable_fast_gpu_readback_hack: overrides.map_or(global.enable_fast_gpu_readback_hack, |r| {
                r.enable_fast_gpu_readback_hack
            }),
            enable_fast_readback_writes: global.enable_fast_readback_writes,
            disable_subgroup_shuffle: global.disable_subgroup_shuffle,
            free_guest_texture_memory: overrides
                .map_or(global.free_guest_texture_memory, |r| r.free_guest_texture_memory),
            is_audio_output_disabled: overrides
                .map_or(global.is_audio_output_disabled, |r| r.is_audio_output_disabled),
            validation_layer,
        }
    }
}
