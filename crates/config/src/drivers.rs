// GPU driver selection seam
// Package discovery and validation live with the driver installer, not here

/// Reserved driver selection meaning "use the platform's default driver"
pub const SYSTEM_GPU_DRIVER: &str = "system";

/// Resolves a user-selected driver package id to a loadable library name.
///
/// The resolver consults this only when the selection differs from
/// [`SYSTEM_GPU_DRIVER`]. A miss (package no longer installed) resolves to
/// an empty library name rather than an error.
pub trait DriverLookup {
    fn library_name(&self, driver_id: &str) -> Option<String>;
}

/// Lookup for installations without any user-supplied driver packages
pub struct SystemDriverOnly;

impl DriverLookup for SystemDriverOnly {
    fn library_name(&self, _driver_id: &str) -> Option<String> {
        None
    }
}
