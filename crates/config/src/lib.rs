// Configuration loading and resolution
//
// - `GlobalSettings`: application-wide defaults (settings.json)
// - `GameRecord` + `GameStore`: per-game overrides (games.json)
// - `EffectiveSettings`: the merged view handed to the native runtime

pub mod drivers;
pub mod game;
pub mod global;
pub mod resolved;
pub mod store;

pub use drivers::{DriverLookup, SystemDriverOnly, SYSTEM_GPU_DRIVER};
pub use game::GameRecord;
pub use global::GlobalSettings;
pub use resolved::EffectiveSettings;
pub use store::{GameStore, StoreError};
