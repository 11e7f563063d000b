pub mod config;
pub mod params;
pub mod presets;
pub mod registry;
pub mod volume;

pub use config::PresetFileConfig;
pub use params::{LoadedBarParams, ParamValue, Preset, StartBarParams, PARAM_KEYS};
pub use registry::{BarPattern, PresetRegistry};
