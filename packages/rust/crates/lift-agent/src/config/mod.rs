//! Settings file for literal-lift.
//!
//! Optional YAML loaded from `--config <path>` or `literal-lift.yaml` in the
//! working directory. Each value is a fallback below CLI flags and
//! environment variables; the binary does the merging.

mod settings;

pub use settings::{
    ConfigError, DEFAULT_SETTINGS_FILE, LiftSettings, RemoteSettings, RunSettings, ScanSettings,
    load_settings,
};
