//! Configuration management

mod calibration;
mod settings;

pub use calibration::{load_calibration, CALIBRATION_FILE};
pub use settings::{config_dir, AppConfig, CONFIG_VERSION};
