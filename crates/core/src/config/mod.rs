//! Configuration file discovery and loading
//!
//! Each crate defines its own schema; this module finds and parses the file.

mod loader;

pub use loader::{config_candidates, find_config_file, load_config_file, Config, CONFIG_FILE_NAME};
