//! Config command - print the effective configuration

use anyhow::Result;
use spoon_core::config::Config;
use spoon_feed::FeedConfig;

/// Run config command
pub fn run(loaded: &Config<FeedConfig>) -> Result<()> {
    match &loaded.path {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# No configuration file found, using defaults"),
    }
    println!("{}", loaded.schema.to_toml()?);
    Ok(())
}
