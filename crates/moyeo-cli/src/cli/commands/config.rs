//! Config management commands.

use anyhow::Result;

use moyeo_client::config::{Config, paths};

pub fn init() -> Result<()> {
    let path = paths::config_path();
    Config::init(&path)?;
    println!("created {}", path.display());
    Ok(())
}

pub fn set_url(url: &str) -> Result<()> {
    let path = paths::config_path();
    Config::save_base_url_to(&path, url.trim_end_matches('/'))?;
    println!("base_url set to {url}");
    Ok(())
}
