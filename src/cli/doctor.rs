//! Environment readiness check.

use anyhow::Result;

use crate::config::Settings;
use crate::resolver::find_npx;

/// Check resolver availability, config URL, and cache directory.
pub async fn run(settings: &Settings) -> Result<()> {
    println!("Browsershelf Doctor");
    println!("===================");
    println!();

    let npx = find_npx();
    match &npx {
        Some(path) => println!("[OK] npx found: {}", path.display()),
        None => println!("[!!] npx NOT found. Install Node.js so `npx browserslist` can run."),
    }

    match settings.validate() {
        Ok(()) => println!("[OK] Config URL: {}", settings.config_url),
        Err(e) => println!("[!!] Config URL invalid: {e}"),
    }

    let cache_ok = std::fs::create_dir_all(&settings.cache_dir).is_ok();
    if cache_ok {
        println!("[OK] Cache dir writable: {}", settings.cache_dir.display());
    } else {
        println!("[!!] Cache dir not writable: {}", settings.cache_dir.display());
    }

    println!();
    if npx.is_some() && cache_ok && settings.validate().is_ok() {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}
