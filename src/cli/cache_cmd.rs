//! `browsershelf cache` — manage the on-disk config cache.

use anyhow::Result;

use crate::cache::ConfigCache;
use crate::config::Settings;

pub fn run_clear(settings: &Settings) -> Result<()> {
    let cache = ConfigCache::new(settings.cache_dir.clone())?;
    let removed = cache.clear()?;
    println!(
        "Removed {removed} cache entr{} from {}",
        if removed == 1 { "y" } else { "ies" },
        cache.cache_dir().display()
    );
    Ok(())
}
