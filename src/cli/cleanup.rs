//! `handoff cleanup` - prune the temp image store.

use anyhow::Result;

use handoff::config::Settings;
use handoff::tempfiles::{self, format_size};

pub fn cleanup_command(all: bool, older_than: Option<i64>) -> Result<()> {
    let settings = Settings::load()?;
    let dir = tempfiles::temp_dir()?;

    let images = tempfiles::list_images(&dir);
    if images.is_empty() {
        println!("no temp images to clean up");
        return Ok(());
    }

    let total: u64 = images.iter().map(|i| i.size).sum();
    println!(
        "{} images, {} in {}",
        images.len(),
        format_size(total),
        dir.display()
    );

    let deleted = if all {
        tempfiles::cleanup_all(&dir)
    } else {
        let days = older_than.unwrap_or(settings.temp_max_age_days);
        tempfiles::cleanup_older_than(&dir, days)
    };

    println!("deleted {deleted} images");
    Ok(())
}
