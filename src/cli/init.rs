//! `handoff init` - write default config and deploy bundled templates.

use anyhow::Result;

use handoff::config::Settings;
use handoff::templates;

pub fn init_command(force: bool) -> Result<()> {
    let config_path = Settings::config_path();

    if force || !config_path.exists() {
        Settings::default().save_to_file(&config_path)?;
        println!("wrote {}", config_path.display());
    } else {
        println!("config exists at {} (use --force to reset)", config_path.display());
    }

    let templates_dir = Settings::default_templates_dir();
    let written = templates::write_default_templates(&templates_dir)?;
    println!(
        "deployed {written} templates to {}",
        templates_dir.display()
    );

    Ok(())
}
