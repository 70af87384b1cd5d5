//! `handoff templates` - inspect the merged template set.

use anyhow::Result;

use handoff::config::Settings;
use handoff::templates::{self, TemplateSource};

pub fn list_command() -> Result<()> {
    let settings = Settings::load()?;
    let loaded = templates::load_templates(
        &Settings::default_templates_dir(),
        settings.workspace_templates_dir().as_deref(),
    );

    for template in &loaded {
        let origin = match template.source {
            TemplateSource::Default => "default",
            TemplateSource::User => "workspace",
        };
        println!(
            "{:<30} {:<10} {:?} ({})",
            template.label,
            origin,
            template.kind,
            template.filename
        );
    }
    println!("{} templates", loaded.len());
    Ok(())
}
