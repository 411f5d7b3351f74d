use anyhow::Context;
use tpoi_core::AppConfig;

/// Load `sources.yaml`, validate it, and print one line per source.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
pub(crate) fn run_sources(config: &AppConfig) -> anyhow::Result<()> {
    let sources = tpoi_core::load_sources(&config.sources_path)
        .with_context(|| format!("loading {}", config.sources_path.display()))?;

    if sources.sources.is_empty() {
        println!("no sources configured in {}", config.sources_path.display());
        return Ok(());
    }

    let header = format!("{:<22}{:<11}{:<14}BASE URL", "NAME", "KIND", "DEFAULT TYPE");
    println!("{header}");
    for source in &sources.sources {
        println!(
            "{:<22}{:<11}{:<14}{}",
            source.name,
            source.kind.to_string(),
            source.fallback_type().to_string(),
            source.base_url
        );
    }
    Ok(())
}
