//! `pdfdigest config` commands - view and manage configuration

use anyhow::Result;
use pdfdigest_core::Config;

/// Show current configuration
pub fn show(config: Config) -> Result<()> {
    println!("Completion");
    println!("  Base URL:   {}", config.completion.base_url);
    println!("  Model:      {}", config.completion.model);
    println!(
        "  API key:    {}",
        if config.completion.api_key.is_some() {
            "configured"
        } else {
            "(not set - mock mode)"
        }
    );
    println!("  Timeout:    {}s", config.completion.timeout_secs);
    println!("Server");
    println!("  Host:       {}", config.server.host);
    println!("  Port:       {}", config.server.port);
    println!("Storage");
    println!("  Uploads:    {}", config.upload_dir().display());
    println!("Logging");
    println!("  Level:      {}", config.logging.level);

    if let Some(path) = Config::default_config_path() {
        println!(
            "\nConfig file: {} {}",
            path.display(),
            if path.exists() { "" } else { "(not created)" }
        );
    }

    Ok(())
}

/// Initialize default configuration
pub fn init(force: bool) -> Result<()> {
    let Some(path) = Config::default_config_path() else {
        anyhow::bail!("Could not determine config path");
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let config = Config::default();
    config.save()?;
    println!("Wrote default config to {}", path.display());

    Ok(())
}
