//! `routeclaw onboard`: First-time setup.

use std::path::Path;

use routeclaw_config::AppConfig;

use crate::runtime::{self, CliResult};

pub async fn run(config_path: Option<&Path>) -> CliResult<()> {
    let config_path = runtime::config_path(config_path);

    println!("🦀 RouteClaw — First-Time Setup");
    println!("===============================\n");

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    write_default_config(&config_path)?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Pick a provider and model in {}", config_path.display());
    println!("   2. For hosted providers, set ROUTECLAW_API_KEY (a .env file works too)");
    println!("   3. Add your own passages under [knowledge] documents / paths");
    println!("   4. Run: routeclaw agent\n");

    Ok(())
}

/// Write the default config to `path`, creating parent directories.
fn write_default_config(path: &Path) -> CliResult<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, AppConfig::default_toml())?;
    Ok(())
}
