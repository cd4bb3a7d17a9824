//! `routeclaw doctor`: Diagnose system health.

use std::path::Path;

use crate::runtime::{self, CliResult};

pub async fn run(config_path: Option<&Path>) -> CliResult<()> {
    println!("🩺 RouteClaw Doctor — System Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    let path = runtime::config_path(config_path);
    if path.exists() {
        println!("  ✅ Config file found: {}", path.display());
    } else {
        println!("  ⚠️  No config file at {}, using defaults (run `routeclaw onboard`)", path.display());
    }

    let config = match runtime::load_config(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid (provider: {}, model: {})", config.provider, config.model);
            config
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("\n  ⚠️  Cannot continue without a valid config.");
            return Ok(());
        }
    };

    let provider = match runtime::build_provider(&config) {
        Ok(provider) => {
            println!("  ✅ Provider client created");
            provider
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("\n  ⚠️  Cannot continue without a provider.");
            return Ok(());
        }
    };

    match provider.health_check().await {
        Ok(true) => println!("  ✅ Provider reachable"),
        Ok(false) => {
            println!("  ⚠️  Provider answered but reported unhealthy");
            issues += 1;
        }
        Err(e) => {
            println!("  ❌ Provider unreachable: {e}");
            issues += 1;
        }
    }

    match runtime::build_index(&config, provider).await {
        Ok(index) if index.is_empty() => {
            println!("  ⚠️  Knowledge index is empty; retrieval answers will have no context");
            issues += 1;
        }
        Ok(index) => println!(
            "  ✅ Knowledge index built: {} chunks ({} embeddings)",
            index.len(),
            config.knowledge.embedding_provider
        ),
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    let tools = routeclaw_tools::default_registry(&config);
    println!("  ✅ Tools registered: {}", tools.names().join(", "));

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
