//! `routeclaw retrieve`: Show the passages retrieved for a query.

use std::path::Path;

use crate::runtime::{self, CliResult};

pub async fn run(config_path: Option<&Path>, query: &str, k: Option<usize>) -> CliResult<()> {
    let config = runtime::load_config(config_path)?;
    let provider = runtime::build_provider(&config)?;
    let index = runtime::build_index(&config, provider).await?;

    let k = k.unwrap_or(config.knowledge.top_k).max(1);
    let hits = index.search(query, k).await?;

    if hits.is_empty() {
        println!("  (no passages indexed)");
        return Ok(());
    }

    for (rank, hit) in hits.iter().enumerate() {
        println!("  #{} [{:.3}] {}", rank + 1, hit.score, hit.chunk.text);
    }

    Ok(())
}
