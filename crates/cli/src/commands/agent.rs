//! `routeclaw agent`: Interactive or single-message chat mode.

use std::io::Write;
use std::path::Path;

use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::runtime::{CliResult, Runtime};

/// Inputs that end an interactive session.
const EXIT_WORDS: &[&str] = &["exit", "quit", "salir"];

fn is_exit(line: &str) -> bool {
    EXIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

pub async fn run(config_path: Option<&Path>, message: Option<String>) -> CliResult<()> {
    let runtime = Runtime::start(config_path).await?;

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Pensando...");
        let response = runtime.agent.process_query(&msg).await;
        eprint!("\r             \r");
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        RouteClaw Agent — Interactive Mode     ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", runtime.config.provider);
    println!("  Model:     {}", runtime.config.model);
    println!("  Tools:     {}", runtime.tools.names().join(", "));
    println!("  Knowledge: {} chunks indexed", runtime.index.len());
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'salir' or 'exit' to quit.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        print!("  Tú > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit(line) {
            break;
        }

        eprint!("  ...");
        let response = runtime.agent.process_query(line).await;
        eprint!("\r     \r");
        println!();
        for text in response.lines() {
            println!("  {text}");
        }
        println!();
    }

    println!();
    println!("  ¡Hasta luego! 👋");
    println!();

    Ok(())
}
