mod logging;

use anyhow::{Context, Result};
use code_layout::config::{load_config, Config};
use code_layout::preview;
use std::fs;
use std::io::{self, Read, Write};

fn main() -> Result<()> {
    // Load configuration
    let config = load_config()?;
    logging::init();

    if config.debug_config {
        println!("Configuration:");
        println!("{:#?}", config);
        return Ok(());
    }

    let text = read_input(&config)?;
    let engine = config.engine();
    let rows = engine.layout(&text, config.width, config.align, config.wrap)?;
    tracing::info!(
        rows = rows.len(),
        width = config.width,
        wrap = %config.wrap,
        "layout computed"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if config.show_segments {
        for (y, row) in rows.iter().enumerate() {
            writeln!(out, "{y:>4}: {row}")?;
        }
    } else {
        for line in preview::render(&text, &rows, config.width) {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;

    Ok(())
}

fn read_input(config: &Config) -> Result<String> {
    match config.filename {
        Some(ref path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
