// File: ./src/logging.rs
// Terminal logger bootstrap for embedding hosts.
use anyhow::Result;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Install a terminal logger at the given level. Call once at host
/// startup; library code only ever logs through the `log` facade.
pub fn init(level: LevelFilter) -> Result<()> {
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;
    Ok(())
}
