use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

const WORKSPACE_CRATES: [&str; 4] = ["alalfy_cli", "alalfy_client", "alalfy_core", "alalfy_render"];

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Installs the global subscriber on stderr, keeping stdout for command output.
///
/// `RUST_LOG` is used as-is when set. Otherwise dependencies log at `warn`
/// and the workspace crates at `level`, one step louder per `-v`.
pub fn init_logging(level: &str, verbose: u8) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(level, verbose))
            .context("invalid LOG_LEVEL")?,
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}

fn default_directives(level: &str, verbose: u8) -> String {
    let level = raised(level, verbose);
    let mut directives = vec!["warn".to_string()];
    directives.extend(WORKSPACE_CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

/// Unknown level names count as `info`.
fn raised(level: &str, steps: u8) -> &'static str {
    let start = LEVELS
        .iter()
        .position(|known| known.eq_ignore_ascii_case(level.trim()))
        .unwrap_or(2);
    LEVELS[(start + usize::from(steps)).min(LEVELS.len() - 1)]
}
