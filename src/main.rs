//! DERBY — weighted-odds horse race betting round
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the race card and plays a single round on stdin/stdout.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use derby::config::{self, AppConfig};
use derby::race::Resolver;
use derby::session::{RoundOutcome, Session, SessionConfig};

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let path = AppConfig::resolve_path();
    let (cfg, from_disk) = AppConfig::load_or_default(&path)?;

    init_logging(&cfg.logging);
    info!(
        config = if from_disk { path.as_str() } else { "built-in" },
        race = %cfg.race.name,
        entrants = cfg.race.entrants.len(),
        seeded = cfg.race.seed.is_some(),
        "DERBY starting up"
    );

    let card = cfg.race_card().context("Invalid race card")?;
    let resolver = Resolver::new(card);

    let mut rng = match cfg.race.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let session = Session::new(
        &resolver,
        SessionConfig {
            race_name: cfg.race.name.clone(),
            currency: cfg.race.currency.clone(),
        },
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = session.play_round(&mut stdin.lock(), &mut stdout.lock(), &mut rng)?;

    // Rejected rounds were already reported to the player.
    match outcome {
        RoundOutcome::Settled(result) => {
            debug!(winner = result.winner, won = result.is_win(), "Round settled")
        }
        RoundOutcome::Rejected(e) => debug!(error = %e, "Round rejected"),
    }

    Ok(())
}

/// Initialise the `tracing` subscriber on stderr.
fn init_logging(cfg: &config::LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.filter));

    let json_logging = cfg.json || std::env::var("DERBY_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
