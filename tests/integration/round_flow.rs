//! End-to-end betting rounds through the public API.
//!
//! Builds the card from configuration the way the binary does and plays
//! full rounds with in-memory stdin/stdout and a seeded RNG.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Cursor;

use derby::config::AppConfig;
use derby::race::Resolver;
use derby::session::{RoundOutcome, Session, SessionConfig};
use derby::types::DerbyError;

fn play(cfg: &AppConfig, stdin: &str, seed: u64) -> (RoundOutcome, String) {
    let resolver = Resolver::new(cfg.race_card().unwrap());
    let session = Session::new(
        &resolver,
        SessionConfig {
            race_name: cfg.race.name.clone(),
            currency: cfg.race.currency.clone(),
        },
    );
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut output = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let outcome = session.play_round(&mut input, &mut output, &mut rng).unwrap();
    (outcome, String::from_utf8(output).unwrap())
}

#[test]
fn test_seeded_rounds_are_reproducible() {
    let cfg = AppConfig::default();
    let first = play(&cfg, "2\n10\n", 99);
    let second = play(&cfg, "2\n10\n", 99);
    assert_eq!(first, second);
}

#[test]
fn test_payout_only_when_backed_horse_wins() {
    let cfg = AppConfig::default();
    for seed in 0..200 {
        let (outcome, out) = play(&cfg, "3\n4\n", seed);
        let RoundOutcome::Settled(result) = outcome else {
            panic!("seed {seed}: round should settle");
        };
        if result.winner == 3 {
            assert_eq!(result.payout, dec!(20));
            assert!(out.contains("Your payout is: €20.00"));
        } else {
            assert_eq!(result.payout, Decimal::ZERO);
            assert!(out.contains("Sorry, you lost."));
        }
    }
}

#[test]
fn test_every_seed_draws_a_horse_on_the_card() {
    let cfg = AppConfig::default();
    let card = cfg.race_card().unwrap();
    for seed in 0..200 {
        if let (RoundOutcome::Settled(result), _) = play(&cfg, "1\n1\n", seed) {
            assert!(card.contains(result.winner));
        }
    }
}

#[test]
fn test_single_horse_field_always_pays() {
    let mut cfg = AppConfig::default();
    cfg.race.name = "Walkover".into();
    cfg.race.currency = "$".into();
    cfg.race.entrants.truncate(1);

    let (outcome, out) = play(&cfg, "1\n9\n", 5);
    assert!(out.starts_with("Welcome to the Walkover!"));
    assert_eq!(
        outcome,
        RoundOutcome::Settled(derby::types::RoundResult {
            winner: 1,
            payout: dec!(20),
        })
    );
    assert!(out.contains("Your payout is: $20.00"));
}

#[test]
fn test_invalid_inputs_are_reported_not_fatal() {
    let cfg = AppConfig::default();

    let (outcome, out) = play(&cfg, "horse\n", 1);
    assert!(matches!(outcome, RoundOutcome::Rejected(DerbyError::InvalidInput { .. })));
    assert!(out.contains("Please enter a valid number."));

    let (outcome, _) = play(&cfg, "12\n", 1);
    assert_eq!(outcome, RoundOutcome::Rejected(DerbyError::InvalidEntrant(12)));

    let (outcome, out) = play(&cfg, "1\n0\n", 1);
    assert_eq!(outcome, RoundOutcome::Rejected(DerbyError::InvalidStake(Decimal::ZERO)));
    assert!(out.contains("The stake must be a positive amount."));
}
