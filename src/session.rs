//! Console session — one betting round over line-based I/O.
//!
//! Prints the card, prompts for a horse number and then a stake, runs the
//! draw and reports the outcome. Generic over the reader and writer so the
//! whole dialogue can be driven from memory.

use anyhow::{Context, Result};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{info, warn};
use uuid::Uuid;

use crate::race::resolver::DISPLAY_DP;
use crate::race::Resolver;
use crate::types::{DerbyError, RoundResult};

/// How a round ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    /// Wager accepted, winner drawn and paid out (possibly zero).
    Settled(RoundResult),
    /// Input failed validation; no draw happened.
    Rejected(DerbyError),
}

/// Presentation settings for the dialogue.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub race_name: String,
    pub currency: String,
}

pub struct Session<'a> {
    resolver: &'a Resolver,
    config: SessionConfig,
}

impl<'a> Session<'a> {
    pub fn new(resolver: &'a Resolver, config: SessionConfig) -> Self {
        Self { resolver, config }
    }

    /// Run a single round to completion.
    ///
    /// Validation failures are printed and returned as
    /// `RoundOutcome::Rejected`; only I/O failures are errors.
    pub fn play_round<I, O, R>(&self, input: &mut I, output: &mut O, rng: &mut R) -> Result<RoundOutcome>
    where
        I: BufRead,
        O: Write,
        R: Rng + ?Sized,
    {
        let round_id = Uuid::new_v4();
        info!(%round_id, race = %self.config.race_name, "Round opened");

        self.print_card(output)?;

        let outcome = match self.take_wager_and_race(input, output, rng)? {
            Ok(result) => {
                self.print_result(output, &result)?;
                RoundOutcome::Settled(result)
            }
            Err(e) => {
                warn!(%round_id, error = %e, "Round aborted");
                writeln!(output, "{e}").context("Failed to write to output")?;
                RoundOutcome::Rejected(e)
            }
        };
        output.flush().context("Failed to flush output")?;

        info!(%round_id, ?outcome, "Round closed");
        Ok(outcome)
    }

    fn print_card<O: Write>(&self, output: &mut O) -> Result<()> {
        writeln!(output, "Welcome to the {}!", self.config.race_name)?;
        writeln!(output, "Available horses and their chances of winning: ")?;
        for listing in self.resolver.list_entrants() {
            writeln!(output, "{listing}")?;
        }
        Ok(())
    }

    /// Inner result is the round's validation outcome; the outer one is I/O.
    fn take_wager_and_race<I, O, R>(
        &self,
        input: &mut I,
        output: &mut O,
        rng: &mut R,
    ) -> Result<Result<RoundResult, DerbyError>>
    where
        I: BufRead,
        O: Write,
        R: Rng + ?Sized,
    {
        let raw_id = prompt(
            input,
            output,
            "\nEnter the number of the horse you want to bet on: ",
        )?;
        // An unknown horse ends the round before the stake is asked for.
        if let Err(e) = self.resolver.validate_entrant(&raw_id) {
            return Ok(Err(e));
        }

        let prompt_stake = format!("Enter your stake: {}", self.config.currency);
        let raw_stake = prompt(input, output, &prompt_stake)?;
        let wager = match self.resolver.validate_wager(&raw_id, &raw_stake) {
            Ok(w) => w,
            Err(e) => return Ok(Err(e)),
        };

        let winner = self.resolver.draw_winner(rng);
        Ok(Ok(self.resolver.settle(wager, winner)))
    }

    fn print_result<O: Write>(&self, output: &mut O, result: &RoundResult) -> Result<()> {
        writeln!(output, "\nThe race is over! The winning horse is: {}", result.winner)?;
        if result.is_win() {
            writeln!(
                output,
                "Congratulations! You won the bet! Your payout is: {}{:.2}",
                self.config.currency,
                result.payout.round_dp(DISPLAY_DP)
            )?;
        } else {
            writeln!(output, "Sorry, you lost. Better luck next time!")?;
        }
        Ok(())
    }
}

/// Write a prompt, flush, and read one line. End of input reads as an
/// empty line, which then fails numeric validation.
fn prompt<I: BufRead, O: Write>(input: &mut I, output: &mut O, text: &str) -> Result<String> {
    write!(output, "{text}").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line)
}
