//! Shared types for the DERBY betting round.
//!
//! These types form the data model used across the race card, the
//! resolver and the console session.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// Identifier of a horse on the race card. Always positive.
pub type EntrantId = u32;

// ---------------------------------------------------------------------------
// Entrant
// ---------------------------------------------------------------------------

/// A horse in the race with its configured win chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entrant {
    pub id: EntrantId,
    /// Win chance in whole percent (1–100). Used as a relative weight; the
    /// field does not have to sum to 100.
    pub chance: u32,
}

impl Entrant {
    pub fn new(id: EntrantId, chance: u32) -> Self {
        Self { id, chance }
    }

    /// Exact payout multiplier: `100 / chance`.
    pub fn multiplier(&self) -> Decimal {
        dec!(100) / Decimal::from(self.chance)
    }
}

/// One row of the race card as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrantListing {
    pub id: EntrantId,
    pub chance: u32,
    /// `100 / chance`, rounded to 2 dp.
    pub multiplier: Decimal,
}

impl fmt::Display for EntrantListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Horse {}: {}% chance - Payout : x{:.2}",
            self.id, self.chance, self.multiplier
        )
    }
}

// ---------------------------------------------------------------------------
// Wager & result
// ---------------------------------------------------------------------------

/// A validated bet. Only the resolver constructs these, so a `Wager` always
/// names a horse on the card and carries a positive stake. Settling a round
/// consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct Wager {
    pub(crate) entrant_id: EntrantId,
    pub(crate) stake: Decimal,
}

impl Wager {
    pub fn entrant_id(&self) -> EntrantId {
        self.entrant_id
    }

    pub fn stake(&self) -> Decimal {
        self.stake
    }
}

/// Outcome of a settled round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub winner: EntrantId,
    /// Zero when the wager lost.
    pub payout: Decimal,
}

impl RoundResult {
    pub fn is_win(&self) -> bool {
        self.payout > Decimal::ZERO
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for DERBY.
///
/// The `Display` strings are shown to the player verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DerbyError {
    #[error("Invalid horse number {0}! Please restart the game.")]
    InvalidEntrant(i64),

    #[error("Invalid stake {0}! The stake must be a positive amount.")]
    InvalidStake(Decimal),

    #[error("Invalid input for {field}: {value:?}. Please enter a valid number.")]
    InvalidInput { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DerbyError {
    /// Whether this error came from player input (as opposed to setup).
    pub fn is_validation(&self) -> bool {
        !matches!(self, DerbyError::Config(_))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
