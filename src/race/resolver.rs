//! Betting round resolver.
//!
//! Lists the card with payout multipliers, validates raw player input into
//! a `Wager`, draws the winner and settles the payout.

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::card::RaceCard;
use crate::types::{DerbyError, EntrantId, EntrantListing, RoundResult, Wager};

/// Decimal places shown for multipliers and payouts.
pub const DISPLAY_DP: u32 = 2;

pub struct Resolver {
    card: RaceCard,
}

impl Resolver {
    pub fn new(card: RaceCard) -> Self {
        Self { card }
    }

    pub fn card(&self) -> &RaceCard {
        &self.card
    }

    /// Every entrant with its chance and display multiplier (`100 / chance`
    /// rounded to 2 dp), in card order.
    pub fn list_entrants(&self) -> Vec<EntrantListing> {
        let listings: Vec<EntrantListing> = self
            .card
            .entrants()
            .iter()
            .map(|e| EntrantListing {
                id: e.id,
                chance: e.chance,
                multiplier: e.multiplier().round_dp(DISPLAY_DP),
            })
            .collect();
        debug!(
            entrants = listings.len(),
            total_weight = self.card.total_weight(),
            "Race card listed"
        );
        listings
    }

    /// Parse and check a horse number.
    pub fn validate_entrant(&self, raw_id: &str) -> Result<EntrantId, DerbyError> {
        let trimmed = raw_id.trim();
        let id: i64 = trimmed.parse().map_err(|_| {
            warn!(input = trimmed, "Horse number is not an integer");
            DerbyError::InvalidInput {
                field: "horse number",
                value: trimmed.to_string(),
            }
        })?;

        match EntrantId::try_from(id) {
            Ok(id) if self.card.contains(id) => Ok(id),
            _ => {
                warn!(id, "Horse number not on the card");
                Err(DerbyError::InvalidEntrant(id))
            }
        }
    }

    /// Parse and check a stake amount. Plain decimals and scientific
    /// notation are accepted.
    pub fn validate_stake(&self, raw_stake: &str) -> Result<Decimal, DerbyError> {
        let trimmed = raw_stake.trim();
        let stake = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| {
                warn!(input = trimmed, "Stake is not a number");
                DerbyError::InvalidInput {
                    field: "stake",
                    value: trimmed.to_string(),
                }
            })?;

        // The largest multiplier is 100, so this bounds every payout.
        if stake <= Decimal::ZERO || stake.checked_mul(dec!(100)).is_none() {
            warn!(stake = %stake, "Stake rejected");
            return Err(DerbyError::InvalidStake(stake));
        }
        Ok(stake)
    }

    /// Build a `Wager` from the two raw fields. The horse number is checked
    /// first, so an unknown horse is reported even if the stake is also bad.
    pub fn validate_wager(&self, raw_id: &str, raw_stake: &str) -> Result<Wager, DerbyError> {
        let entrant_id = self.validate_entrant(raw_id)?;
        let stake = self.validate_stake(raw_stake)?;
        Ok(Wager { entrant_id, stake })
    }

    /// Pick the winning horse with probability `chance / total_weight`.
    pub fn draw_winner<R: Rng + ?Sized>(&self, rng: &mut R) -> EntrantId {
        let idx = self.card.weights().sample(rng);
        let winner = self.card.entrants()[idx].id;
        info!(
            winner,
            probability = %self
                .card
                .implied_probability(winner)
                .unwrap_or_default()
                .round_dp(4),
            "Winner drawn"
        );
        winner
    }

    /// Settle a wager against the drawn winner. A winning wager pays
    /// `stake × 100 / chance`; anything else pays zero.
    pub fn settle(&self, wager: Wager, winner: EntrantId) -> RoundResult {
        let payout = if wager.entrant_id == winner {
            self.card
                .get(winner)
                .map(|e| wager.stake * dec!(100) / Decimal::from(e.chance))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        info!(
            backed = wager.entrant_id,
            winner,
            stake = %wager.stake,
            payout = %payout.round_dp(DISPLAY_DP),
            "Wager settled"
        );
        RoundResult { winner, payout }
    }
}
