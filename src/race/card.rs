//! Race card — the immutable, validated entrant table.

use rust_decimal::Decimal;

use super::draw::CumulativeWeights;
use crate::types::{DerbyError, Entrant, EntrantId};

/// Highest allowed win chance, in percent.
pub const MAX_CHANCE: u32 = 100;

/// The field of horses for a round, fixed at startup.
///
/// Entrants keep their configured order, which is the listing order and
/// the order of the cumulative weight table.
#[derive(Debug, Clone)]
pub struct RaceCard {
    entrants: Vec<Entrant>,
    weights: CumulativeWeights,
}

impl RaceCard {
    /// Validate and freeze an entrant list.
    ///
    /// Rejects an empty field, id 0, duplicate ids, and chances outside
    /// `1..=100`. Chances are not required to sum to 100.
    pub fn new(entrants: Vec<Entrant>) -> Result<Self, DerbyError> {
        if entrants.is_empty() {
            return Err(DerbyError::Config("race card has no entrants".into()));
        }
        for (i, entrant) in entrants.iter().enumerate() {
            if entrant.id == 0 {
                return Err(DerbyError::Config("entrant id must be positive".into()));
            }
            if !(1..=MAX_CHANCE).contains(&entrant.chance) {
                return Err(DerbyError::Config(format!(
                    "entrant {} has chance {}%, expected 1-{MAX_CHANCE}",
                    entrant.id, entrant.chance
                )));
            }
            if entrants[..i].iter().any(|e| e.id == entrant.id) {
                return Err(DerbyError::Config(format!(
                    "duplicate entrant id {}",
                    entrant.id
                )));
            }
        }

        let weights = CumulativeWeights::new(entrants.iter().map(|e| e.chance))
            .ok_or_else(|| DerbyError::Config("race card has no drawable weight".into()))?;

        Ok(Self { entrants, weights })
    }

    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn get(&self, id: EntrantId) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntrantId) -> bool {
        self.get(id).is_some()
    }

    pub fn weights(&self) -> &CumulativeWeights {
        &self.weights
    }

    /// Sum of all configured chances.
    pub fn total_weight(&self) -> u64 {
        self.weights.total()
    }

    /// Actual probability of `id` winning a draw: `chance / total_weight`.
    pub fn implied_probability(&self, id: EntrantId) -> Option<Decimal> {
        self.get(id)
            .map(|e| Decimal::from(e.chance) / Decimal::from(self.total_weight()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn horses(pairs: &[(u32, u32)]) -> Vec<Entrant> {
        pairs.iter().map(|&(id, chance)| Entrant::new(id, chance)).collect()
    }

    #[test]
    fn test_valid_card() {
        let card = RaceCard::new(horses(&[(1, 45), (2, 30), (3, 20), (4, 5)])).unwrap();
        assert_eq!(card.entrants().len(), 4);
        assert_eq!(card.total_weight(), 100);
        assert!(card.contains(3));
        assert!(!card.contains(5));
        assert_eq!(card.get(2).map(|e| e.chance), Some(30));
    }

    #[test]
    fn test_empty_card_rejected() {
        let err = RaceCard::new(Vec::new()).unwrap_err();
        assert!(matches!(err, DerbyError::Config(_)));
    }

    #[test]
    fn test_zero_id_rejected() {
        assert!(RaceCard::new(horses(&[(0, 50)])).is_err());
    }

    #[test]
    fn test_chance_out_of_range_rejected() {
        assert!(RaceCard::new(horses(&[(1, 0)])).is_err());
        assert!(RaceCard::new(horses(&[(1, 101)])).is_err());
        assert!(RaceCard::new(horses(&[(1, 100)])).is_ok());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = RaceCard::new(horses(&[(1, 40), (2, 30), (1, 30)])).unwrap_err();
        assert_eq!(err, DerbyError::Config("duplicate entrant id 1".into()));
    }

    #[test]
    fn test_chances_need_not_sum_to_100() {
        let card = RaceCard::new(horses(&[(1, 80), (2, 80)])).unwrap();
        assert_eq!(card.total_weight(), 160);
        assert_eq!(card.implied_probability(1), Some(dec!(0.5)));
        assert_eq!(card.implied_probability(9), None);
    }
}
