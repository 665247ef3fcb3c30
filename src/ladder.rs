//! The money ladder: fifteen fixed payouts with three safe havens.

use serde::Serialize;

use crate::error::GameError;

/// Number of questions in a session, one per ladder rung.
pub const LADDER_SIZE: usize = 15;

/// One rung of the ladder.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyLevel {
    /// 1-based position.
    pub level: u8,
    pub payout: u32,
    /// Winnings never drop below the payout of a cleared safe haven.
    pub safe_haven: bool,
}

impl MoneyLevel {
    const fn new(level: u8, payout: u32, safe_haven: bool) -> Self {
        Self { level, payout, safe_haven }
    }

    #[must_use]
    pub const fn payout(&self) -> u32 {
        self.payout
    }

    #[must_use]
    pub const fn is_safe_haven(&self) -> bool {
        self.safe_haven
    }
}

pub static MONEY_LADDER: [MoneyLevel; LADDER_SIZE] = [
    MoneyLevel::new(1, 100, false),
    MoneyLevel::new(2, 200, false),
    MoneyLevel::new(3, 300, false),
    MoneyLevel::new(4, 500, false),
    MoneyLevel::new(5, 1_000, true),
    MoneyLevel::new(6, 2_000, false),
    MoneyLevel::new(7, 4_000, false),
    MoneyLevel::new(8, 8_000, false),
    MoneyLevel::new(9, 16_000, false),
    MoneyLevel::new(10, 32_000, true),
    MoneyLevel::new(11, 64_000, false),
    MoneyLevel::new(12, 125_000, false),
    MoneyLevel::new(13, 250_000, false),
    MoneyLevel::new(14, 500_000, false),
    MoneyLevel::new(15, 1_000_000, true),
];

/// Look up the rung for a 0-based session position.
///
/// # Errors
///
/// Returns [`GameError::LevelOutOfRange`] for positions past the top rung.
pub fn level_at(position: usize) -> Result<MoneyLevel, GameError> {
    MONEY_LADDER
        .get(position)
        .copied()
        .ok_or(GameError::LevelOutOfRange(position))
}

/// Payout of the final rung.
#[must_use]
pub fn top_payout() -> u32 {
    MONEY_LADDER[LADDER_SIZE - 1].payout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_havens_are_five_ten_fifteen() {
        let havens: Vec<u8> = MONEY_LADDER
            .iter()
            .filter(|l| l.is_safe_haven())
            .map(|l| l.level)
            .collect();
        assert_eq!(havens, vec![5, 10, 15]);
    }

    #[test]
    fn payouts_strictly_increase() {
        for pair in MONEY_LADDER.windows(2) {
            assert!(pair[0].payout() < pair[1].payout());
            assert_eq!(pair[0].level + 1, pair[1].level);
        }
    }

    #[test]
    fn lookup_is_zero_based() {
        assert_eq!(level_at(0).unwrap().payout(), 100);
        assert_eq!(level_at(4).unwrap().payout(), 1_000);
        assert_eq!(level_at(14).unwrap().payout(), top_payout());
        assert_eq!(top_payout(), 1_000_000);
    }

    #[test]
    fn lookup_out_of_range() {
        assert_eq!(level_at(15), Err(GameError::LevelOutOfRange(15)));
    }
}
