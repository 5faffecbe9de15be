//! Option indicator conditioning.
//!
//! The 10-column conditioning zone holds an AND/OR column followed by three
//! 3-column slots, each an optional `N` and a two-digit indicator.

use std::collections::BTreeSet;

use crate::ast::Conditional;

const SLOT_OFFSETS: [usize; 3] = [1, 4, 7];
const ZONE_WIDTH: usize = 10;

/// Decode a conditioning zone into its indicator tests, in slot order.
pub fn parse_conditionals(zone: &str) -> Vec<Conditional> {
    if zone.trim().is_empty() {
        return Vec::new();
    }

    let mut chars: Vec<char> = zone.chars().collect();
    if chars.len() < ZONE_WIDTH {
        chars.resize(ZONE_WIDTH, ' ');
    }

    SLOT_OFFSETS
        .iter()
        .filter_map(|&offset| {
            let slot = &chars[offset..offset + 3];
            if slot.iter().all(|c| c.is_whitespace()) {
                return None;
            }
            let digits: String = slot[1..].iter().collect();
            let indicator = digits.trim().parse::<u8>().ok()?;
            Some(Conditional {
                indicator,
                negate: slot[0] == 'N',
            })
        })
        .collect()
}

// ──────────────────────────────────────────────
// Indicator state
// ──────────────────────────────────────────────

/// The set of indicators that are on. Every other indicator is off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indicators {
    on: BTreeSet<u8>,
}

impl Indicators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, indicator: u8, on: bool) {
        if on {
            self.on.insert(indicator);
        } else {
            self.on.remove(&indicator);
        }
    }

    pub fn is_on(&self, indicator: u8) -> bool {
        self.on.contains(&indicator)
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.on.iter().copied()
    }
}

impl FromIterator<u8> for Indicators {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Indicators {
            on: iter.into_iter().collect(),
        }
    }
}

impl Conditional {
    pub fn is_satisfied(&self, indicators: &Indicators) -> bool {
        indicators.is_on(self.indicator) != self.negate
    }
}

/// All tests in a conditioning list must hold; an empty list always holds.
pub fn all_satisfied(conditions: &[Conditional], indicators: &Indicators) -> bool {
    conditions.iter().all(|c| c.is_satisfied(indicators))
}
