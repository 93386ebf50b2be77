//! Transition rules

use super::cell::{Cell, CellState};
use super::grid::Grid;
use crate::error::{LifeError, Result};

/// A transition function from a cell and its grid to the cell's next state.
///
/// Implementations must be pure: the grid is borrowed immutably and the same
/// inputs must always produce the same output. Cells of one generation may
/// be evaluated in parallel, hence `Send + Sync`.
pub trait Rule: Send + Sync {
    /// Short human-readable name
    fn name(&self) -> &str;

    /// Compute the next state of `cell` from the current generation `grid`
    fn next_state(&self, cell: &Cell, grid: &Grid) -> Result<CellState>;
}

/// Conway's Game of Life (B3/S23)
#[derive(Debug, Clone, Copy, Default)]
pub struct ConwayRule;

impl ConwayRule {
    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}

impl Rule for ConwayRule {
    fn name(&self) -> &str {
        "Conway"
    }

    fn next_state(&self, cell: &Cell, grid: &Grid) -> Result<CellState> {
        let neighbors = grid.count_alive_neighbors(cell.row(), cell.col())?;
        Ok(Self::should_be_alive(cell.is_alive(), neighbors).into())
    }
}

/// Outer-totalistic Moore rule described by birth and survival neighbor counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeLikeRule {
    birth: [bool; 9],
    survival: [bool; 9],
    name: String,
}

impl LifeLikeRule {
    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self> {
        let mut rule = Self {
            birth: [false; 9],
            survival: [false; 9],
            name: String::new(),
        };

        for (counts, table) in [(birth, &mut rule.birth), (survival, &mut rule.survival)] {
            for &n in counts {
                let slot = table.get_mut(n as usize).ok_or_else(|| {
                    LifeError::InvalidRule(format!("neighbor count {} exceeds 8", n))
                })?;
                *slot = true;
            }
        }

        rule.name = rule.rulestring();
        Ok(rule)
    }

    /// B3/S23
    pub fn conway() -> Self {
        Self {
            birth: Self::table(&[3]),
            survival: Self::table(&[2, 3]),
            name: "B3/S23".to_string(),
        }
    }

    fn table(counts: &[u8]) -> [bool; 9] {
        let mut table = [false; 9];
        for &n in counts {
            table[n as usize] = true;
        }
        table
    }

    /// Parse a `B<digits>/S<digits>` rulestring, e.g. `B36/S23`.
    ///
    /// Letters are case-insensitive, the two halves may appear in either
    /// order, and either digit list may be empty (`B2/S` is Seeds).
    pub fn parse(rulestring: &str) -> Result<Self> {
        let invalid = || LifeError::InvalidRule(format!("cannot parse rulestring '{}'", rulestring));

        let (first, second) = rulestring.trim().split_once('/').ok_or_else(invalid)?;

        let mut birth = None;
        let mut survival = None;
        for part in [first, second] {
            let mut chars = part.chars();
            let target = match chars.next().map(|ch| ch.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(invalid()),
            };
            if target.is_some() {
                return Err(invalid());
            }

            let digits = chars
                .map(|ch| {
                    ch.to_digit(10)
                        .filter(|&d| d <= 8)
                        .map(|d| d as u8)
                        .ok_or_else(invalid)
                })
                .collect::<Result<Vec<u8>>>()?;
            *target = Some(digits);
        }

        match (birth, survival) {
            (Some(birth), Some(survival)) => Self::new(&birth, &survival),
            _ => Err(invalid()),
        }
    }

    /// Canonical `B../S..` form
    pub fn rulestring(&self) -> String {
        let digits = |table: &[bool; 9]| -> String {
            (0..9u8)
                .filter(|&n| table[n as usize])
                .map(|n| char::from(b'0' + n))
                .collect()
        };
        format!("B{}/S{}", digits(&self.birth), digits(&self.survival))
    }

    pub fn should_be_alive(&self, current_state: bool, neighbor_count: u8) -> bool {
        let table = if current_state { &self.survival } else { &self.birth };
        table.get(neighbor_count as usize).copied().unwrap_or(false)
    }
}

impl Rule for LifeLikeRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_state(&self, cell: &Cell, grid: &Grid) -> Result<CellState> {
        let neighbors = grid.count_alive_neighbors(cell.row(), cell.col())?;
        Ok(self.should_be_alive(cell.is_alive(), neighbors).into())
    }
}

/// Named presets accepted by [`rule_from_name`] besides `conway`
pub const RULE_PRESETS: &[(&str, &str)] = &[
    ("highlife", "B36/S23"),
    ("seeds", "B2/S"),
    ("day_and_night", "B3678/S34678"),
];

/// Resolve a configured rule name: `conway`, a preset, or a rulestring
pub fn rule_from_name(name: &str) -> Result<Box<dyn Rule>> {
    let key = name.trim().to_ascii_lowercase();

    if key == "conway" {
        return Ok(Box::new(ConwayRule));
    }

    let rulestring = RULE_PRESETS
        .iter()
        .find(|(preset, _)| *preset == key)
        .map_or(name, |(_, rulestring)| *rulestring);

    Ok(Box::new(LifeLikeRule::parse(rulestring)?))
}
