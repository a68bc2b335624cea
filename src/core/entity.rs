//! Fighter identity and corner assignment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for fighters, as assigned by the host's record store
///
/// IDs are stable across bouts; the engine never allocates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FighterId(u32);

impl FighterId {
    pub fn new(id: u32) -> Self {
        FighterId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the cage a fighter occupies for the bout
///
/// Red is index 0 and blue is index 1 everywhere a pair of fighters is
/// stored, so a corner doubles as the winner index of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    Red,
    Blue,
}

impl Corner {
    pub const BOTH: [Corner; 2] = [Corner::Red, Corner::Blue];

    pub fn index(self) -> usize {
        match self {
            Corner::Red => 0,
            Corner::Blue => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Corner> {
        match index {
            0 => Some(Corner::Red),
            1 => Some(Corner::Blue),
            _ => None,
        }
    }

    pub fn opponent(self) -> Corner {
        match self {
            Corner::Red => Corner::Blue,
            Corner::Blue => Corner::Red,
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corner::Red => write!(f, "red"),
            Corner::Blue => write!(f, "blue"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_index_round_trip() {
        for corner in Corner::BOTH {
            assert_eq!(Corner::from_index(corner.index()), Some(corner));
        }
        assert_eq!(Corner::from_index(2), None);
    }

    #[test]
    fn test_corner_opponent() {
        assert_eq!(Corner::Red.opponent(), Corner::Blue);
        assert_eq!(Corner::Blue.opponent().opponent(), Corner::Blue);
    }
}
