use serde::{Deserialize, Serialize};

/// Contents of a single grid cell.
///
/// The discriminants are the ordinals used by the observation encoding, so
/// their order is part of the genome layout and must not change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
#[repr(u8)]
pub enum Cell {
    /// Clean floor.
    #[default]
    Empty = 0,
    /// Floor with rubbish on it.
    Rubbish = 1,
    /// Part of the border ring; never entered.
    Wall = 2,
}

impl Cell {
    /// Number of distinct cell states (3).
    pub const LEN: usize = 3;

    /// All cell states in ordinal order.
    pub const ALL: [Self; Self::LEN] = [Self::Empty, Self::Rubbish, Self::Wall];

    /// Returns the ordinal of this state (0, 1 or 2).
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Returns the cell state with the given ordinal.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal` is not in `0..3`.
    #[must_use]
    pub const fn from_ordinal(ordinal: usize) -> Self {
        match ordinal {
            0 => Self::Empty,
            1 => Self::Rubbish,
            2 => Self::Wall,
            _ => panic!("cell ordinal out of range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_roundtrip() {
        for cell in Cell::ALL {
            assert_eq!(Cell::from_ordinal(cell.ordinal()), cell);
        }
    }

    #[test]
    #[should_panic(expected = "cell ordinal out of range")]
    fn test_from_ordinal_out_of_range() {
        let _ = Cell::from_ordinal(3);
    }
}
