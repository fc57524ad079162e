use super::cell::Cell;

/// The five cells an agent senses from its current position.
///
/// Observations are derived from a [`Grid`](crate::Grid) on demand and never
/// stored. Each one maps to exactly one genome slot through [`Self::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Observation {
    pub current: Cell,
    pub above: Cell,
    pub right: Cell,
    pub below: Cell,
    pub left: Cell,
}

impl Observation {
    /// Number of distinct observations (3^5 = 243).
    pub const COUNT: usize = Cell::LEN.pow(5);

    /// Encodes the observation as a slot index in `0..243`.
    ///
    /// The encoding is `current + 3*above + 9*right + 27*below + 81*left`.
    /// The weighting and term order fix which physical situation lives in which
    /// genome slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use robbie_engine::{Cell, Observation};
    ///
    /// let obs = Observation {
    ///     current: Cell::Rubbish,
    ///     above: Cell::Wall,
    ///     right: Cell::Empty,
    ///     below: Cell::Empty,
    ///     left: Cell::Wall,
    /// };
    /// assert_eq!(obs.index(), 1 + 3 * 2 + 81 * 2);
    /// ```
    #[must_use]
    pub const fn index(&self) -> usize {
        self.current.ordinal()
            + 3 * self.above.ordinal()
            + 9 * self.right.ordinal()
            + 27 * self.below.ordinal()
            + 81 * self.left.ordinal()
    }

    /// Decodes a slot index back into the observation it represents.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 243`.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        assert!(index < Self::COUNT, "observation index out of range");
        Self {
            current: Cell::from_ordinal(index % 3),
            above: Cell::from_ordinal(index / 3 % 3),
            right: Cell::from_ordinal(index / 9 % 3),
            below: Cell::from_ordinal(index / 27 % 3),
            left: Cell::from_ordinal(index / 81 % 3),
        }
    }

    /// Returns the neighbouring cells in `[above, right, below, left]` order.
    #[must_use]
    pub const fn neighbours(&self) -> [Cell; 4] {
        [self.above, self.right, self.below, self.left]
    }

    /// Iterates over every possible observation in slot order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_index)
    }
}
