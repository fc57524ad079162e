use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// One of the four cardinal directions an agent can step in.
///
/// `Up` increases `y`, `Right` increases `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the `(dx, dy)` offset of a single step.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    /// The move that steps in this direction.
    #[must_use]
    pub const fn to_move(self) -> Move {
        match self {
            Direction::Up => Move::MoveUp,
            Direction::Right => Move::MoveRight,
            Direction::Down => Move::MoveDown,
            Direction::Left => Move::MoveLeft,
        }
    }
}

impl Distribution<Direction> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        match rng.random_range(0..4) {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            3 => Direction::Left,
            _ => unreachable!("random direction outside the four cardinal directions"),
        }
    }
}

/// An action an agent can take on its turn.
///
/// The discriminant is the move's ordinal, used both for the textual genome
/// form and for indexing per-move histograms.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Move {
    #[display("do-nothing")]
    DoNothing = 0,
    #[display("move-up")]
    MoveUp = 1,
    #[display("move-right")]
    MoveRight = 2,
    #[display("move-down")]
    MoveDown = 3,
    #[display("move-left")]
    MoveLeft = 4,
    #[display("move-random")]
    MoveRandom = 5,
    #[display("pick-up-rubbish")]
    PickUpRubbish = 6,
}

impl Distribution<Move> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Move {
        Move::from_ordinal(rng.random_range(0..Move::LEN))
    }
}

impl Move {
    /// Number of move kinds (7).
    pub const LEN: usize = 7;

    /// All moves in ordinal order.
    pub const ALL: [Self; Self::LEN] = [
        Self::DoNothing,
        Self::MoveUp,
        Self::MoveRight,
        Self::MoveDown,
        Self::MoveLeft,
        Self::MoveRandom,
        Self::PickUpRubbish,
    ];

    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Returns the move with the given ordinal.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal` is not in `0..7`.
    #[must_use]
    pub const fn from_ordinal(ordinal: usize) -> Self {
        assert!(ordinal < Self::LEN, "move ordinal out of range");
        Self::ALL[ordinal]
    }

    /// Returns the single digit (`'0'..='6'`) representing this move.
    ///
    /// # Examples
    ///
    /// ```
    /// use robbie_engine::Move;
    ///
    /// assert_eq!(Move::DoNothing.as_char(), '0');
    /// assert_eq!(Move::PickUpRubbish.as_char(), '6');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self as u8) as char
    }

    /// Parses the digit produced by [`Self::as_char`].
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let ordinal = c.to_digit(10)? as usize;
        (ordinal < Self::LEN).then(|| Self::from_ordinal(ordinal))
    }

    /// Returns the direction of a cardinal step, or `None` for the other moves.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Move::MoveUp => Some(Direction::Up),
            Move::MoveRight => Some(Direction::Right),
            Move::MoveDown => Some(Direction::Down),
            Move::MoveLeft => Some(Direction::Left),
            Move::DoNothing | Move::MoveRandom | Move::PickUpRubbish => None,
        }
    }
}
