//! A hand-written baseline policy.
//!
//! The heuristic is greedy and memoryless:
//!
//! 1. Pick up rubbish if standing on it
//! 2. Otherwise step towards a uniformly chosen neighbour holding rubbish
//! 3. Otherwise step towards a uniformly chosen empty neighbour
//! 4. Otherwise do nothing
//!
//! It never bumps into walls and never makes a false pick-up, so its score is
//! a useful reference for what evolution should at least reach.

use arrayvec::ArrayVec;
use rand::{RngCore, seq::IndexedRandom as _};
use robbie_engine::{Cell, Direction, Move, Observation};

use crate::policy::{BoxedPolicy, Policy};

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn step_towards(
        observation: &Observation,
        target: Cell,
        rng: &mut dyn RngCore,
    ) -> Option<Move> {
        let candidates: ArrayVec<Direction, 4> = Direction::ALL
            .into_iter()
            .zip(observation.neighbours())
            .filter(|(_, cell)| *cell == target)
            .map(|(direction, _)| direction)
            .collect();
        candidates.choose(rng).map(|direction| direction.to_move())
    }
}

impl Policy for HeuristicPolicy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn decide(&self, observation: Observation, rng: &mut dyn RngCore) -> Move {
        if observation.current.is_rubbish() {
            return Move::PickUpRubbish;
        }
        Self::step_towards(&observation, Cell::Rubbish, rng)
            .or_else(|| Self::step_towards(&observation, Cell::Empty, rng))
            .unwrap_or(Move::DoNothing)
    }

    fn clone_boxed(&self) -> BoxedPolicy {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn obs(current: Cell, [above, right, below, left]: [Cell; 4]) -> Observation {
        Observation {
            current,
            above,
            right,
            below,
            left,
        }
    }

    #[test]
    fn test_deterministic_choices() {
        use Cell::{Empty as E, Rubbish as R, Wall as W};
        // Format: (observation, expected move)
        let test_cases = [
            (obs(R, [R, R, R, R]), Move::PickUpRubbish),
            (obs(R, [W, W, W, W]), Move::PickUpRubbish),
            (obs(E, [W, R, E, W]), Move::MoveRight),
            (obs(E, [E, W, R, E]), Move::MoveDown),
            (obs(E, [W, W, W, E]), Move::MoveLeft),
            (obs(E, [E, W, W, W]), Move::MoveUp),
            (obs(E, [W, W, W, W]), Move::DoNothing),
        ];
        let mut rng = Pcg32::seed_from_u64(0);
        for (observation, expected) in test_cases {
            assert_eq!(
                HeuristicPolicy.decide(observation, &mut rng),
                expected,
                "{observation:?}"
            );
        }
    }

    #[test]
    fn test_prefers_rubbish_and_spreads_choices() {
        use Cell::{Empty as E, Rubbish as R, Wall as W};
        let observation = obs(E, [R, E, R, W]);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ups = 0;
        let mut downs = 0;
        for _ in 0..200 {
            match HeuristicPolicy.decide(observation, &mut rng) {
                Move::MoveUp => ups += 1,
                Move::MoveDown => downs += 1,
                other => panic!("unexpected move {other:?}"),
            }
        }
        assert!(ups > 50 && downs > 50, "ups={ups} downs={downs}");
    }

    #[test]
    fn test_never_targets_walls() {
        let mut rng = Pcg32::seed_from_u64(2);
        for observation in Observation::all() {
            let mv = HeuristicPolicy.decide(observation, &mut rng);
            if let Some(direction) = mv.direction() {
                let target = match direction {
                    Direction::Up => observation.above,
                    Direction::Right => observation.right,
                    Direction::Down => observation.below,
                    Direction::Left => observation.left,
                };
                assert_ne!(target, Cell::Wall, "{observation:?}");
            }
            assert!(!mv.is_move_random());
        }
    }
}
