//! Plain value types of the simulation.
//!
//! None of these types own any state beyond their own value; the mutable
//! environment lives in [`crate::engine`].

pub use self::{cell::*, moves::*, observation::*};

pub(crate) mod cell;
pub(crate) mod moves;
pub(crate) mod observation;
