//! Local search for MTVRPTW solutions.
//!
//! - [`relocate_from`] / [`relocate_neighbours`]: one relocate neighbour per
//!   source route
//! - [`improve`]: one pass, best neighbour accepted only if strictly better
//! - [`improve_until_converged`]: passes repeated up to an iteration cap

mod improve;
mod relocate;

pub use improve::{improve, improve_until_converged, improve_with};
pub use relocate::{relocate_from, relocate_neighbours};
