//! Implements the quasi-static driver and the constraint-partitioning protocol

mod control_convergence;
mod control_time;
mod fem_state;
mod file_io;
mod increment_solver;
mod partition;
mod pre_crack;
mod solver_quasi_static;
mod step_sync;
pub use crate::fem::control_convergence::*;
pub use crate::fem::control_time::*;
pub use crate::fem::fem_state::*;
pub use crate::fem::file_io::*;
pub use crate::fem::increment_solver::*;
pub use crate::fem::partition::*;
pub use crate::fem::pre_crack::*;
pub use crate::fem::solver_quasi_static::*;
pub use crate::fem::step_sync::*;
