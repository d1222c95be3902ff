//! Makes available common structures needed to run a simulation
//!
//! You may write `use fracsim::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Config, ConstraintKind, Dof, Field, LoadRamp, Loading};
pub use crate::base::{DEFAULT_INTERFACE_TOL, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::fem::{seed_history, ConvergenceControl, FemState, FileIo, GaussState};
pub use crate::fem::{IncrementSolver, SingleRank, SolveOutcome, SolverQuasiStatic, StepSync};
pub use crate::fem::{Constraint, InterfaceTie, Partition, RealSupport, Subdomain, SubdomainId, VirtualSupport};
