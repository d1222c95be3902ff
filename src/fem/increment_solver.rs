use super::FemState;
use crate::base::{Dof, Field};
use crate::StrError;
use std::collections::HashMap;

/// Defines the outcome of one nonlinear increment
#[derive(Clone, Debug)]
pub enum SolveOutcome {
    /// Residual norms per field after the internal equilibrium iterations
    ///
    /// The driver judges convergence of these norms against the registered
    /// tolerances; the assembler only reports them.
    Residuals(HashMap<Field, f64>),

    /// The increment failed hard (e.g. singular system or iteration limit)
    ///
    /// A hard failure is recoverable by the driver through step halving; it
    /// is not a fatal error of the assembler.
    Failed,
}

/// Defines the interface to the external assembler and nonlinear solver
///
/// One call performs a single quasi-static increment: the implementation
/// applies the prescribed boundary values, runs its internal equilibrium
/// iterations, updates the primary unknowns and the integration-point data in
/// `state`, and reports the remaining residual norms per field (or a hard
/// failure). The driver owns the accept/reject decision; on a rejected trial
/// the whole `state` is discarded and restored, so the implementation does
/// not need to roll anything back.
pub trait IncrementSolver {
    /// Performs one nonlinear increment at the trial time
    ///
    /// # Input
    ///
    /// * `state` -- the trial state to be updated in place
    /// * `t_trial` -- the target time of this increment
    /// * `prescribed` -- the boundary values evaluated at `t_trial`
    fn solve_increment(
        &mut self,
        state: &mut FemState,
        t_trial: f64,
        prescribed: &[(Dof, f64)],
    ) -> Result<SolveOutcome, StrError>;
}
