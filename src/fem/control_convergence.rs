use crate::base::{Config, Field};
use crate::StrError;
use std::collections::HashMap;

/// Controls the convergence of the nonlinear increments, field by field
///
/// Holds one residual-norm tolerance per solved field (e.g. a loose tolerance
/// for the phase-field and a tight one for the displacements) and judges a
/// trial step converged only when every registered field satisfies its own
/// tolerance. The per-field residual norms themselves are computed by the
/// external assembler/solver.
pub struct ConvergenceControl<'a> {
    /// Holds configuration parameters (verbosity)
    config: &'a Config,

    /// Maps each solved field to its residual-norm tolerance
    tolerances: HashMap<Field, f64>,

    /// Total number of accepted steps
    n_accepted: usize,

    /// Total number of rejected trial steps
    n_rejected: usize,
}

impl<'a> ConvergenceControl<'a> {
    /// Allocates a new instance with an empty tolerance table
    pub fn new(config: &'a Config) -> Self {
        ConvergenceControl {
            config,
            tolerances: HashMap::new(),
            n_accepted: 0,
            n_rejected: 0,
        }
    }

    /// Registers the residual-norm tolerance of a field
    pub fn register(&mut self, field: Field, tolerance: f64) -> Result<&mut Self, StrError> {
        if !(tolerance > 0.0) {
            return Err("tolerance must be > 0.0");
        }
        if self.tolerances.contains_key(&field) {
            return Err("field is already registered");
        }
        self.tolerances.insert(field, tolerance);
        Ok(self)
    }

    /// Returns the number of registered fields
    pub fn n_fields(&self) -> usize {
        self.tolerances.len()
    }

    /// Returns the tolerance of a registered field
    pub fn tolerance(&self, field: Field) -> Result<f64, StrError> {
        match self.tolerances.get(&field) {
            Some(tolerance) => Ok(*tolerance),
            None => Err("field has not been registered"),
        }
    }

    /// Checks whether one field satisfies its residual tolerance
    ///
    /// Returns true if and only if `residual_norm < tolerance` (the boundary
    /// `residual_norm == tolerance` does not converge).
    pub fn is_converged(&self, field: Field, residual_norm: f64) -> Result<bool, StrError> {
        let tolerance = self.tolerance(field)?;
        Ok(residual_norm < tolerance)
    }

    /// Checks whether all registered fields satisfy their tolerances
    ///
    /// Every registered field must be present in `norms`; a missing entry is
    /// an error, not a silent pass.
    pub fn all_converged(&self, norms: &HashMap<Field, f64>) -> Result<bool, StrError> {
        let mut converged = true;
        for (field, tolerance) in &self.tolerances {
            match norms.get(field) {
                Some(norm) => {
                    if !(*norm < *tolerance) {
                        converged = false;
                    }
                }
                None => return Err("missing residual norm for registered field"),
            }
        }
        Ok(converged)
    }

    /// Increments the total number of accepted steps
    pub(crate) fn add_accepted(&mut self) {
        self.n_accepted += 1;
    }

    /// Increments the total number of rejected trial steps
    pub(crate) fn add_rejected(&mut self) {
        self.n_rejected += 1;
    }

    /// Returns the total number of accepted steps
    pub fn n_accepted(&self) -> usize {
        self.n_accepted
    }

    /// Returns the total number of rejected trial steps
    pub fn n_rejected(&self) -> usize {
        self.n_rejected
    }

    /// Prints the header before time stepping
    pub(crate) fn print_header(&self) {
        if self.config.verbose_timesteps {
            println!("\nFRACSIM === TIME STEPPING ====================================");
            println!("{}", "─".repeat(62));
            println!("{:>8} {:>13} {:>13} {:>10}", "timestep", "t", "Δt", "outcome");
            println!("{}", "─".repeat(62));
        }
    }

    /// Prints the result of an accepted step
    pub(crate) fn print_accepted(&self, timestep: usize, t: f64, dt: f64) {
        if self.config.verbose_timesteps {
            println!("{:>8} {:>13.6e} {:>13.6e} {:>10}", timestep + 1, t, dt, "accepted");
        }
    }

    /// Prints the result of a rejected trial step
    pub(crate) fn print_rejected(&self, timestep: usize, t_trial: f64, dt: f64) {
        if self.config.verbose_timesteps {
            println!("{:>8} {:>13.6e} {:>13.6e} {:>10}", timestep + 1, t_trial, dt, "rejected");
        }
    }

    /// Prints the horizontal line at the end of the analysis
    pub(crate) fn print_footer(&self) {
        if self.config.verbose_timesteps {
            println!("{}", "─".repeat(62));
            println!("accepted = {}, rejected = {}", self.n_accepted, self.n_rejected);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
