//! Fracsim - Quasi-static fracture simulation driver
//!
//! This crate implements the driving logic for quasi-static nonlinear
//! finite element simulations of fracture (phase-field and gradient-damage
//! models), including the case where the elasticity problem is torn into
//! subdomains solved by cooperating ranks. The heavy numerical machinery
//! (element assembly, constitutive laws, global linear solves) belongs to an
//! external structural-mechanics library reached through the
//! [crate::fem::IncrementSolver] trait; this crate decides *when* and *with
//! which prescribed values* that machinery runs, and whether the outcome of
//! each trial step is accepted.
//!
//! The main components are:
//!
//! * [crate::base::LoadRamp] -- piecewise-linear prescribed boundary values over time
//! * [crate::fem::ConvergenceControl] -- per-field residual-norm tolerances
//! * [crate::fem::seed_history] -- pre-crack history-variable initialization
//! * [crate::fem::Partition] -- virtual/real/interface constraint partitioning
//! * [crate::fem::SolverQuasiStatic] -- adaptive quasi-static time stepping

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

/// Defines a function of space returning true if a point belongs to a region
pub type FnRegion = fn(&[f64]) -> bool;

/// Defines a function of space returning a scalar value at a point
pub type FnValue = fn(&[f64]) -> f64;

pub mod base;
pub mod fem;
pub mod prelude;
