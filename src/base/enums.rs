use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the physical fields solved by the driver
///
/// The set of fields is fixed at problem configuration time; every field
/// carried by the nonlinear solve must have a residual tolerance registered
/// in [crate::fem::ConvergenceControl].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Field {
    /// Displacement vector field
    Displacement = 0,

    /// Crack phase-field (scalar damage-like unknown)
    PhaseField = 1,
}

/// Defines degrees-of-freedom (DOF) types
///
/// Note: The fixed numbering scheme assists in sorting the DOFs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Dof {
    /// Displacement along the first dimension
    Ux = 0,

    /// Displacement along the second dimension
    Uy = 1,

    /// Displacement along the third dimension
    Uz = 2,

    /// Crack phase-field unknown
    Phi = 3,
}

impl Dof {
    /// Returns the field holding this DOF
    pub fn field(&self) -> Field {
        match self {
            Dof::Ux | Dof::Uy | Dof::Uz => Field::Displacement,
            Dof::Phi => Field::PhaseField,
        }
    }
}

/// Defines the role of a prescribed constraint in the decomposed problem
///
/// Virtual constraints regularize an individual subdomain before the global
/// coupling exists; they must be retracted once the real constraints and the
/// interface ties are in place and can never reach the assembled global
/// system. Real constraints are permanent physical boundary conditions.
/// Interface constraints tie coincident DOFs across two subdomains.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum ConstraintKind {
    /// Temporary rank-local support (removed after the global coupling is set)
    Virtual = 0,

    /// Permanent physical boundary condition
    Real = 1,

    /// Equality coupling of coincident DOFs across two subdomains
    Interface = 2,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Displacement => write!(f, "displacement"),
            Field::PhaseField => write!(f, "phase-field"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
