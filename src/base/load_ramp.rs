use super::Dof;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maps the simulation time to a prescribed boundary value
///
/// The ramp is a piecewise-linear interpolation over ordered control points
/// `(time, value)` with strictly increasing times. Evaluation is only defined
/// inside the closed interval spanned by the first and last control points;
/// extrapolation is rejected.
///
/// # Examples
///
/// ```
/// use fracsim::base::LoadRamp;
/// use fracsim::StrError;
///
/// fn main() -> Result<(), StrError> {
///     let ramp = LoadRamp::new(&[(0.0, 0.0), (1.0, 30.0)])?;
///     assert_eq!(ramp.value_at(0.5)?, 15.0);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoadRamp {
    /// Ordered control points (time, value)
    points: Vec<(f64, f64)>,
}

impl LoadRamp {
    /// Allocates a new instance from ordered control points
    pub fn new(points: &[(f64, f64)]) -> Result<Self, StrError> {
        if points.len() < 2 {
            return Err("load ramp requires at least two control points");
        }
        for i in 1..points.len() {
            if points[i].0 <= points[i - 1].0 {
                return Err("control points must have strictly increasing times");
            }
        }
        Ok(LoadRamp {
            points: points.to_vec(),
        })
    }

    /// Returns the time of the first control point
    pub fn t_first(&self) -> f64 {
        self.points[0].0
    }

    /// Returns the time of the last control point
    pub fn t_last(&self) -> f64 {
        self.points[self.points.len() - 1].0
    }

    /// Evaluates the prescribed value at a given time (pure function)
    ///
    /// Performs linear interpolation between the two bracketing control
    /// points; the time must satisfy `t_first ≤ t ≤ t_last`.
    pub fn value_at(&self, t: f64) -> Result<f64, StrError> {
        if t < self.t_first() || t > self.t_last() {
            return Err("time is outside the load ramp range");
        }
        for i in 1..self.points.len() {
            let (t0, v0) = self.points[i - 1];
            let (t1, v1) = self.points[i];
            if t <= t1 {
                return Ok(v0 + (v1 - v0) * (t - t0) / (t1 - t0));
            }
        }
        // cannot happen because t ≤ t_last was checked
        Err("time is outside the load ramp range")
    }
}

/// Holds the time-dependent loading program: one ramp per prescribed DOF
pub struct Loading {
    /// All (DOF, ramp) associations
    pub all: Vec<(Dof, LoadRamp)>,
}

impl Loading {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        Loading { all: Vec::new() }
    }

    /// Associates a load ramp with a prescribed DOF
    pub fn add(&mut self, dof: Dof, ramp: LoadRamp) -> &mut Self {
        self.all.push((dof, ramp));
        self
    }

    /// Evaluates all ramps at a given time
    pub fn evaluate(&self, t: f64) -> Result<Vec<(Dof, f64)>, StrError> {
        let mut values = Vec::with_capacity(self.all.len());
        for (dof, ramp) in &self.all {
            values.push((*dof, ramp.value_at(t)?));
        }
        Ok(values)
    }
}

impl fmt::Display for LoadRamp {
    /// Prints the control points of the ramp
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (t, v)) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ").unwrap();
            }
            write!(f, "({:?}, {:?})", t, v).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
