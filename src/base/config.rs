use super::DEFAULT_INTERFACE_TOL;
use std::fmt;

/// Holds configuration parameters for the quasi-static driver
///
/// The step-size bounds satisfy `0 < dt_min ≤ dt ≤ dt_max` at all times; the
/// driver halves `dt` on a rejected trial and may grow it by `dt_growth`
/// (clamped to `dt_max`) after an accepted one.
#[derive(Clone, Debug)]
pub struct Config {
    /// Initial time
    pub t_ini: f64,

    /// Final time
    pub t_fin: f64,

    /// Initial time increment
    pub dt: f64,

    /// Minimum allowed time increment
    pub dt_min: f64,

    /// Maximum allowed time increment
    pub dt_max: f64,

    /// Growth factor applied to Δt after an accepted step (1 disables growth)
    pub dt_growth: f64,

    /// Tolerance to consider two boundary nodes of different subdomains coincident
    pub interface_tol: f64,

    /// Enables the printing of timestep messages
    pub verbose_timesteps: bool,
}

impl Config {
    /// Allocates a new instance
    pub fn new() -> Self {
        Config {
            t_ini: 0.0,
            t_fin: 1.0,
            dt: 0.1,
            dt_min: 1e-10,
            dt_max: 0.1,
            dt_growth: 1.0,
            interface_tol: DEFAULT_INTERFACE_TOL,
            verbose_timesteps: false,
        }
    }

    /// Validates all parameters and returns a message if something is incorrect
    pub fn validate(&self) -> Option<String> {
        if !self.t_fin.is_finite() || self.t_fin <= self.t_ini {
            return Some(format!("t_fin = {:?} must be finite and > t_ini", self.t_fin));
        }
        if self.dt_min <= 0.0 {
            return Some(format!("dt_min = {:?} must be > 0.0", self.dt_min));
        }
        if self.dt < self.dt_min {
            return Some(format!("dt = {:?} must be ≥ dt_min", self.dt));
        }
        if self.dt_max < self.dt {
            return Some(format!("dt_max = {:?} must be ≥ dt", self.dt_max));
        }
        if self.dt_growth < 1.0 {
            return Some(format!("dt_growth = {:?} must be ≥ 1.0", self.dt_growth));
        }
        if self.interface_tol <= 0.0 {
            return Some(format!("interface_tol = {:?} must be > 0.0", self.interface_tol));
        }
        None
    }

    /// Sets the initial time
    pub fn set_t_ini(&mut self, t_ini: f64) -> &mut Self {
        self.t_ini = t_ini;
        self
    }

    /// Sets the final time
    pub fn set_t_fin(&mut self, t_fin: f64) -> &mut Self {
        self.t_fin = t_fin;
        self
    }

    /// Sets the initial time increment
    pub fn set_dt(&mut self, dt: f64) -> &mut Self {
        self.dt = dt;
        self
    }

    /// Sets the minimum allowed time increment
    pub fn set_dt_min(&mut self, dt_min: f64) -> &mut Self {
        self.dt_min = dt_min;
        self
    }

    /// Sets the maximum allowed time increment
    pub fn set_dt_max(&mut self, dt_max: f64) -> &mut Self {
        self.dt_max = dt_max;
        self
    }

    /// Sets the growth factor applied to Δt after an accepted step
    pub fn set_dt_growth(&mut self, dt_growth: f64) -> &mut Self {
        self.dt_growth = dt_growth;
        self
    }

    /// Sets the tolerance to consider two boundary nodes coincident
    pub fn set_interface_tol(&mut self, tol: f64) -> &mut Self {
        self.interface_tol = tol;
        self
    }

    /// Enables the printing of timestep messages
    pub fn set_verbose_timesteps(&mut self, flag: bool) -> &mut Self {
        self.verbose_timesteps = flag;
        self
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n").unwrap();
        write!(f, "==================\n").unwrap();
        write!(f, "t_ini = {:?}\n", self.t_ini).unwrap();
        write!(f, "t_fin = {:?}\n", self.t_fin).unwrap();
        write!(f, "dt = {:?}\n", self.dt).unwrap();
        write!(f, "dt_min = {:?}\n", self.dt_min).unwrap();
        write!(f, "dt_max = {:?}\n", self.dt_max).unwrap();
        write!(f, "dt_growth = {:?}\n", self.dt_growth).unwrap();
        write!(f, "interface_tol = {:?}\n", self.interface_tol).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
