use super::FemState;
use crate::base::Config;
use crate::StrError;

/// Assists in the adaptive time loop control
///
/// Implements the step-size transitions of the quasi-static driver: the next
/// trial never runs past the final time, an accepted step may grow Δt
/// (clamped to `dt_max`), and a rejected trial halves Δt down to `dt_min`.
/// The time itself lives in [FemState]; this struct only enforces the
/// `dt_min ≤ dt ≤ dt_max` invariant across transitions.
pub struct ControlTime<'a> {
    /// Holds configuration parameters
    config: &'a Config,
}

impl<'a> ControlTime<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config) -> Result<Self, StrError> {
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate time control because config.validate() failed");
        }
        Ok(ControlTime { config })
    }

    /// Initializes the time and Δt at the beginning of a run
    pub fn initialize(&self, state: &mut FemState) {
        state.t = self.config.t_ini;
        state.dt = self.config.dt;
    }

    /// Returns true if the final time has been reached
    pub fn finished(&self, state: &FemState) -> bool {
        state.t >= self.config.t_fin
    }

    /// Computes the target time of the next trial step
    ///
    /// The target is `min(t + Δt, t_fin)`: the last step is shortened to land
    /// exactly on the final time, without permanently modifying Δt.
    pub fn target(&self, state: &FemState) -> f64 {
        f64::min(state.t + state.dt, self.config.t_fin)
    }

    /// Commits an accepted trial step
    ///
    /// Advances the time to the trial target and grows Δt by the configured
    /// factor, clamped to `dt_max`.
    pub fn accept(&self, state: &mut FemState, t_trial: f64) {
        state.t = t_trial;
        state.dt = f64::min(state.dt * self.config.dt_growth, self.config.dt_max);
    }

    /// Handles a rejected trial step by halving Δt
    ///
    /// Fails when the halved Δt would fall below `dt_min`; in that case the
    /// state still holds the last committed time, so partial results remain
    /// usable by the caller.
    pub fn reject(&self, state: &mut FemState) -> Result<(), StrError> {
        let halved = state.dt / 2.0;
        if halved < self.config.dt_min {
            return Err("cannot halve Δt because it would fall below the allowed minimum");
        }
        state.dt = halved;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ControlTime;
    use crate::base::Config;
    use crate::fem::FemState;

    #[test]
    fn new_captures_errors() {
        let mut config = Config::new();
        config.set_dt_min(-1.0);
        assert_eq!(
            ControlTime::new(&config).err(),
            Some("cannot allocate time control because config.validate() failed")
        );
    }

    #[test]
    fn initialize_target_accept_work() {
        let mut config = Config::new();
        config.set_t_fin(3.0).set_dt(1.0).set_dt_min(0.1).set_dt_max(1.0);
        let control = ControlTime::new(&config).unwrap();
        let mut state = FemState::new(1, &[]).unwrap();

        control.initialize(&mut state);
        assert_eq!(state.t, 0.0);
        assert_eq!(state.dt, 1.0);
        assert!(!control.finished(&state));

        // three uniform steps land exactly on t_fin
        for t_expected in [1.0, 2.0, 3.0] {
            let t_trial = control.target(&state);
            assert_eq!(t_trial, t_expected);
            control.accept(&mut state, t_trial);
            assert_eq!(state.t, t_expected);
            assert_eq!(state.dt, 1.0); // growth factor is 1 by default
        }
        assert!(control.finished(&state));
    }

    #[test]
    fn target_shortens_the_last_step() {
        let mut config = Config::new();
        config.set_t_fin(2.5).set_dt(1.0).set_dt_min(0.1).set_dt_max(1.0);
        let control = ControlTime::new(&config).unwrap();
        let mut state = FemState::new(1, &[]).unwrap();
        control.initialize(&mut state);
        state.t = 2.0;
        assert_eq!(control.target(&state), 2.5);
        control.accept(&mut state, 2.5);
        assert_eq!(state.dt, 1.0); // the truncation does not shrink Δt
    }

    #[test]
    fn accept_grows_dt_up_to_the_maximum() {
        let mut config = Config::new();
        config
            .set_t_fin(10.0)
            .set_dt(1.0)
            .set_dt_min(0.1)
            .set_dt_max(3.0)
            .set_dt_growth(2.0);
        let control = ControlTime::new(&config).unwrap();
        let mut state = FemState::new(1, &[]).unwrap();
        control.initialize(&mut state);
        control.accept(&mut state, 1.0);
        assert_eq!(state.dt, 2.0);
        control.accept(&mut state, 3.0);
        assert_eq!(state.dt, 3.0); // clamped to dt_max
        control.accept(&mut state, 6.0);
        assert_eq!(state.dt, 3.0);
    }

    #[test]
    fn reject_halves_dt_down_to_the_minimum() {
        let mut config = Config::new();
        config.set_t_fin(3.0).set_dt(1.0).set_dt_min(0.1).set_dt_max(1.0);
        let control = ControlTime::new(&config).unwrap();
        let mut state = FemState::new(1, &[]).unwrap();
        control.initialize(&mut state);

        // 1.0 → 0.5 → 0.25 → 0.125, all ≥ dt_min
        for dt_expected in [0.5, 0.25, 0.125] {
            control.reject(&mut state).unwrap();
            assert_eq!(state.dt, dt_expected);
        }

        // the fourth halving (0.0625 < 0.1) is fatal
        assert_eq!(
            control.reject(&mut state).err(),
            Some("cannot halve Δt because it would fall below the allowed minimum")
        );
        assert_eq!(state.dt, 0.125); // Δt keeps its last admissible value
    }
}
