use fracsim::prelude::*;
use fracsim::StrError;
use russell_lab::approx_eq;
use std::collections::HashMap;

// Quasi-static run with a uniform displacement ramp
//
// The external assembler is mocked: it converges on the first trial of every
// increment, stores the prescribed boundary value in uu[0], and reports
// residual norms below the registered tolerances for both fields.
//
// LOADING
//
// One prescribed displacement ramp from (t=0, u=0) to (t=3, u=30)
//
//   u ^
//  30 |        *
//     |      /
//     |    /
//   0 *--/------> t
//     0        3
//
// TEST GOAL
//
// With Δt = 1 and no growth, the driver must accept exactly three steps at
// t = 1, 2, 3 with prescribed values 10, 20, 30, keep the time monotone, and
// end exactly at the final time. The pre-seeded crack history must pass
// through the run untouched (the mock does not evolve damage).

const ELL: f64 = 1.5e-2; // band half-width of the pre-crack
const GC: f64 = 2.7; // characteristic fracture energy

struct MockAssembler {
    /// Prescribed values received at each increment (dof Ux)
    received: Vec<(f64, f64)>, // (t_trial, value)
}

impl IncrementSolver for MockAssembler {
    fn solve_increment(
        &mut self,
        state: &mut FemState,
        t_trial: f64,
        prescribed: &[(Dof, f64)],
    ) -> Result<SolveOutcome, StrError> {
        assert_eq!(prescribed.len(), 1);
        assert_eq!(prescribed[0].0, Dof::Ux);
        self.received.push((t_trial, prescribed[0].1));
        state.uu[0] = prescribed[0].1;
        let mut norms = HashMap::new();
        norms.insert(Field::Displacement, 1e-7);
        norms.insert(Field::PhaseField, 1e-6);
        Ok(SolveOutcome::Residuals(norms))
    }
}

#[test]
fn test_quasi_static_uniform_ramp() -> Result<(), StrError> {
    // configuration
    let mut config = Config::new();
    config.set_t_fin(3.0).set_dt(1.0).set_dt_min(0.1).set_dt_max(1.0);

    // loading program
    let mut loading = Loading::new();
    loading.add(Dof::Ux, LoadRamp::new(&[(0.0, 0.0), (3.0, 30.0)])?);

    // per-field tolerances (as in the notched specimen runs)
    let mut convergence = ConvergenceControl::new(&config);
    convergence
        .register(Field::Displacement, 1e-5)?
        .register(Field::PhaseField, 1e-4)?;

    // state with two integration points near the pre-crack band
    let mut state = FemState::new(2, &[vec![0.25, 0.5], vec![0.25, 0.6]])?;
    let n_seeded = seed_history(&mut state, |x| f64::abs(x[1] - 0.5) <= ELL, |x| {
        1.0e3 * 0.25 * GC / ELL * (1.0 - f64::abs(x[1] - 0.5) / ELL)
    });
    assert_eq!(n_seeded, 1);
    let seeded_value = state.gauss[0].history;

    // run
    let mut solver = SolverQuasiStatic::new(&config, &loading, convergence)?;
    let mut assembler = MockAssembler { received: Vec::new() };
    let mut file_io = FileIo::new();
    solver.solve(&mut state, &mut assembler, &mut SingleRank, &mut file_io)?;

    // exactly three accepted steps at t = 1, 2, 3
    assert_eq!(solver.convergence.n_accepted(), 3);
    assert_eq!(solver.convergence.n_rejected(), 0);
    assert_eq!(assembler.received.len(), 3);
    for (i, (t_trial, value)) in assembler.received.iter().enumerate() {
        let t_expected = (i + 1) as f64;
        approx_eq(*t_trial, t_expected, 1e-14);
        approx_eq(*value, 10.0 * t_expected, 1e-13);
    }

    // the run ends exactly at the final time with the last prescribed value
    assert_eq!(state.t, 3.0);
    approx_eq(state.uu[0], 30.0, 1e-13);

    // committed times are recorded once each and monotone
    assert_eq!(file_io.times, &[0.0, 1.0, 2.0, 3.0]);
    assert!(file_io.times.windows(2).all(|w| w[0] < w[1]));

    // the pre-crack seed passed through the run untouched
    assert_eq!(state.gauss[0].history, seeded_value);
    assert_eq!(state.gauss[1].history, 0.0);
    Ok(())
}
