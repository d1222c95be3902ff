use super::{ControlTime, ConvergenceControl, FemState, FileIo, IncrementSolver, SolveOutcome, StepSync};
use crate::base::{Config, Loading};
use crate::StrError;

/// Implements the adaptive quasi-static time stepping driver
///
/// Advances the nonlinear problem from `t_ini` to `t_fin` one increment at a
/// time. Each trial step evaluates the loading program at the trial time,
/// delegates one nonlinear increment to the external assembler/solver, and
/// judges the reported residual norms against the per-field tolerances. The
/// accept/reject decision is collective: every rank passes its local flag
/// through [StepSync] and all ranks transition together. A rejected trial is
/// fully discarded and retried from the last committed time with half the
/// step size; an accepted step is committed and recorded exactly once.
pub struct SolverQuasiStatic<'a> {
    /// Holds configuration parameters
    pub config: &'a Config,

    /// Holds the time-dependent loading program
    pub loading: &'a Loading,

    /// Holds the per-field convergence tolerances and step counters
    pub convergence: ConvergenceControl<'a>,

    /// Holds the adaptive step-size control
    control_time: ControlTime<'a>,
}

impl<'a> SolverQuasiStatic<'a> {
    /// Allocates a new instance
    pub fn new(
        config: &'a Config,
        loading: &'a Loading,
        convergence: ConvergenceControl<'a>,
    ) -> Result<Self, StrError> {
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate simulation because config.validate() failed");
        }
        if convergence.n_fields() == 0 {
            return Err("at least one field tolerance must be registered");
        }
        let control_time = ControlTime::new(config)?;
        Ok(SolverQuasiStatic {
            config,
            loading,
            convergence,
            control_time,
        })
    }

    /// Advances the simulation until the final time
    ///
    /// On success, `state.t` ends exactly at `t_fin`. On a fatal
    /// nonconvergence (Δt underflow), the error is returned with `state`
    /// restored to the last committed step, so partial results remain usable.
    pub fn solve(
        &mut self,
        state: &mut FemState,
        solver: &mut dyn IncrementSolver,
        sync: &mut dyn StepSync,
        file_io: &mut FileIo,
    ) -> Result<(), StrError> {
        // helper macro to save the summary before returning an error
        macro_rules! run {
            ($e:expr) => {
                match $e {
                    Ok(val) => val,
                    Err(err) => {
                        match file_io.write_self() {
                            Ok(_) => (),
                            Err(e) => println!("ERROR-ON-ERROR: cannot write summary due to: {}", e),
                        }
                        return Err(err);
                    }
                }
            };
        }

        // initialize time and Δt
        self.control_time.initialize(state);

        // first output
        file_io.write_state(state)?;

        // message
        self.convergence.print_header();

        // time loop
        let mut timestep = 0;
        while !self.control_time.finished(state) {
            // target time of this trial (the last step lands exactly on t_fin)
            let t_trial = self.control_time.target(state);

            // prescribed boundary values at the trial time
            let prescribed = run!(self.loading.evaluate(t_trial));

            // snapshot to discard the trial state on rejection
            let backup = state.clone();

            // one nonlinear increment by the external assembler/solver
            let outcome = run!(solver.solve_increment(state, t_trial, &prescribed));

            // local convergence flag (a hard failure never converges)
            let local_ok = match outcome {
                SolveOutcome::Residuals(norms) => run!(self.convergence.all_converged(&norms)),
                SolveOutcome::Failed => false,
            };

            // collective agreement: no rank accepts a step unilaterally
            let all_ok = run!(sync.all_ranks_agree(local_ok));

            if all_ok {
                // commit the trial state and advance
                self.control_time.accept(state, t_trial);
                self.convergence.add_accepted();
                self.convergence.print_accepted(timestep, state.t, state.dt);
                file_io.write_state(state)?;
            } else {
                // discard the trial state and retry with half the step
                *state = backup;
                self.convergence.add_rejected();
                self.convergence.print_rejected(timestep, t_trial, state.dt);
                run!(self.control_time.reject(state));
            }
            timestep += 1;
        }

        // message and summary file
        self.convergence.print_footer();
        file_io.write_self()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
