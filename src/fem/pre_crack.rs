use super::FemState;
use crate::{FnRegion, FnValue};

/// Seeds the history variable of integration points lying inside a region
///
/// Assigns `value(x)` to the history slot of every integration point whose
/// global coordinates `x` satisfy `region(x)`. Every qualifying point is
/// visited exactly once and the assignment is a pure overwrite, so the result
/// does not depend on the order of visitation. Points outside the region keep
/// their current history value.
///
/// This is typically used before the first time step to represent a
/// pre-existing crack: the region is a narrow band around the flaw and the
/// value function is a decay of a characteristic energy density with the
/// distance from the crack line. Both are configuration inputs.
///
/// Returns the number of seeded points.
///
/// # Examples
///
/// ```
/// use fracsim::fem::{seed_history, FemState};
/// use fracsim::StrError;
///
/// fn main() -> Result<(), StrError> {
///     let mut state = FemState::new(2, &[vec![0.2, 0.5], vec![0.2, 0.9]])?;
///     let n = seed_history(&mut state, |x| x[1] <= 0.6, |x| 1.0 - x[1]);
///     assert_eq!(n, 1);
///     assert_eq!(state.gauss[0].history, 0.5);
///     assert_eq!(state.gauss[1].history, 0.0);
///     Ok(())
/// }
/// ```
pub fn seed_history(state: &mut FemState, region: FnRegion, value: FnValue) -> usize {
    let mut count = 0;
    for gauss in &mut state.gauss {
        if region(&gauss.coords) {
            gauss.history = value(&gauss.coords);
            count += 1;
        }
    }
    count
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
