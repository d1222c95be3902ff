use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the state of one integration (Gauss) point
///
/// The scalar history variable drives irreversible damage evolution; it is
/// carried across time steps by the external assembler and may be seeded
/// before the first step to represent a pre-existing flaw
/// (see [crate::fem::seed_history]).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GaussState {
    /// Global coordinates of the integration point
    pub coords: Vec<f64>,

    /// Scalar history variable (e.g. maximum stored energy density)
    pub history: f64,
}

/// Holds the state of a simulation
///
/// The state is an explicit object passed to and returned from each step of
/// the driver; there is no hidden process-wide simulation state. On a
/// rejected trial step the driver discards the whole trial state, so after an
/// error `t` always equals the last committed (stable) time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FemState {
    /// Time
    pub t: f64,

    /// Time increment
    pub dt: f64,

    /// Primary unknowns {U} (updated by the external assembler/solver)
    pub uu: Vector,

    /// Holds the history state at all integration (Gauss) points
    pub gauss: Vec<GaussState>,
}

impl FemState {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `ndof` -- total number of primary unknowns
    /// * `gauss_coords` -- global coordinates of all integration points,
    ///   as reported by the external assembler (may be empty)
    pub fn new(ndof: usize, gauss_coords: &[Vec<f64>]) -> Result<Self, StrError> {
        if ndof == 0 {
            return Err("there are no degrees of freedom");
        }
        let gauss = gauss_coords
            .iter()
            .map(|coords| GaussState {
                coords: coords.clone(),
                history: 0.0,
            })
            .collect();
        Ok(FemState {
            t: 0.0,
            dt: 0.0,
            uu: Vector::new(ndof),
            gauss,
        })
    }

    /// Reads a JSON file containing the state
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(file);
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(state)
    }

    /// Writes a JSON file with the state
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
