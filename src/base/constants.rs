/// Defines the directory where the simulation result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/fracsim/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/fracsim/test";

/// Defines the default tolerance to consider two boundary nodes coincident
pub const DEFAULT_INTERFACE_TOL: f64 = 1e-6;
