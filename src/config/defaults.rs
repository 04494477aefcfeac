//! Default configuration values

/// Project manifest file name
pub const PROJECT_MANIFEST: &str = "reactor.toml";

/// Module descriptor file name
pub const MODULE_MANIFEST: &str = "module.toml";

/// Default build tool program
pub const DEFAULT_PROGRAM: &str = "mvn";

/// Flag that passes the ordered include list to the build tool in reactor mode
pub const DEFAULT_INCLUDE_FLAG: &str = "--projects";

/// Goal applied when none is given
pub const DEFAULT_GOAL: &str = "install";

/// Separator between group and name in a module identifier
pub const GROUP_SEPARATOR: char = ':';

/// Separator for comma-delimited CLI lists
pub const LIST_SEPARATOR: char = ',';

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
