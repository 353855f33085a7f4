/// Per-project configuration file, looked up in the project root.
pub const CONFIG_FILE: &str = "shipit.json";

/// Exit status when a command could not be launched (shell convention).
pub const EXIT_LAUNCH_FAILED: u8 = 127;

/// Exit status when a command was killed by a signal.
pub const EXIT_TERMINATED: u8 = 128;

/// Exit status for an unrecognized build target, matching clap's usage errors.
pub const EXIT_USAGE: u8 = 2;

/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;
