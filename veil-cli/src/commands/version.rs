//! `veil version` command - Display version information.

use crate::error::CliResult;
use crate::output::{self, kv};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Binary name
const NAME: &str = "veil";

/// Run the version command
pub async fn run() -> CliResult<()> {
    output::header("Veil");

    kv("Version", VERSION);
    kv("Binary", NAME);

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);
    kv(
        "Enum values",
        veil_core::EnumValueNumbering::default().as_str(),
    );

    Ok(())
}
