use std::path::PathBuf;

/// Loads variables from a `.env` file in the working directory, if any, and
/// returns where it was found. Runs before the logger exists, so the caller
/// reports the outcome.
pub fn init() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}
