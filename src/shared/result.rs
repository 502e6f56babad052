/// Crate-wide Result alias.
///
/// Typed failures are raised as `GateError` and carried inside `anyhow::Error`
/// so callers can downcast when the distinction matters (see `ExitCode::from_error`).
pub type Result<T> = std::result::Result<T, anyhow::Error>;
