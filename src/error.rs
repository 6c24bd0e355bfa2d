pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by problem construction and solving.
///
/// Infeasibility and timeout are *not* errors: they are reported through
/// [`Solution::is_satisfied`](crate::solver::solution::Solution). Only
/// structural problems (bad variable ids, empty domains) and type mismatches
/// escape to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("variable '{0}' is already defined")]
    DuplicateVariable(String),

    #[error("variable '{0}' has an empty initial domain")]
    EmptyDomain(String),

    #[error("constraint '{constraint}' references unknown variable '{variable}'")]
    UnknownVariable { constraint: String, variable: String },

    #[error("type mismatch in constraint '{constraint}': {details}")]
    TypeMismatch { constraint: String, details: String },
}
