use std::fmt;

/// Route declaration error
///
/// Both variants describe a bug in how routes were declared, not a runtime
/// condition. [`ConstraintRegistry::constrain`](super::ConstraintRegistry::constrain)
/// panics with this error; [`try_constrain`](super::ConstraintRegistry::try_constrain)
/// hands it back for callers that load routes from data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A constraint named a parameter the route does not declare
    UnknownParameter {
        /// The parameter name passed to the constraint
        name: String,
        /// The route pattern that was just registered
        path: String,
    },
    /// The constraint body is not a valid regular expression
    InvalidPattern {
        /// The parameter the constraint was meant for
        name: String,
        /// The pattern as written
        pattern: String,
        /// Compiler message from the regex engine
        reason: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnknownParameter { name, path } => {
                write!(f, "route '{path}' does not contain parameter <{name}>")
            }
            RouteError::InvalidPattern {
                name,
                pattern,
                reason,
            } => {
                write!(
                    f,
                    "invalid constraint '{pattern}' for parameter <{name}>: {reason}"
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}
