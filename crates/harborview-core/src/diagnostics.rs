use serde::{Deserialize, Serialize};
use std::fmt;

/// Recoverable data-quality condition found while building or resolving
/// the topology. None of these abort a rebuild; the graph degrades to
/// fewer edges or a shallower forest and the condition is surfaced to the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Diagnostic {
    /// A `depends_on` entry names a service that does not exist in the
    /// registry. The edge was dropped.
    UnresolvedDependency { service: String, missing: String },
    /// A dependency cycle was detected. The cyclic branch was not
    /// expanded further. Members are listed in path order.
    DependencyCycle { members: Vec<String> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedDependency { service, missing } => {
                write!(f, "service '{service}' depends on unknown service '{missing}'")
            }
            Diagnostic::DependencyCycle { members } => {
                write!(f, "dependency cycle: {}", members.join(" -> "))
            }
        }
    }
}
