use thiserror::Error;

/// Error type for registry construction failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate service name: {0}")]
    DuplicateService(String),
}
