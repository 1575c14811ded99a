pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod registry;

pub use diagnostics::Diagnostic;
pub use error::RegistryError;
pub use geometry::{Vec2, Viewport};
pub use registry::{Registry, ServiceDescriptor, ServiceRecord};
