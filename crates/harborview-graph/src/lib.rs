pub mod builder;
pub mod color;
pub mod forest;
pub mod graph;
pub mod layout;
pub mod overlay;
pub mod sim;

pub use builder::build_graph;
pub use color::{Color, volume_color};
pub use forest::Forest;
pub use graph::{DependencyEdge, EdgeIndex, GraphModel, NodeIndex, ServiceNode};
pub use layout::assign_layout;
pub use overlay::{OverlayState, PortMarker, VolumeMarker};
pub use sim::{ForceRelaxation, Relaxation, SimulationAdapter, SimulationGraph, SimulationParams};
