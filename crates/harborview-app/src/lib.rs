pub mod controller;

pub use controller::TopologyController;
