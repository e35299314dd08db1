pub mod container;
pub mod controller;
pub mod router;

pub use container::{Container, ContainerConfig, Provider};
pub use router::Router;
