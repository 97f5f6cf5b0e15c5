pub mod aggregator_service;
pub mod copy_service;
pub mod loader_service;
pub mod normalizer_service;
pub mod renderer_service;

pub use aggregator_service::*;
pub use copy_service::*;
pub use loader_service::*;
pub use normalizer_service::*;
pub use renderer_service::*;
