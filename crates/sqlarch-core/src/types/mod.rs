//! Domain types shared by the orchestrator and front ends

mod dialect;
mod mode;
mod request;
mod result;

pub use dialect::Dialect;
pub use mode::Mode;
pub use request::ProcessingRequest;
pub use result::ProcessingResult;
