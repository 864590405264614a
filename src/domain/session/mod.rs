pub mod session_resource;
pub mod timeout_controller;

pub use session_resource::SessionResource;
pub use timeout_controller::SessionTimeoutController;
