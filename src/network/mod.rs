pub mod error_handler;
pub mod request_tracker;

pub use error_handler::ErrorHandler;
pub use request_tracker::RequestTracker;
