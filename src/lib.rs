pub mod dispatch;
pub mod errors;
pub mod executor;
pub mod report;
pub mod request;
pub mod transcript;
