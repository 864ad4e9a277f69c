// Users resource access
pub mod client;
pub mod gateway;
pub mod users;

// Re-export commonly used items
pub use client::{api_call, set_silent};
pub use gateway::{GatewayError, MutationOutcome, UsersGateway};
pub use users::HttpUsersGateway;
