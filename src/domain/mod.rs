pub mod context;
pub mod models;
pub mod platform;
pub mod schema;
pub mod search;
pub mod session;
