pub mod client;
pub mod endpoint;
pub mod search;
pub mod transport;

pub use client::PlatformClient;
pub use endpoint::{ApiEndpoint, SearchResource};
pub use search::PlatformSearch;
pub use transport::{ApiRequest, HttpTransport, Transport};
