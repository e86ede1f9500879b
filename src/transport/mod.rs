pub mod http;
pub mod landing;
pub mod message;
pub mod publish;
pub mod sse;


pub use http::{AppState, build_router, serve, start_server};
pub use message::PublishRequest;
