pub mod auth_middleware;
pub mod canvas_client;
pub mod link_header;

pub use canvas_client::{CanvasClient, FetchResult, Method};
