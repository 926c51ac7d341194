pub mod canvas;

pub use canvas::{CanvasError, ErrorKind};
