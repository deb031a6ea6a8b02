pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod render;
pub mod session;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{Result, ViewerError};
pub use session::Session;
