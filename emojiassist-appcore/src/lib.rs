pub mod service;

pub use service::{AppService, AssistSession};
