pub mod config;
pub mod examples;
pub mod prompt;
pub mod text;
pub mod types;
pub mod validation;

// Keep the public surface small and intentional.
pub use config::*;
pub use examples::*;
pub use prompt::*;
pub use text::*;
pub use types::*;
pub use validation::*;
