pub mod error;
pub mod form;
pub mod presenter;
pub mod session;
pub mod traits;
pub mod voice;
