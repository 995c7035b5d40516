pub mod config_store;
pub mod defaults;
pub mod llm;
pub mod recognizer;
pub mod runtime_engine;
pub mod secrets;
pub mod stt;
