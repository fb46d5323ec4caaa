pub mod environment;
pub mod error;
pub mod token;
pub mod types;
