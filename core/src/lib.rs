pub mod engine;
pub mod net;
pub mod probe;
