//! Provider Adapter System
//! Provides a unified `generate` interface over the supported wire protocols

pub mod factory;
pub mod traits;

mod base;
mod openai;
mod qwen;

pub use factory::AdapterFactory;
pub use traits::GenerationResult;
