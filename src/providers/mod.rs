//! Search provider implementations

pub mod tavily;

pub use tavily::TavilyProvider;
