//! Media module: host strategies and the resolver that dispatches to them.

pub mod hosts;
pub mod item;
pub mod resolver;

pub use hosts::{default_strategies, HostStrategy};
pub use item::{MediaArtifact, MediaOutcome};
pub use resolver::MediaResolver;
