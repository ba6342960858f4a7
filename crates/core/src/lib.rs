// ── Derived-value pipeline ──
pub mod aggregate;
pub mod index;
pub mod memo;
pub mod registry;

// ── Flows ──
pub mod selection;
pub mod unstake;

// ── Reactive engine ──
pub mod engine;

pub use engine::PortfolioEngine;
pub use registry::ChainRegistry;
pub use selection::SelectionPolicy;
pub use unstake::UnstakeFlow;
