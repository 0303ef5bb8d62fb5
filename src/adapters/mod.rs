// Adapters layer: concrete clients for external systems.

pub mod telegram;
