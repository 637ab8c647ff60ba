pub mod diagnostics;
pub mod health;
pub mod metrics;
pub mod products;
pub mod seed;
