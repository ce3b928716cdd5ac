//! # Dice Core
//!
//! Die-roll histogram simulation with three interchangeable execution
//! strategies:
//!
//! - [`Sequential`]: one generator, one thread.
//! - [`EagerParallel`]: trials partitioned across a worker pool, chunks start
//!   running the moment they are dispatched.
//! - [`LazyDeferred`]: the same partition, but each chunk only runs when its
//!   result is requested, on the requesting thread.
//!
//! Every chunk owns an independently seeded [`DieRng`]; results travel back
//! to the caller by value and are merged with [`aggregate`]. No state is
//! shared between workers, so no locks are needed.
//!
//! ## Usage Example
//!
//! ```rust
//! use dice_core::{build_strategy, SimulationConfig, StrategyKind};
//!
//! let config = SimulationConfig::builder()
//!     .trials(60_000)
//!     .workers(4)
//!     .build()
//!     .unwrap();
//!
//! for kind in StrategyKind::ALL {
//!     let strategy = build_strategy(kind, &config).unwrap();
//!     let measurement = strategy.run(config.trials).unwrap();
//!     assert_eq!(measurement.histogram.total(), 60_000);
//! }
//! ```

#![deny(missing_docs)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod generator;
pub mod handle;
pub mod harness;
pub mod histogram;
pub mod partition;
pub mod report;
pub mod rng;
pub mod strategy;
pub mod timing;

pub use aggregate::aggregate;
pub use config::{detect_workers, SimulationConfig, DEFAULT_TRIALS};
pub use error::{Result, SimulationError};
pub use generator::{roll_histogram, ChunkKernel, RollGenerator};
pub use handle::{DeferredHandle, EagerHandle, WorkerHandle};
pub use harness::compare;
pub use histogram::{Histogram, FACES};
pub use partition::partition;
pub use report::{Comparison, OutputFormat};
pub use rng::{DieRng, SeedPolicy};
pub use strategy::{
    build_strategy, EagerParallel, ExecutionStrategy, LazyDeferred, Sequential, StrategyKind,
};
pub use timing::{Measurement, Timer};
