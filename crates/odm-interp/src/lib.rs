//! `odm-interp` — the fill engine for sparse travel-cost matrices.
//!
//! # Passes
//!
//! ```text
//! build:  validate config → resolve cells → neighbor graph → snapshot
//! run:
//!   ① Cascade          — each missing off-diagonal pair, ascending:
//!                        reverse → multi-origin avg → multi-origin/dest avg
//!                        → middleman → double middleman  (first answer wins;
//!                        strategies read the measured snapshot only)
//!   ② Manual overrides — unresolved pairs via substitute cell + offset
//!   ③ Reverse fallback — unresolved pairs whose reverse is now filled
//!   ④ Outliers         — lattice pairs: average or clamp asymmetric costs
//!   ⑤ Self-distance    — diagonals from lattice half-costs, else mean of means
//! finalize → FillOutcome { matrix, graph, unresolved, diagnostics }
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Builds the neighbor graph on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use odm_core::FillConfig;
//! use odm_interp::{FillEngineBuilder, LogObserver};
//!
//! let mut engine = FillEngineBuilder::from_document(FillConfig::default(), doc)?.build()?;
//! engine.run(&mut LogObserver);
//! let outcome = engine.finalize();
//! ```

pub mod builder;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod observer;
pub mod postprocess;
pub mod strategy;
pub mod unresolved;


pub use builder::FillEngineBuilder;
pub use diagnostics::{Diagnostics, StrategyCounters};
pub use engine::{FillEngine, FillOutcome};
pub use error::{FillError, FillResult};
pub use observer::{FillObserver, LogObserver, NoopObserver, Pass, Progress};
pub use strategy::{Strategy, StrategyInput};
pub use unresolved::UnresolvedPairs;
