//! `odm-output` — output writers for the odm workspace.
//!
//! | File                     | Contents                                          |
//! |--------------------------|---------------------------------------------------|
//! | `od_matrix_filled.json`  | completed matrix, same shape as the input         |
//! | `unresolved_pairs.json`  | `{"pairs": …}` with coordinates of both endpoints |
//! | `neighbors.json`         | extended neighbor set per cell (optional)         |
//! | `fill_summary.csv`       | `counter,value` rows from the run diagnostics     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use odm_output::OutputDir;
//!
//! let out = OutputDir::create(Path::new("./output"))?;
//! out.write_outcome(&engine.finalize(), true)?;
//! ```

pub mod documents;
pub mod error;
pub mod summary;
pub mod writer;


pub use documents::{Endpoints, NeighborDocument, UnresolvedDocument};
pub use error::{OutputError, OutputResult};
pub use summary::write_summary;
pub use writer::{MATRIX_FILE, NEIGHBORS_FILE, OutputDir, SUMMARY_FILE, UNRESOLVED_FILE};
