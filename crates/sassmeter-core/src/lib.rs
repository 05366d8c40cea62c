//! # Sassmeter-Core
//!
//! Scoring core of the sassmeter personality quiz: the question bank, trait
//! scoring, archetype classification, weirdest-answer selection and the
//! session state machine that ties them together.
//!
//! ## Data Flow
//!
//! ```text
//! answer -> Session -> compute_trait_scores -> Archetype::from_scores
//!                   \-> select_weirdest
//!                   \-> PendingNarrative (fulfilled by a narrative client)
//! ```

pub mod archetype;
pub mod error;
pub mod questions;
pub mod scoring;
pub mod session;
pub mod types;
pub mod weirdness;

pub use archetype::*;
pub use error::{Error, Result};
pub use questions::*;
pub use scoring::*;
pub use session::*;
pub use types::*;
pub use weirdness::*;
