//! Lloyd prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::param_guard::{Fit, ParamGuard};

#[doc(no_inline)]
pub use crate::dataset::{records_from_rows, Float};

#[doc(no_inline)]
pub use crate::k_means::{IterationCallback, IterationReport, KMeans, KMeansError};
