//! Test harness for the meshing pipeline.
//!
//! Provides programmatic tools for scripting profile-to-solid workflows,
//! verifying correctness at every step, and generating diagnostic output.
//!
//! # Key Components
//!
//! - [`ModelBuilder`] - Fluent API for building and verifying extruded models
//! - [`oracle`] - Verification functions returning pass/fail verdicts
//! - [`report`] - Structured text model descriptions
//! - [`helpers`] - Error type, profile builders, mesh math
//! - [`assertions`] - Assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::ModelReport;
pub use workflow::ModelBuilder;
