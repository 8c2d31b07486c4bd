//! # MECA Deploy Test Suite
//!
//! End-to-end flows across the pipeline crates, run against an in-memory
//! ledger that verifies every signed transaction it receives.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures/        # InMemoryLedger, FixtureCompiler, accounts and sources
//! └── integration/     # Cross-crate flows
//!     ├── pipeline_flow.rs      # nonce, preflight, receipt behaviour
//!     ├── deployment_flow.rs    # DAO -> Scheduler -> Host/Tower/Task wiring
//!     ├── registration_flow.rs  # participants and content identifiers
//!     └── runtime_flow.rs       # md-deploy runtime with files on disk
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p md-tests
//! cargo test -p md-tests integration::deployment_flow
//!
//! # Benchmarks
//! cargo bench -p md-tests
//! ```

pub mod fixtures;
pub mod integration;
