//! # Nonce Sequencer (MD-02)
//!
//! Issues strictly increasing transaction nonces per signing account.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the per-account counter table
//! - **Ports Layer** (`ports/`): `NonceSource`, the ledger query it seeds from
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | No nonce is issued twice for one address in a run | `NonceSequencer::next` holds the address slot lock across read + increment |
//! | INVARIANT-2 | Addresses never contend with each other | one slot per address |
//! | INVARIANT-3 | The ledger is queried once per address | slot is seeded under its own lock |
//!
//! ## Failure Policy
//!
//! A nonce handed out is never returned. If the transaction using it fails
//! before reaching the ledger the sequence has a gap; the caller either
//! resubmits with that nonce or calls `resync` after inspecting the ledger.

pub mod domain;
pub mod ports;

pub use domain::errors::NonceError;
pub use domain::sequencer::NonceSequencer;
pub use ports::outbound::NonceSource;
