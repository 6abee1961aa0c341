//! # cv-registry
//!
//! Case registry core for CaseVault.
//!
//! ## Role in System
//!
//! - **Sole Owner of the Index**: the backing key-value contract exposes only
//!   `get`/`set`, so the registry maintains its own ordered set of record keys
//!   under a well-known index key and actively defends its consistency.
//! - **Review Workflow**: every case starts `pending` and settles exactly once
//!   to `analyzed` (with an outcome) or `rejected`, driven by its owner.
//! - **Opaque Payloads**: case payloads are produced by the encryption
//!   gateway and never inspected here.
//!
//! ## Write Protocol
//!
//! ```text
//! submit_case:   encrypt ──→ reserve key ──→ write record:<key> ──→ append to index
//!                                             (orphan on crash is      (serialized +
//!                                              tolerated)               verify loop)
//!
//! transition:    read record ──→ ownership / pending checks ──→ analyze
//!                     ──→ re-read, still pending? ──→ write record back
//! ```
//!
//! The record is always written before the index entry: a crash between the
//! two steps leaves an invisible orphan record, never an index entry that
//! points at nothing.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use service::*;
