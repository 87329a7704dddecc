//! # astra-store: Durable Storage Layer for Astra Commerce
//!
//! This crate provides the durable key-value substrate the session state
//! managers mirror into, plus the typed [`StoreAdapter`] that owns the
//! corruption-recovery policy.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Astra Commerce Data Flow                            │
//! │                                                                         │
//! │  State manager mutation (CartState::add, AuthState::login, ...)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    astra-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ StoreAdapter  │    │ KeyValueStore │    │    keys      │  │   │
//! │  │   │ (adapter.rs)  │    │   (kv.rs)     │    │  (keys.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ typed load/   │───►│ MemoryStore   │    │ cart, user,  │  │   │
//! │  │   │ save + fail-  │    │ FileStore     │    │ token,       │  │   │
//! │  │   │ soft recovery │    │               │    │ reviews      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  One JSON file per key (FileStore) or a process-local map (Memory)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `KeyValueStore` trait and its implementations
//! - [`adapter`] - Typed `StoreAdapter` with the fail-soft policy
//! - [`keys`] - The key namespace
//! - [`error`] - Storage error types (contained behind the adapter)
//!
//! ## Usage
//!
//! ```rust
//! use astra_store::{keys, StoreAdapter};
//!
//! let adapter = StoreAdapter::in_memory();
//!
//! adapter.save(keys::TOKEN, &"mock-jwt-token-string".to_string());
//! let token: Option<String> = adapter.load(keys::TOKEN);
//! assert!(token.is_some());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adapter;
pub mod error;
pub mod keys;
pub mod kv;

// =============================================================================
// Re-exports
// =============================================================================

pub use adapter::StoreAdapter;
pub use error::{StoreError, StoreResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
