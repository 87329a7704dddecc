//! # State Module
//!
//! Session-scoped state managers.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Each test builds exactly the states it needs
//! 3. **Clearer Signatures**: Callers declare exactly what state they touch
//! 4. **Reduced Contention**: Independent states don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  CartState   │  │  AuthState   │  │  StoreAdapter    │              │
//! │  │              │  │              │  │  (shared mirror) │              │
//! │  │  Arc<Mutex<  │  │  user/token  │  │                  │              │
//! │  │    Cart      │  │  pair        │  │  cart, user,     │              │
//! │  │  >>          │  │              │  │  token keys      │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  OWNERSHIP: cart and auth state are exclusively owned by one active     │
//! │  session context; the durable copy is a cache, not authoritative.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;

pub use auth::{AuthState, Session};
pub use cart::CartState;
