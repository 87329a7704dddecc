//! # Request Generation Guard
//!
//! Guards against stale-response races between rapid navigation and
//! in-flight mock calls.
//!
//! ## The Race
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stale Response Race                                  │
//! │                                                                         │
//! │  t0: view A issues get_product("laptop")      [latency 300ms]           │
//! │  t1: user navigates to view B, bump()                                   │
//! │  t2: view B issues get_product("monitor")     [latency 300ms]           │
//! │  t3: the t0 response arrives ── WITHOUT a guard it overwrites B's data  │
//! │                                                                         │
//! │  With the guard:                                                        │
//! │    let ticket = generation.ticket();   // before issuing the call       │
//! │    let product = api.get_product(...).await;                            │
//! │    if ticket.is_current() { apply(product) } else { discard }           │
//! │                                                                         │
//! │  Mock calls have no cancellation (a pure delay); the caller is          │
//! │  expected to tolerate a response arriving after the UI moved on,        │
//! │  and this guard makes the discard decision explicit.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A monotonically increasing generation counter for one navigation
/// context.
///
/// Cloning shares the counter: the context that bumps and the requests
/// that check see the same value.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    /// Creates a counter at generation zero.
    pub fn new() -> Self {
        Generation::default()
    }

    /// The current generation.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Acquire)
    }

    /// Invalidates all outstanding tickets (call on navigation) and
    /// returns the new generation.
    pub fn bump(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Issues a ticket tagged with the current generation.
    pub fn ticket(&self) -> Ticket {
        Ticket {
            counter: Arc::clone(&self.counter),
            generation: self.current(),
        }
    }
}

/// A tag for one in-flight request.
#[derive(Debug, Clone)]
pub struct Ticket {
    counter: Arc<AtomicU64>,
    generation: u64,
}

impl Ticket {
    /// Checks whether the context this ticket was issued in is still the
    /// active one. A `false` means the response should be discarded.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.generation
    }

    /// The generation this ticket was issued at.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
