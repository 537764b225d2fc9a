//! Debounced search over a live text input.
//!
//! `SearchSession` holds the transitions and no I/O; `spawn` runs one on a
//! tokio task against a `BookSearch` implementation.

mod driver;
mod session;

pub use driver::{spawn, SearchCommand, SearchHandle};
pub use session::{Effect, FetchRequest, RequestId, SearchSession, SearchState, NO_RESULTS_MESSAGE};
