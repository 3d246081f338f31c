/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Call-order tracking for instances of a declared type.
//!
//! This module provides the two cooperating pieces of the crate:
//!
//! - [`SequenceRegistry`] binds one or more [`CallOrder`]s to a target type
//!   and registers every newly tracked instance with each of them.
//! - [`SequenceTracker`] enforces a single call order across all of its
//!   instances, remembering the next expected method for each one.
//!
//! # Architecture
//!
//! - A registry is declared once per target type and shared behind an `Arc`
//! - [`SequenceRegistry::track`] wraps a value into a [`Tracked`] proxy and
//!   puts it in the enabled state of every tracker
//! - Each [`Tracked::call`] is checked by every tracker whose order contains
//!   the called method, then the wrapped closure runs
//! - Trackers hold only weak references to instance handles; dropping the
//!   proxy cleans its entries
//!
//! # Examples
//!
//! ```
//! use callorder_rs::tracking::{CallOrder, SequenceRegistry, TrackedMethod};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Step {
//!     Setup,
//!     Run,
//!     Teardown,
//! }
//!
//! impl TrackedMethod for Step {
//!     fn name(&self) -> &str {
//!         match self {
//!             Step::Setup => "setup",
//!             Step::Run => "run",
//!             Step::Teardown => "teardown",
//!         }
//!     }
//! }
//!
//! let registry = SequenceRegistry::new(
//!     "Benchmark",
//!     [CallOrder::new([Step::Setup, Step::Run, Step::Teardown]).repeatable(true)],
//! );
//!
//! let bench = registry.track(());
//! for _ in 0..3 {
//!     bench.call(Step::Setup, |_| ()).unwrap();
//!     bench.call(Step::Run, |_| ()).unwrap();
//!     bench.call(Step::Teardown, |_| ()).unwrap();
//! }
//! ```

pub mod cursor;
pub mod error;
pub mod instance;
pub mod order;
pub mod registry;
pub mod tracked;
pub mod tracker;

#[cfg(test)]
mod tests;

// Re-export main types
pub use cursor::Cursor;
pub use error::{CallOrderError, DeclarationError};
pub use instance::{InstanceHandle, InstanceId};
pub use order::{CallOrder, SequenceOptions, TrackedMethod};
pub use registry::{CallOrdered, SequenceRegistry};
pub use tracked::Tracked;
pub use tracker::{SequenceTracker, TrackingState};
