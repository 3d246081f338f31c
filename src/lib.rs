/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # callorder-rs
//!
//! Method call-order enforcement for Rust types.
//!
//! A type declares one or more ordered method sequences ("call orders"). Every
//! instance built through the type's [`SequenceRegistry`] is tracked by each
//! declared order independently, and every call made through the
//! [`Tracked`] proxy is checked against the instance's position in those
//! orders before the call runs.
//!
//! ## Features
//!
//! - **Strict ordering**: each successful call advances the position by
//!   exactly one step. No skipping, no look-ahead.
//! - **Repeatable orders**: a repeatable order wraps back to its first
//!   method immediately after its last one.
//! - **Independent orders**: disjoint orders declared on the same type
//!   progress concurrently without affecting each other.
//! - **Retry after violation**: after an out-of-order call, the expected
//!   method is remembered so the caller can recover by calling it.
//! - **Weak tracking**: trackers never keep an instance alive; dropping the
//!   proxy removes its tracking state.
//! - **Enable/disable**: tracking can be suspended per instance and per
//!   order, and resumed from where it was left.
//!
//! ## Example
//!
//! ```
//! use callorder_rs::{CallOrder, CallOrderError, SequenceRegistry};
//!
//! struct Context {
//!     deployed: bool,
//! }
//!
//! let registry = SequenceRegistry::new(
//!     "Context",
//!     [CallOrder::new(["init", "deploy", "undeploy"])],
//! );
//!
//! let mut context = registry.track(Context { deployed: false });
//!
//! context.call("init", |_| ()).unwrap();
//!
//! let err = context.call("undeploy", |_| ()).unwrap_err();
//! assert!(matches!(err, CallOrderError::OutOfOrder { .. }));
//!
//! context.call_mut("deploy", |c| c.deployed = true).unwrap();
//! context.call_mut("undeploy", |c| c.deployed = false).unwrap();
//!
//! let err = context.call("init", |_| ()).unwrap_err();
//! assert!(err.is_exhausted());
//! ```

pub mod tracking;

pub use tracking::{
    CallOrder, CallOrderError, CallOrdered, Cursor, DeclarationError, InstanceHandle, InstanceId,
    SequenceOptions, SequenceRegistry, SequenceTracker, Tracked, TrackedMethod, TrackingState,
};
