/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Tracked instance proxy.
//!
//! [`Tracked`] owns a value of the target type together with its identity
//! handle. Calls routed through [`Tracked::call`] and [`Tracked::call_mut`]
//! are checked by the registry before they reach the value.

use super::error::CallOrderError;
use super::instance::{InstanceHandle, InstanceId};
use super::order::TrackedMethod;
use super::registry::SequenceRegistry;
use std::fmt;
use std::sync::Arc;

/// A value whose method calls are checked against its type's call orders.
///
/// Built by [`SequenceRegistry::track`]. Dropping it removes the instance
/// from every tracker.
///
/// # Examples
///
/// ```
/// use callorder_rs::{CallOrder, SequenceRegistry};
///
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Counter {
///     fn hit(&mut self) -> u32 {
///         self.hits += 1;
///         self.hits
///     }
/// }
///
/// let registry = SequenceRegistry::new("Counter", [CallOrder::new(["open", "hit", "close"])]);
/// let mut counter = registry.track(Counter { hits: 0 });
///
/// counter.call("open", |_| ()).unwrap();
/// assert_eq!(counter.call_mut("hit", Counter::hit).unwrap(), 1);
///
/// // `peek` is not part of any order and is never checked.
/// assert_eq!(counter.call("peek", |c| c.hits).unwrap(), 1);
/// ```
pub struct Tracked<T, M: TrackedMethod> {
    value: T,
    handle: Arc<InstanceHandle>,
    registry: Arc<SequenceRegistry<M>>,
}

impl<T, M: TrackedMethod> Tracked<T, M> {
    /// Wraps `value` and registers it with every order of `registry`.
    #[must_use]
    pub fn new(registry: Arc<SequenceRegistry<M>>, value: T) -> Self {
        let handle = InstanceHandle::new();
        registry.register(&handle);
        Self {
            value,
            handle,
            registry,
        }
    }

    /// Calls `f` on the value as `method`, if the call is in order.
    ///
    /// # Errors
    ///
    /// Returns the [`CallOrderError`] raised by the first order that rejects
    /// the call; `f` is not run in that case.
    pub fn call<R>(&self, method: M, f: impl FnOnce(&T) -> R) -> Result<R, CallOrderError> {
        self.registry.intercept(&self.handle, &method)?;
        Ok(f(&self.value))
    }

    /// Calls `f` on the value mutably as `method`, if the call is in order.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub fn call_mut<R>(
        &mut self,
        method: M,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, CallOrderError> {
        self.registry.intercept(&self.handle, &method)?;
        Ok(f(&mut self.value))
    }

    /// Resumes checking of `order` for this instance.
    ///
    /// # Errors
    ///
    /// See [`SequenceRegistry::enable`].
    pub fn enable_call_tracking(&self, order: &[M]) -> Result<(), CallOrderError> {
        self.registry.enable(&self.handle, order)
    }

    /// Suspends checking of `order`, or of every order when `None`.
    ///
    /// # Errors
    ///
    /// See [`SequenceRegistry::disable`].
    pub fn disable_call_tracking(&self, order: Option<&[M]>) -> Result<(), CallOrderError> {
        self.registry.disable(&self.handle, order)
    }

    /// Returns the value without any order check.
    #[inline]
    #[must_use]
    pub fn get_untracked(&self) -> &T {
        &self.value
    }

    /// Returns this instance's identity.
    #[inline]
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.handle.id()
    }

    /// Returns this instance's handle, as known to the trackers.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> &Arc<InstanceHandle> {
        &self.handle
    }

    /// Returns the registry this instance is tracked by.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<SequenceRegistry<M>> {
        &self.registry
    }
}

impl<T, M: TrackedMethod> Drop for Tracked<T, M> {
    fn drop(&mut self) {
        self.registry.clean(&self.handle);
    }
}

impl<T: fmt::Debug, M: TrackedMethod> fmt::Debug for Tracked<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("id", &self.handle.id())
            .field("target", &self.registry.target())
            .field("value", &self.value)
            .finish()
    }
}
