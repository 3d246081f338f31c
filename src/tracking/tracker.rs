/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Core call-order tracker.
//!
//! A [`SequenceTracker`] enforces one declared call order across all of its
//! tracked instances. Each instance has its own cursor into the order, an
//! enabled/disabled state, and at most one pending failure record.

use super::cursor::Cursor;
use super::error::CallOrderError;
use super::instance::{InstanceHandle, InstanceId};
use super::order::{CallOrder, TrackedMethod};
use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// Number of [`SequenceTracker::add`] calls between two sweeps of expired
/// entries.
pub(crate) const PRUNE_INTERVAL: usize = 64;

/// Tracking state of a registered instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingState {
    /// Calls are checked against the cursor.
    Enabled,

    /// Calls pass through unchecked; the cursor is kept as it was.
    Disabled,
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Tracking state of one instance within one tracker.
#[derive(Debug)]
struct TrackedEntry<M> {
    instance: Weak<InstanceHandle>,
    state: TrackingState,
    cursor: Cursor<M>,
    /// Expected method remembered after an out-of-order call.
    pending: Option<M>,
}

/// Enforces a single call order for every instance registered with it.
///
/// The tracker is `Send + Sync`. Per-instance state lives in a sharded map,
/// and the compare-and-advance step of a call runs under the entry lock, so
/// concurrent calls on one instance are linearized. The lock is released
/// before any wrapped closure runs.
///
/// # Examples
///
/// ```
/// use callorder_rs::{CallOrder, CallOrderError, InstanceHandle, SequenceTracker};
///
/// let tracker = SequenceTracker::new("Dummy", &CallOrder::new(["f1", "f2"]));
/// let dummy = InstanceHandle::new();
/// tracker.add(&dummy);
///
/// tracker.check(&dummy, &"f1").unwrap();
/// let err = tracker.check(&dummy, &"f1").unwrap_err();
/// assert_eq!(
///     err,
///     CallOrderError::OutOfOrder { found: "f1".into(), expected: "f2".into() }
/// );
/// tracker.check(&dummy, &"f2").unwrap();
/// assert!(tracker.check(&dummy, &"f1").unwrap_err().is_exhausted());
/// ```
#[derive(Debug)]
pub struct SequenceTracker<M: TrackedMethod> {
    /// Name of the type this order is declared on.
    target: Arc<str>,

    /// Declared methods, shared with every cursor.
    order: Arc<[M]>,

    repeatable: bool,

    instances: DashMap<InstanceId, TrackedEntry<M>>,

    /// Registrations since the tracker was created.
    additions: AtomicUsize,
}

impl<M: TrackedMethod> SequenceTracker<M> {
    /// Creates a tracker for `order` declared on `target`.
    #[must_use]
    pub fn new(target: impl Into<Arc<str>>, order: &CallOrder<M>) -> Self {
        let target = target.into();
        for method in order.methods() {
            debug!("setting {} of {}", method.name(), target);
        }
        Self {
            target,
            order: Arc::from(order.methods()),
            repeatable: order.is_repeatable(),
            instances: DashMap::new(),
            additions: AtomicUsize::new(0),
        }
    }

    /// Returns the declared methods, which also serve as this order's handle.
    #[inline]
    #[must_use]
    pub fn order(&self) -> &[M] {
        &self.order
    }

    /// Returns `true` if the order wraps around.
    #[inline]
    #[must_use]
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// Returns the name of the type this order is declared on.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns `true` if `method` is part of this order.
    #[inline]
    #[must_use]
    pub fn contains(&self, method: &M) -> bool {
        self.order.contains(method)
    }

    /// Registers `instance` in the enabled state with a fresh cursor.
    ///
    /// Re-adding an instance that is already tracked starts a new cycle:
    /// the cursor goes back to the first method, any pending failure is
    /// dropped and the instance is enabled.
    ///
    /// Every 64 registrations, entries whose handle has been dropped are
    /// swept as by [`prune_expired`](Self::prune_expired).
    pub fn add(&self, instance: &Arc<InstanceHandle>) {
        debug!("registering {} {:?}", instance, self.order);
        let entry = TrackedEntry {
            instance: Arc::downgrade(instance),
            state: TrackingState::Enabled,
            cursor: Cursor::new(Arc::clone(&self.order), self.repeatable),
            pending: None,
        };
        self.instances.insert(instance.id(), entry);

        if (self.additions.fetch_add(1, Ordering::Relaxed) + 1) % PRUNE_INTERVAL == 0 {
            self.prune_expired();
        }
    }

    /// Resumes checking for a disabled instance.
    ///
    /// # Errors
    ///
    /// Returns [`CallOrderError::NotFound`] if the instance is not disabled.
    pub fn enable(&self, instance: &InstanceHandle) -> Result<(), CallOrderError> {
        self.transition(instance, TrackingState::Disabled, TrackingState::Enabled)
    }

    /// Suspends checking for an enabled instance, keeping its cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CallOrderError::NotFound`] if the instance is not enabled.
    pub fn disable(&self, instance: &InstanceHandle) -> Result<(), CallOrderError> {
        self.transition(instance, TrackingState::Enabled, TrackingState::Disabled)
    }

    fn transition(
        &self,
        instance: &InstanceHandle,
        from: TrackingState,
        to: TrackingState,
    ) -> Result<(), CallOrderError> {
        let id = instance.id();
        match self.instances.get_mut(&id) {
            Some(mut entry) if entry.state == from => {
                entry.state = to;
                debug!("{} {} for {:?}", id, to, self.order);
                Ok(())
            }
            _ => Err(CallOrderError::NotFound {
                instance: id,
                wanted: from,
            }),
        }
    }

    /// Removes all tracking state of `instance`. Absence is not an error.
    pub fn clean(&self, instance: &InstanceHandle) {
        if self.instances.remove(&instance.id()).is_some() {
            debug!("cleaned {} from {:?}", instance, self.order);
        }
    }

    /// Removes every tracked instance.
    pub fn clean_all(&self) {
        self.instances.clear();
    }

    /// Removes entries whose instance handle has been dropped.
    ///
    /// Returns the number of entries removed.
    pub fn prune_expired(&self) -> usize {
        let before = self.instances.len();
        self.instances.retain(|id, entry| {
            let alive = entry.instance.strong_count() > 0;
            if !alive {
                debug!("pruning {}: found empty weak reference", id);
            }
            alive
        });
        before.saturating_sub(self.instances.len())
    }

    /// Checks a call of `method` on `instance` and advances its position.
    ///
    /// Disabled instances pass unchecked. Otherwise the expected method is
    /// the pending one left by a previous violation, or the next one from the
    /// cursor. On a mismatch the expected method is remembered so that a
    /// retry with the correct method succeeds.
    ///
    /// # Errors
    ///
    /// - [`CallOrderError::UnknownInstance`] if the instance was never added
    ///   or has been cleaned
    /// - [`CallOrderError::Exhausted`] if a non-repeatable order was fully
    ///   consumed
    /// - [`CallOrderError::OutOfOrder`] if `method` is not the expected one
    pub fn check(&self, instance: &InstanceHandle, method: &M) -> Result<(), CallOrderError> {
        let id = instance.id();
        let Some(mut entry) = self.instances.get_mut(&id) else {
            return Err(CallOrderError::UnknownInstance(id));
        };

        if entry.state == TrackingState::Disabled {
            return Ok(());
        }

        let expected = match entry.pending.take() {
            Some(expected) => expected,
            None => entry
                .cursor
                .next()
                .ok_or(CallOrderError::Exhausted(id))?,
        };

        if &expected == method {
            trace!("{} called {}", id, method.name());
            return Ok(());
        }

        debug!(
            "{} called {} instead of {}",
            id,
            method.name(),
            expected.name()
        );
        let err = CallOrderError::OutOfOrder {
            found: method.name().to_owned(),
            expected: expected.name().to_owned(),
        };
        entry.pending = Some(expected);
        Err(err)
    }

    /// Returns an interception wrapper around `f` for calls of `method`.
    ///
    /// The wrapper checks every call with [`check`](Self::check) and only
    /// runs `f` if the call is accepted.
    pub fn wrap<A, R, F>(
        &self,
        method: M,
        f: F,
    ) -> impl Fn(&InstanceHandle, A) -> Result<R, CallOrderError>
    where
        F: Fn(A) -> R,
    {
        move |instance: &InstanceHandle, arg: A| {
            self.check(instance, &method)?;
            Ok(f(arg))
        }
    }

    /// Returns the tracking state of `instance`, or `None` if unregistered.
    #[must_use]
    pub fn state(&self, instance: &InstanceHandle) -> Option<TrackingState> {
        self.instances.get(&instance.id()).map(|entry| entry.state)
    }

    /// Returns `true` if `instance` is registered and enabled.
    #[must_use]
    pub fn is_enabled(&self, instance: &InstanceHandle) -> bool {
        self.state(instance) == Some(TrackingState::Enabled)
    }

    /// Returns `true` if `instance` is registered and disabled.
    #[must_use]
    pub fn is_disabled(&self, instance: &InstanceHandle) -> bool {
        self.state(instance) == Some(TrackingState::Disabled)
    }

    /// Returns the method remembered after an out-of-order call, if any.
    #[must_use]
    pub fn pending(&self, instance: &InstanceHandle) -> Option<M> {
        self.instances
            .get(&instance.id())
            .and_then(|entry| entry.pending.clone())
    }

    /// Returns the method the next checked call on `instance` must be.
    #[must_use]
    pub fn expected(&self, instance: &InstanceHandle) -> Option<M> {
        let entry = self.instances.get(&instance.id())?;
        entry
            .pending
            .clone()
            .or_else(|| entry.cursor.peek().cloned())
    }

    /// Returns the number of registered instances, including expired ones
    /// not yet swept.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if no instance is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
