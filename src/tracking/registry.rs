/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Binding of call orders to a target type.
//!
//! A [`SequenceRegistry`] is declared once per target type. It owns one
//! [`SequenceTracker`] per declared order and is shared behind an `Arc` by
//! every [`Tracked`] instance of that type.

use super::error::{CallOrderError, DeclarationError};
use super::instance::InstanceHandle;
use super::order::{CallOrder, TrackedMethod};
use super::tracked::Tracked;
use super::tracker::SequenceTracker;
use std::sync::Arc;
use tracing::{debug, warn};

/// A type that declares its own call orders.
///
/// # Examples
///
/// ```
/// use callorder_rs::{CallOrder, CallOrdered, SequenceRegistry};
///
/// struct StandaloneContext;
///
/// impl CallOrdered for StandaloneContext {
///     type Method = &'static str;
///
///     fn call_orders() -> Vec<CallOrder<Self::Method>> {
///         vec![CallOrder::new(["init", "deploy", "setup_context", "undeploy"])]
///     }
/// }
///
/// let registry = SequenceRegistry::declare::<StandaloneContext>();
/// assert_eq!(registry.trackers().len(), 1);
/// ```
pub trait CallOrdered {
    /// Method identity used by this type's orders.
    type Method: TrackedMethod;

    /// Returns the orders to enforce, in declaration order.
    fn call_orders() -> Vec<CallOrder<Self::Method>>;
}

/// Call orders declared for one target type.
///
/// # Examples
///
/// ```
/// use callorder_rs::{CallOrder, SequenceRegistry};
///
/// let registry = SequenceRegistry::new(
///     "MyClass",
///     [
///         CallOrder::new(["func1", "func2", "func3"]).repeatable(true),
///         CallOrder::new(["func4", "func5", "func6"]),
///     ],
/// );
///
/// let instance = registry.track(());
/// instance.call("func1", |_| ()).unwrap();
/// instance.call("func4", |_| ()).unwrap();
/// instance.call("func2", |_| ()).unwrap();
/// ```
#[derive(Debug)]
pub struct SequenceRegistry<M: TrackedMethod> {
    target: Arc<str>,
    trackers: Vec<SequenceTracker<M>>,
}

impl<M: TrackedMethod> SequenceRegistry<M> {
    /// Declares `orders` on the type named `target`.
    ///
    /// An empty declaration is accepted with a warning: the registry is usable
    /// but never rejects a call. A method list declared twice keeps its first
    /// declaration.
    #[must_use]
    pub fn new(
        target: impl Into<Arc<str>>,
        orders: impl IntoIterator<Item = CallOrder<M>>,
    ) -> Arc<Self> {
        let target = target.into();
        debug!("setting call order for {}", target);

        let mut trackers: Vec<SequenceTracker<M>> = Vec::new();
        for order in orders {
            if trackers.iter().any(|t| t.order() == order.methods()) {
                warn!(
                    "call order {:?} declared more than once for {}, keeping the first",
                    order.methods(),
                    target
                );
                continue;
            }
            debug!("decorating {:?}", order.methods());
            trackers.push(SequenceTracker::new(Arc::clone(&target), &order));
        }

        if trackers.is_empty() {
            warn!("call order list not provided or empty for {}", target);
        }

        Arc::new(Self { target, trackers })
    }

    /// Declares the orders of `T`, named after its type.
    #[must_use]
    pub fn declare<T>() -> Arc<Self>
    where
        T: CallOrdered<Method = M>,
    {
        Self::new(std::any::type_name::<T>(), T::call_orders())
    }

    /// Returns the name of the target type.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the trackers in declaration order.
    #[inline]
    #[must_use]
    pub fn trackers(&self) -> &[SequenceTracker<M>] {
        &self.trackers
    }

    /// Returns the tracker declared with exactly `order`.
    #[must_use]
    pub fn tracker(&self, order: &[M]) -> Option<&SequenceTracker<M>> {
        self.trackers.iter().find(|t| t.order() == order)
    }

    /// Wraps `value` into a tracked instance registered with every order.
    #[must_use]
    pub fn track<T>(self: &Arc<Self>, value: T) -> Tracked<T, M> {
        Tracked::new(Arc::clone(self), value)
    }

    /// Registers `instance` with every tracker, starting each order afresh.
    pub fn register(&self, instance: &Arc<InstanceHandle>) {
        for tracker in &self.trackers {
            tracker.add(instance);
        }
    }

    /// Checks a call of `method` against every order that contains it.
    ///
    /// Orders are checked in declaration order; a method that belongs to no
    /// order is always accepted.
    ///
    /// # Errors
    ///
    /// Returns the first [`CallOrderError`] raised by a tracker.
    pub fn intercept(&self, instance: &InstanceHandle, method: &M) -> Result<(), CallOrderError> {
        self.trackers
            .iter()
            .filter(|t| t.contains(method))
            .try_for_each(|t| t.check(instance, method))
    }

    /// Resumes checking of `order` for `instance`.
    ///
    /// # Errors
    ///
    /// - [`CallOrderError::UnknownSequence`] if `order` was not declared
    /// - [`CallOrderError::NotFound`] if the instance is not disabled
    pub fn enable(&self, instance: &InstanceHandle, order: &[M]) -> Result<(), CallOrderError> {
        self.require(order)?.enable(instance)
    }

    /// Suspends checking of `order`, or of every order when `None`.
    ///
    /// Disabling every order is best-effort: orders in which the instance is
    /// not enabled are skipped.
    ///
    /// # Errors
    ///
    /// - [`CallOrderError::UnknownSequence`] if `order` was not declared
    /// - [`CallOrderError::NotFound`] if the instance is not enabled in `order`
    pub fn disable(
        &self,
        instance: &InstanceHandle,
        order: Option<&[M]>,
    ) -> Result<(), CallOrderError> {
        if let Some(order) = order {
            return self.require(order)?.disable(instance);
        }
        for tracker in &self.trackers {
            // NotFound is the only error disable can raise
            let _ = tracker.disable(instance);
        }
        Ok(())
    }

    /// Removes `instance` from every tracker.
    pub fn clean(&self, instance: &InstanceHandle) {
        for tracker in &self.trackers {
            tracker.clean(instance);
        }
    }

    /// Removes every instance from every tracker.
    pub fn clean_all(&self) {
        for tracker in &self.trackers {
            tracker.clean_all();
        }
    }

    /// Prunes expired entries from every tracker, returning how many were removed.
    pub fn prune_expired(&self) -> usize {
        self.trackers.iter().map(SequenceTracker::prune_expired).sum()
    }

    fn require(&self, order: &[M]) -> Result<&SequenceTracker<M>, CallOrderError> {
        self.tracker(order)
            .ok_or_else(|| CallOrderError::UnknownSequence(format!("{order:?}")))
    }
}

impl SequenceRegistry<String> {
    /// Declares orders stored as JSON on the type named `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::Parse`] if `json` is not a list of orders.
    ///
    /// # Examples
    ///
    /// ```
    /// use callorder_rs::SequenceRegistry;
    ///
    /// let registry = SequenceRegistry::from_json(
    ///     "Monitor",
    ///     r#"[{"methods": ["setup", "monitor", "verify"], "repeatable": true}]"#,
    /// )
    /// .unwrap();
    /// assert!(registry.trackers()[0].is_repeatable());
    /// ```
    pub fn from_json(target: &str, json: &str) -> Result<Arc<Self>, DeclarationError> {
        let orders: Vec<CallOrder<String>> = serde_json::from_str(json)?;
        Ok(Self::new(target, orders))
    }
}
