/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Call-order definitions.
//!
//! This module defines the method identities that can be tracked and the
//! ordered sequences of them that a type declares.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// A method identity that can appear in a [`CallOrder`].
///
/// Usually implemented by a fieldless enum listing the operations of a type.
/// `&'static str` and `String` implement it as well, for name-based
/// declarations.
///
/// # Examples
///
/// ```
/// use callorder_rs::TrackedMethod;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Monitor {
///     Setup,
///     Verify,
/// }
///
/// impl TrackedMethod for Monitor {
///     fn name(&self) -> &str {
///         match self {
///             Monitor::Setup => "setup",
///             Monitor::Verify => "verify",
///         }
///     }
/// }
///
/// assert_eq!(Monitor::Verify.name(), "verify");
/// ```
pub trait TrackedMethod: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Returns the name reported in errors and logs.
    fn name(&self) -> &str;
}

impl TrackedMethod for &'static str {
    #[inline]
    fn name(&self) -> &str {
        self
    }
}

impl TrackedMethod for String {
    #[inline]
    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Options recognized for a declared call order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceOptions {
    /// Whether the order wraps back to its first method after the last one.
    pub repeatable: bool,
}

/// An ordered list of methods that must be called in that order.
///
/// Immutable once handed to a [`SequenceRegistry`]. The method list also
/// serves as the handle used to enable or disable tracking for this order.
///
/// [`SequenceRegistry`]: super::SequenceRegistry
///
/// # Examples
///
/// ```
/// use callorder_rs::CallOrder;
///
/// let order = CallOrder::new(["func1", "func2", "func3"]).repeatable(true);
/// assert!(order.is_repeatable());
/// assert!(order.contains(&"func2"));
/// assert_eq!(order.methods(), &["func1", "func2", "func3"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOrder<M> {
    /// Methods in the order they must be called.
    pub methods: Vec<M>,

    /// Options for this order.
    #[serde(flatten)]
    pub options: SequenceOptions,
}

impl<M: TrackedMethod> CallOrder<M> {
    /// Creates a non-repeatable call order over `methods`.
    #[must_use]
    pub fn new(methods: impl IntoIterator<Item = M>) -> Self {
        Self {
            methods: methods.into_iter().collect(),
            options: SequenceOptions::default(),
        }
    }

    /// Creates a call order with explicit options.
    #[must_use]
    pub fn with_options(methods: impl IntoIterator<Item = M>, options: SequenceOptions) -> Self {
        Self {
            methods: methods.into_iter().collect(),
            options,
        }
    }

    /// Sets whether the order is repeatable.
    #[must_use]
    pub fn repeatable(mut self, repeatable: bool) -> Self {
        self.options.repeatable = repeatable;
        self
    }

    /// Returns the methods of this order.
    #[inline]
    #[must_use]
    pub fn methods(&self) -> &[M] {
        &self.methods
    }

    /// Returns `true` if the order wraps around.
    #[inline]
    #[must_use]
    pub fn is_repeatable(&self) -> bool {
        self.options.repeatable
    }

    /// Returns `true` if `method` is part of this order.
    #[inline]
    #[must_use]
    pub fn contains(&self, method: &M) -> bool {
        self.methods.contains(method)
    }
}
