/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Error types for call-order tracking.

use super::instance::InstanceId;
use super::tracker::TrackingState;
use thiserror::Error;

/// Errors surfaced by tracked calls and by enable/disable operations.
///
/// Callers are expected to branch on the variant: an out-of-order call can be
/// recovered by calling the expected method, while an exhausted instance has
/// used up its only pass through a non-repeatable order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallOrderError {
    /// A method was called while another one was expected.
    #[error("method {found} called instead of {expected}")]
    OutOfOrder {
        /// The method that was actually called.
        found: String,
        /// The method the order expected next.
        expected: String,
    },

    /// The non-repeatable order has been fully consumed for this instance.
    #[error("exhausted {0}")]
    Exhausted(InstanceId),

    /// The instance has no tracking state (never registered, or cleaned).
    #[error("unknown {0}")]
    UnknownInstance(InstanceId),

    /// Enable or disable was requested for an instance not in the source state.
    #[error("{instance} is not {wanted}")]
    NotFound {
        /// The instance that was looked up.
        instance: InstanceId,
        /// The state the instance was required to be in.
        wanted: TrackingState,
    },

    /// No call order with the given methods was declared.
    #[error("no call order declared as {0}")]
    UnknownSequence(String),
}

impl CallOrderError {
    /// Returns `true` if the found method differs from the expected one.
    ///
    /// Only meaningful for [`CallOrderError::OutOfOrder`]; every other variant
    /// returns `true` as well, since all of them are failures.
    #[must_use]
    pub fn is_error(&self) -> bool {
        match self {
            Self::OutOfOrder { found, expected } => found != expected,
            _ => true,
        }
    }

    /// Returns `true` for [`CallOrderError::OutOfOrder`].
    #[inline]
    #[must_use]
    pub fn is_out_of_order(&self) -> bool {
        matches!(self, Self::OutOfOrder { .. })
    }

    /// Returns `true` for [`CallOrderError::Exhausted`].
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }

    /// Returns `true` for [`CallOrderError::UnknownInstance`].
    #[inline]
    #[must_use]
    pub fn is_unknown_instance(&self) -> bool {
        matches!(self, Self::UnknownInstance(_))
    }

    /// Returns the instance the error refers to, if any.
    #[must_use]
    pub fn instance(&self) -> Option<InstanceId> {
        match self {
            Self::Exhausted(id) | Self::UnknownInstance(id) => Some(*id),
            Self::NotFound { instance, .. } => Some(*instance),
            Self::OutOfOrder { .. } | Self::UnknownSequence(_) => None,
        }
    }
}

/// Errors raised while building a registry from a stored declaration.
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// The declaration could not be parsed.
    #[error("invalid call order declaration: {0}")]
    Parse(#[from] serde_json::Error),
}
