/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Identity of tracked instances.
//!
//! Trackers key their state by [`InstanceId`] and keep a `Weak` reference to
//! the owning [`InstanceHandle`], so tracking never extends an instance's
//! lifetime.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic source of instance identities. Ids are never reused.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a tracked instance.
///
/// Two handles compare equal only if they are the same handle; values are
/// never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Returns the raw numeric id.
    #[inline]
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance#{}", self.0)
    }
}

/// Owning identity token of a tracked instance.
///
/// The [`Tracked`] proxy holds the only strong reference; trackers downgrade
/// it on registration.
///
/// [`Tracked`]: super::Tracked
///
/// # Examples
///
/// ```
/// use callorder_rs::InstanceHandle;
/// use std::sync::Arc;
///
/// let a = InstanceHandle::new();
/// let b = InstanceHandle::new();
/// assert_ne!(a.id(), b.id());
///
/// let weak = Arc::downgrade(&a);
/// drop(a);
/// assert!(weak.upgrade().is_none());
/// ```
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct InstanceHandle {
    id: InstanceId,
}

impl InstanceHandle {
    /// Creates a handle with a fresh identity.
    #[must_use]
    pub fn new() -> Arc<Self> {
        let id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed);
        Arc::new(Self {
            id: InstanceId(id),
        })
    }

    /// Returns this handle's identity.
    #[inline]
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }
}

impl fmt::Display for InstanceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}
