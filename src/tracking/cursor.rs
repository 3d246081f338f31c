/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Per-instance position within a call order.

use super::order::TrackedMethod;
use std::sync::Arc;

/// Iterator over the methods of a call order, pointing at the next expected one.
///
/// A repeatable cursor wraps to the first method right after the last one and
/// never ends (unless the order is empty). A non-repeatable cursor is
/// exhausted once the last method has been yielded.
///
/// # Examples
///
/// ```
/// use callorder_rs::Cursor;
/// use std::sync::Arc;
///
/// let order: Arc<[&str]> = Arc::from(["a", "b"]);
/// let mut once = Cursor::new(Arc::clone(&order), false);
/// assert_eq!(once.by_ref().collect::<Vec<_>>(), vec!["a", "b"]);
/// assert!(once.is_exhausted());
///
/// let cycle = Cursor::new(order, true);
/// assert_eq!(cycle.take(5).collect::<Vec<_>>(), vec!["a", "b", "a", "b", "a"]);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<M> {
    order: Arc<[M]>,
    position: usize,
    repeatable: bool,
}

impl<M: TrackedMethod> Cursor<M> {
    /// Creates a cursor positioned at the first method of `order`.
    #[must_use]
    pub fn new(order: Arc<[M]>, repeatable: bool) -> Self {
        Self {
            order,
            position: 0,
            repeatable,
        }
    }

    /// Returns the method the next call of [`Iterator::next`] would yield.
    #[must_use]
    pub fn peek(&self) -> Option<&M> {
        match self.order.get(self.position) {
            Some(method) => Some(method),
            None if self.repeatable => self.order.first(),
            None => None,
        }
    }

    /// Returns the index of the next expected method.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        if self.repeatable && self.position >= self.order.len() {
            0
        } else {
            self.position
        }
    }

    /// Returns `true` if no further method will be yielded.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.peek().is_none()
    }
}

impl<M: TrackedMethod> Iterator for Cursor<M> {
    type Item = M;

    fn next(&mut self) -> Option<M> {
        if self.position >= self.order.len() {
            if !self.repeatable || self.order.is_empty() {
                return None;
            }
            self.position = 0;
        }
        let method = self.order[self.position].clone();
        self.position += 1;
        Some(method)
    }
}
