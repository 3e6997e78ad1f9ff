//! Correlation table mapping request codes to pending entries.
//!
//! Android routes activity and permission results back by an integer request
//! code. Codes are issued by a generator owned by the table instead of being
//! derived from the table size, so removing entries out of order never leads
//! to a code being handed out twice.

use crate::error::PickerError;
use std::collections::HashMap;

/// Highest request code accepted for activity requests (lower 16 bits)
pub const MAX_REQUEST_CODE: i32 = 0xFFFF;

#[derive(Debug)]
pub struct RequestRegistry<T> {
    base: i32,
    next: i32,
    pending: HashMap<i32, T>,
}

impl<T> RequestRegistry<T> {
    /// Creates an empty registry issuing codes from `base` upwards.
    /// `base` is clamped into `0..=MAX_REQUEST_CODE`.
    pub fn new(base: i32) -> Self {
        let base = base.clamp(0, MAX_REQUEST_CODE);
        Self {
            base,
            next: base,
            pending: HashMap::new(),
        }
    }

    /// Stores `entry` under a fresh request code and returns the code
    pub fn register(&mut self, entry: T) -> Result<i32, PickerError> {
        let code = self.reserve()?;
        self.insert(code, entry);
        Ok(code)
    }

    /// Issues a fresh request code without storing anything yet.
    ///
    /// Codes increase monotonically and wrap back to the base after
    /// [`MAX_REQUEST_CODE`], skipping codes that are still pending.
    pub fn reserve(&mut self) -> Result<i32, PickerError> {
        let capacity = (MAX_REQUEST_CODE - self.base + 1) as usize;
        if self.pending.len() >= capacity {
            return Err(PickerError::RegistryFull);
        }

        let mut code = self.next;
        while self.pending.contains_key(&code) {
            code = self.advance(code);
        }
        self.next = self.advance(code);
        Ok(code)
    }

    /// Stores `entry` under a code obtained from [`Self::reserve`]
    pub fn insert(&mut self, code: i32, entry: T) {
        if self.pending.insert(code, entry).is_some() {
            log::warn!("Request code {} was already pending, replaced", code);
        }
    }

    /// Removes and returns the entry for `code`
    pub fn take(&mut self, code: i32) -> Option<T> {
        self.pending.remove(&code)
    }

    pub fn contains(&self, code: i32) -> bool {
        self.pending.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn advance(&self, code: i32) -> i32 {
        if code >= MAX_REQUEST_CODE {
            self.base
        } else {
            code + 1
        }
    }
}
