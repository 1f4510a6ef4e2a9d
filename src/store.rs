//! Shared collection of leave requests.
//!
//! Each request sits in its own mutex-guarded slot so that deciding one
//! request never blocks work on another. The collection lock is only held
//! to find, insert or unlink slots, and is never acquired while a slot lock
//! is held.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{LeaveRequest, RequestId};

/// A request plus a tombstone flag set when it is unlinked.
#[derive(Debug)]
pub(crate) struct RequestSlot {
    pub(crate) request: LeaveRequest,
    pub(crate) removed: bool,
}

pub(crate) type SharedSlot = Arc<Mutex<RequestSlot>>;

#[derive(Default)]
struct StoreInner {
    by_id: HashMap<RequestId, SharedSlot>,
    order: Vec<RequestId>,
}

/// Insertion-ordered request collection owned by the workflow.
#[derive(Default)]
pub(crate) struct RequestStore {
    inner: RwLock<StoreInner>,
}

pub(crate) fn lock_slot(slot: &Mutex<RequestSlot>) -> MutexGuard<'_, RequestSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RequestStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn insert(&self, request: LeaveRequest) {
        let id = request.id.clone();
        let slot = Arc::new(Mutex::new(RequestSlot {
            request,
            removed: false,
        }));
        let mut inner = self.write();
        inner.by_id.insert(id.clone(), slot);
        inner.order.push(id);
    }

    pub(crate) fn slot(&self, id: &RequestId) -> Option<SharedSlot> {
        self.read().by_id.get(id).cloned()
    }

    /// Unlinks the slot so no new caller can find it. The caller must still
    /// mark it removed under the slot lock.
    pub(crate) fn unlink(&self, id: &RequestId) -> Option<SharedSlot> {
        let mut inner = self.write();
        let slot = inner.by_id.remove(id)?;
        inner.order.retain(|existing| existing != id);
        Some(slot)
    }

    pub(crate) fn get(&self, id: &RequestId) -> Option<LeaveRequest> {
        let slot = self.slot(id)?;
        let slot = lock_slot(&slot);
        (!slot.removed).then(|| slot.request.clone())
    }

    /// Copies every live request in submission order.
    pub(crate) fn snapshot(&self) -> Vec<LeaveRequest> {
        let slots: Vec<SharedSlot> = {
            let inner = self.read();
            inner
                .order
                .iter()
                .filter_map(|id| inner.by_id.get(id).cloned())
                .collect()
        };

        slots
            .iter()
            .filter_map(|slot| {
                let slot = lock_slot(slot);
                (!slot.removed).then(|| slot.request.clone())
            })
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.read().order.len()
    }
}
