//! A unit-capacity priority resource: requesters enqueue with a priority
//! tuple, the holder releases exactly once, and grants are strictly
//! monotone in the priority tuple (lower `priority_class` wins, ties
//! broken by `fifo_seq`, in request order).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

pub type RequestHandle = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Granted(RequestHandle),
    Queued(RequestHandle),
}

impl RequestOutcome {
    pub fn handle(self) -> RequestHandle {
        match self {
            Self::Granted(h) | Self::Queued(h) => h,
        }
    }
}

struct Waiter {
    priority_class: i32,
    fifo_seq: u64,
    handle: RequestHandle,
}

impl PartialEq for Waiter {
    fn eq(&self, other: &Self) -> bool {
        self.priority_class == other.priority_class
            && self.fifo_seq == other.fifo_seq
            && self.handle == other.handle
    }
}
impl Eq for Waiter {}

impl PartialOrd for Waiter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Waiter {
    // Reversed so `BinaryHeap::pop` returns the lexicographically
    // smallest (priority_class, fifo_seq, handle) tuple first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority_class
            .cmp(&self.priority_class)
            .then_with(|| other.fifo_seq.cmp(&self.fifo_seq))
            .then_with(|| other.handle.cmp(&self.handle))
    }
}

pub struct PriorityResource {
    holder: Option<RequestHandle>,
    waiters: BinaryHeap<Waiter>,
    cancelled: HashSet<RequestHandle>,
    queue_len: usize,
    next_handle: RequestHandle,
}

impl PriorityResource {
    pub fn new() -> Self {
        Self {
            holder: None,
            waiters: BinaryHeap::new(),
            cancelled: HashSet::new(),
            queue_len: 0,
            next_handle: 0,
        }
    }

    /// Current wait-queue length (waiters only, not the holder).
    pub fn queue_len(&self) -> usize {
        self.queue_len
    }

    pub fn is_idle(&self) -> bool {
        self.holder.is_none()
    }

    pub fn request(&mut self, priority_class: i32, fifo_seq: u64) -> RequestOutcome {
        let handle = self.next_handle;
        self.next_handle += 1;
        if self.holder.is_none() {
            self.holder = Some(handle);
            RequestOutcome::Granted(handle)
        } else {
            self.waiters.push(Waiter {
                priority_class,
                fifo_seq,
                handle,
            });
            self.queue_len += 1;
            RequestOutcome::Queued(handle)
        }
    }

    /// Cancel a not-yet-granted handle. Cancelling the current holder's
    /// handle is equivalent to `release()`.
    pub fn cancel(&mut self, handle: RequestHandle) -> Option<RequestHandle> {
        if self.holder == Some(handle) {
            return self.release();
        }
        self.cancelled.insert(handle);
        self.queue_len = self.queue_len.saturating_sub(1);
        None
    }

    /// Release the resource, granting the minimum-keyed non-cancelled
    /// waiter (if any). Returns the handle just granted.
    pub fn release(&mut self) -> Option<RequestHandle> {
        self.holder = None;
        while let Some(waiter) = self.waiters.pop() {
            if self.cancelled.remove(&waiter.handle) {
                continue;
            }
            self.queue_len -= 1;
            self.holder = Some(waiter.handle);
            return Some(waiter.handle);
        }
        None
    }
}

impl Default for PriorityResource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_request_is_granted_immediately() {
        let mut r = PriorityResource::new();
        assert!(matches!(r.request(1, 0), RequestOutcome::Granted(_)));
    }

    #[test]
    fn second_request_queues_behind_the_holder() {
        let mut r = PriorityResource::new();
        r.request(1, 0);
        let outcome = r.request(1, 1);
        assert!(matches!(outcome, RequestOutcome::Queued(_)));
        assert_eq!(r.queue_len(), 1);
    }

    #[test]
    fn release_grants_lowest_priority_class_first() {
        let mut r = PriorityResource::new();
        let holder = r.request(1, 0).handle();
        let normal = r.request(1, 1).handle();
        let emergency = r.request(0, 2).handle();
        let _ = holder;
        assert_eq!(r.release(), Some(emergency));
        assert_eq!(r.release(), Some(normal));
    }

    #[test]
    fn ties_within_a_class_are_fifo() {
        let mut r = PriorityResource::new();
        r.request(1, 0); // holder
        let first = r.request(1, 1).handle();
        let second = r.request(1, 2).handle();
        assert_eq!(r.release(), Some(first));
        assert_eq!(r.release(), Some(second));
    }

    #[test]
    fn cancelling_a_queued_handle_removes_it() {
        let mut r = PriorityResource::new();
        r.request(1, 0); // holder
        let doomed = r.request(1, 1).handle();
        let survivor = r.request(1, 2).handle();
        assert_eq!(r.cancel(doomed), None);
        assert_eq!(r.queue_len(), 1);
        assert_eq!(r.release(), Some(survivor));
    }

    #[test]
    fn cancelling_the_holder_is_a_release() {
        let mut r = PriorityResource::new();
        let holder = r.request(1, 0).handle();
        let next = r.request(1, 1).handle();
        assert_eq!(r.cancel(holder), Some(next));
    }

    #[test]
    fn release_with_empty_queue_idles() {
        let mut r = PriorityResource::new();
        r.request(1, 0);
        assert_eq!(r.release(), None);
        assert!(r.is_idle());
    }
}
