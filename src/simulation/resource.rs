//! Shared scanner bank with a FIFO wait queue
//!
//! A [`ResourcePool`] models `capacity` identical servers. Requests are granted
//! immediately while a server is idle; otherwise the requester joins the back of the
//! wait queue. A release hands the freed server straight to the head of the queue at
//! the same instant, so the busy count only drops when nobody is waiting.

use crate::simulation::{SimulationError, SimulationResult};
use std::collections::VecDeque;

/// Outcome of a [`ResourcePool::request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A server was free and is now held by the requester
    Granted,
    /// All servers are busy; the requester is waiting at `position` (0 = head)
    Queued {
        /// Zero-based position in the wait queue
        position: usize,
    },
}

/// Pool of identical servers with a strict FIFO wait queue
#[derive(Debug, Clone)]
pub struct ResourcePool<T> {
    /// Number of servers, fixed for the lifetime of the pool
    capacity: usize,
    /// Servers currently held
    busy: usize,
    /// Requesters waiting for a server, head first
    waiting: VecDeque<T>,
    /// Total number of grants handed out
    grants: u64,
    /// Highest busy count seen
    peak_busy: usize,
    /// Longest wait queue seen
    peak_queue: usize,
}

impl<T> ResourcePool<T> {
    /// Create a pool with `capacity` idle servers
    pub fn new(capacity: usize) -> SimulationResult<Self> {
        if capacity == 0 {
            return Err(SimulationError::invalid_parameter("capacity must be at least 1"));
        }
        Ok(Self {
            capacity,
            busy: 0,
            waiting: VecDeque::new(),
            grants: 0,
            peak_busy: 0,
            peak_queue: 0,
        })
    }

    /// Ask for a server on behalf of `requester`
    ///
    /// The requester must not already be waiting. The pool does not check; the
    /// caller's lifecycle does.
    pub fn request(&mut self, requester: T) -> Admission {
        if self.busy < self.capacity {
            self.busy += 1;
            self.grants += 1;
            self.peak_busy = self.peak_busy.max(self.busy);
            return Admission::Granted;
        }

        self.waiting.push_back(requester);
        self.peak_queue = self.peak_queue.max(self.waiting.len());
        Admission::Queued { position: self.waiting.len() - 1 }
    }

    /// Give a server back
    ///
    /// When someone is waiting, the server passes directly to the head of the queue
    /// and that requester is returned. Releasing with no server held is an error.
    pub fn release(&mut self) -> SimulationResult<Option<T>> {
        if self.busy == 0 {
            return Err(SimulationError::invalid_parameter(
                "release called on a pool with no busy servers",
            ));
        }

        match self.waiting.pop_front() {
            Some(next) => {
                self.grants += 1;
                Ok(Some(next))
            }
            None => {
                self.busy -= 1;
                Ok(None)
            }
        }
    }

    /// Number of servers
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Servers currently held
    pub fn busy(&self) -> usize {
        self.busy
    }

    /// Servers currently idle
    pub fn idle(&self) -> usize {
        self.capacity - self.busy
    }

    /// Requesters waiting for a server
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// Waiting requesters, head of the queue first
    pub fn waiting(&self) -> impl Iterator<Item = &T> {
        self.waiting.iter()
    }

    /// Total number of grants handed out
    pub fn grants(&self) -> u64 {
        self.grants
    }

    /// Highest busy count seen
    pub fn peak_busy(&self) -> usize {
        self.peak_busy
    }

    /// Longest wait queue seen
    pub fn peak_queue(&self) -> usize {
        self.peak_queue
    }
}
