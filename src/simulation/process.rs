//! Employee process lifecycle
//!
//! Each employee moves through `Created -> Waiting -> InService -> Departed` exactly
//! once. The engine drives the transitions from its event loop; every timing field
//! is written by the transition that owns it and never touched again.

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::EmployeeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an employee process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    /// Arrival scheduled, not yet at the scanners
    Created,
    /// Standing in line for a scanner
    Waiting,
    /// Being scanned
    InService,
    /// Through the scanners
    Departed,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::Created => write!(f, "Created"),
            ProcessState::Waiting => write!(f, "Waiting"),
            ProcessState::InService => write!(f, "In Service"),
            ProcessState::Departed => write!(f, "Departed"),
        }
    }
}

/// One employee's pass through the scanner bank
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeProcess {
    id: EmployeeId,
    arrival_time: f64,
    state: ProcessState,
    queued_at: Option<f64>,
    service_start: Option<f64>,
    departure: Option<f64>,
    queue_length_at_entry: Option<usize>,
}

impl EmployeeProcess {
    /// Create a process that will arrive at `arrival_time`
    pub fn new(id: EmployeeId, arrival_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            state: ProcessState::Created,
            queued_at: None,
            service_start: None,
            departure: None,
            queue_length_at_entry: None,
        }
    }

    /// Employee identifier
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Scheduled arrival time
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// Current lifecycle state
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Join the line for the scanners at `now`
    pub fn begin_waiting(&mut self, now: f64) -> SimulationResult<()> {
        self.expect_state(ProcessState::Created, "begin waiting")?;
        self.queued_at = Some(now);
        self.state = ProcessState::Waiting;
        Ok(())
    }

    /// Step up to a scanner granted at `now`
    pub fn begin_service(&mut self, now: f64) -> SimulationResult<()> {
        self.expect_state(ProcessState::Waiting, "begin service")?;
        self.service_start = Some(now);
        self.state = ProcessState::InService;
        Ok(())
    }

    /// Note how many others are still in line once the employee is at the scanner
    ///
    /// Recorded exactly once, after every other event of the grant instant has been
    /// handled.
    pub fn observe_queue(&mut self, queue_length: usize) -> SimulationResult<()> {
        self.expect_state(ProcessState::InService, "observe the queue")?;
        if self.queue_length_at_entry.is_some() {
            return Err(SimulationError::invalid_transition(format!(
                "{} already observed the queue",
                self.id
            )));
        }
        self.queue_length_at_entry = Some(queue_length);
        Ok(())
    }

    /// Leave the scanner at `now`
    pub fn depart(&mut self, now: f64) -> SimulationResult<()> {
        self.expect_state(ProcessState::InService, "depart")?;
        if self.queue_length_at_entry.is_none() {
            return Err(SimulationError::invalid_transition(format!(
                "{} cannot depart before observing the queue",
                self.id
            )));
        }
        self.departure = Some(now);
        self.state = ProcessState::Departed;
        Ok(())
    }

    /// Time spent in line, once service has started
    pub fn wait_time(&self) -> Option<f64> {
        Some(self.service_start? - self.queued_at?)
    }

    /// Queue length seen once at the scanner
    pub fn queue_length_at_entry(&self) -> Option<usize> {
        self.queue_length_at_entry
    }

    /// Completed record, available once the employee has departed
    pub fn record(&self) -> Option<EmployeeRecord> {
        if self.state != ProcessState::Departed {
            return None;
        }
        let queued_at = self.queued_at?;
        let service_start = self.service_start?;
        Some(EmployeeRecord {
            id: self.id,
            arrival_time: self.arrival_time,
            queued_at,
            service_start,
            departure: self.departure?,
            wait_time: service_start - queued_at,
            queue_length_at_entry: self.queue_length_at_entry?,
        })
    }

    fn expect_state(&self, expected: ProcessState, action: &str) -> SimulationResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SimulationError::invalid_transition(format!(
                "{} cannot {} while {} (expected {})",
                self.id, action, self.state, expected
            )))
        }
    }
}

/// Observations of one employee after departure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Employee identifier
    pub id: EmployeeId,
    /// Scheduled arrival time
    pub arrival_time: f64,
    /// When the employee joined the line
    pub queued_at: f64,
    /// When a scanner was granted
    pub service_start: f64,
    /// When the scan finished
    pub departure: f64,
    /// `service_start - queued_at`
    pub wait_time: f64,
    /// Employees still in line once every event at `service_start` was handled
    pub queue_length_at_entry: usize,
}
