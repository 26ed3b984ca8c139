//! Scanner bank simulation engine
//!
//! Ties the clock, the scanner pool, and the employee processes together. Each
//! employee contributes three events: an arrival at its scheduled time, a service
//! start at the instant a scanner is granted, and a scan completion one service
//! duration later. A completion hands the scanner to the head of the line at the
//! same instant. The service start is queued behind every event already pending for
//! that instant, so the line length it observes includes simultaneous arrivals and
//! hand-offs.

use crate::simulation::{
    Admission, ArrivalGenerator, ArrivalWindow, EmployeeProcess, EmployeeRecord, ProcessState,
    ResourcePool, RunResult, SimulationClock, SimulationError, SimulationResult,
};
use crate::types::EmployeeId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// Events delivered by the clock during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerEvent {
    /// Employee reaches the scanner bank
    Arrive(EmployeeId),
    /// Employee steps up to the scanner it was granted
    ServiceStart(EmployeeId),
    /// Employee's scan finishes and the scanner frees up
    ScanComplete(EmployeeId),
}

/// Everything observed during one completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunObservations {
    /// Per-employee records in arrival order
    pub records: Vec<EmployeeRecord>,
    /// Number of scanners
    pub capacity: usize,
    /// Seconds per scan
    pub service_duration: f64,
    /// Sum of all scan durations actually consumed
    pub busy_time: f64,
    /// Events delivered by the clock
    pub events_delivered: u64,
    /// Longest line seen
    pub peak_queue_length: usize,
    /// Most scanners busy at once
    pub peak_busy: usize,
}

/// Single run of the scanner bank over a fixed arrival sequence
#[derive(Debug)]
pub struct ScannerBankSimulation {
    clock: SimulationClock<ScannerEvent>,
    pool: ResourcePool<EmployeeId>,
    employees: Vec<EmployeeProcess>,
    service_duration: f64,
    busy_time: f64,
}

impl ScannerBankSimulation {
    /// Prepare a run with one employee per entry of `arrivals`
    ///
    /// Arrivals are scheduled in slice order, so employees with identical arrival
    /// times reach the scanners in that order.
    pub fn new(arrivals: &[f64], service_duration: f64, capacity: usize) -> SimulationResult<Self> {
        validate_service_duration(service_duration)?;
        let pool = ResourcePool::new(capacity)?;

        let mut clock = SimulationClock::new();
        let mut employees = Vec::with_capacity(arrivals.len());
        for (index, &arrival_time) in arrivals.iter().enumerate() {
            if !arrival_time.is_finite() || arrival_time < 0.0 {
                return Err(SimulationError::invalid_parameter(format!(
                    "arrival time {} of employee {} is not a non-negative finite number",
                    arrival_time, index
                )));
            }
            let id = EmployeeId::new(index);
            clock.schedule_at(arrival_time, ScannerEvent::Arrive(id))?;
            employees.push(EmployeeProcess::new(id, arrival_time));
        }

        Ok(Self { clock, pool, employees, service_duration, busy_time: 0.0 })
    }

    /// Deliver the next event
    ///
    /// Returns the time of the delivered event, or `None` once the schedule is empty.
    pub fn step(&mut self) -> SimulationResult<Option<f64>> {
        let Some((now, event)) = self.clock.next_event() else {
            return Ok(None);
        };
        trace!(now, ?event, busy = self.pool.busy(), queued = self.pool.queue_len(), "delivering event");

        match event {
            ScannerEvent::Arrive(id) => {
                self.employee_mut(id)?.begin_waiting(now)?;
                match self.pool.request(id) {
                    Admission::Granted => self.grant_scanner(id, now)?,
                    Admission::Queued { position } => {
                        trace!(%id, position, "all scanners busy, joining line");
                    }
                }
            }
            ScannerEvent::ServiceStart(id) => {
                let queue_length = self.pool.queue_len();
                self.employee_mut(id)?.observe_queue(queue_length)?;
                self.clock.schedule_in(self.service_duration, ScannerEvent::ScanComplete(id))?;
                trace!(%id, now, queue_length, "scan started");
            }
            ScannerEvent::ScanComplete(id) => {
                self.employee_mut(id)?.depart(now)?;
                self.busy_time += self.service_duration;
                if let Some(next) = self.pool.release()? {
                    self.grant_scanner(next, now)?;
                }
            }
        }

        debug_assert!(self.pool.busy() <= self.pool.capacity());
        Ok(Some(now))
    }

    /// Run until the schedule is empty and collect the observations
    #[instrument(skip(self), fields(employees = self.employees.len(), capacity = self.pool.capacity()))]
    pub fn run(mut self) -> SimulationResult<RunObservations> {
        while self.step()?.is_some() {}
        self.into_observations()
    }

    /// Collect observations from a drained run
    ///
    /// Fails if events are still pending or any employee has not departed.
    pub fn into_observations(self) -> SimulationResult<RunObservations> {
        if !self.clock.is_idle() {
            return Err(SimulationError::incomplete_run(format!(
                "{} events still pending",
                self.clock.pending_count()
            )));
        }

        let records = self
            .employees
            .iter()
            .map(|employee| {
                employee.record().ok_or_else(|| {
                    SimulationError::incomplete_run(format!(
                        "{} finished the run while {}",
                        employee.id(),
                        employee.state()
                    ))
                })
            })
            .collect::<SimulationResult<Vec<_>>>()?;

        debug!(
            events = self.clock.events_delivered(),
            end_time = self.clock.now(),
            peak_queue = self.pool.peak_queue(),
            "run drained"
        );

        Ok(RunObservations {
            records,
            capacity: self.pool.capacity(),
            service_duration: self.service_duration,
            busy_time: self.busy_time,
            events_delivered: self.clock.events_delivered(),
            peak_queue_length: self.pool.peak_queue(),
            peak_busy: self.pool.peak_busy(),
        })
    }

    /// Current logical time
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Events not yet delivered
    pub fn pending_events(&self) -> usize {
        self.clock.pending_count()
    }

    /// The scanner pool
    pub fn pool(&self) -> &ResourcePool<EmployeeId> {
        &self.pool
    }

    /// Employee processes in arrival order
    pub fn employees(&self) -> &[EmployeeProcess] {
        &self.employees
    }

    /// Number of employees in a given state
    pub fn count_in_state(&self, state: ProcessState) -> usize {
        self.employees.iter().filter(|employee| employee.state() == state).count()
    }

    fn grant_scanner(&mut self, id: EmployeeId, now: f64) -> SimulationResult<()> {
        self.employee_mut(id)?.begin_service(now)?;
        self.clock.schedule_in(0.0, ScannerEvent::ServiceStart(id))?;
        Ok(())
    }

    fn employee_mut(&mut self, id: EmployeeId) -> SimulationResult<&mut EmployeeProcess> {
        self.employees
            .get_mut(id.index())
            .ok_or_else(|| SimulationError::invalid_parameter(format!("unknown employee {}", id)))
    }
}

fn validate_service_duration(service_duration: f64) -> SimulationResult<()> {
    if !service_duration.is_finite() || service_duration <= 0.0 {
        return Err(SimulationError::invalid_parameter(format!(
            "service duration must be a positive finite number, got {}",
            service_duration
        )));
    }
    Ok(())
}

fn validate_capacity(capacity: usize) -> SimulationResult<()> {
    if capacity == 0 {
        return Err(SimulationError::invalid_parameter("capacity must be at least 1"));
    }
    Ok(())
}

/// Simulate a fixed arrival sequence and aggregate the result
pub fn run_with_arrivals(
    arrivals: &[f64],
    service_duration: f64,
    capacity: usize,
) -> SimulationResult<RunResult> {
    let observations = ScannerBankSimulation::new(arrivals, service_duration, capacity)?.run()?;
    RunResult::from_observations(&observations)
}

/// Generate arrivals from `seed`, simulate them, and aggregate the result
///
/// Identical inputs always produce an identical [`RunResult`].
#[instrument(skip(window), fields(start = window.start, end = window.end))]
pub fn run(
    employee_count: usize,
    window: ArrivalWindow,
    service_duration: f64,
    capacity: usize,
    seed: u64,
) -> SimulationResult<RunResult> {
    validate_service_duration(service_duration)?;
    validate_capacity(capacity)?;

    let arrivals = ArrivalGenerator::new(employee_count, window)?.generate_seeded(seed);
    let result = run_with_arrivals(&arrivals, service_duration, capacity)?;

    info!(
        capacity,
        mean_wait = result.mean_wait_time,
        utilization = result.utilization,
        "run complete"
    );
    Ok(result)
}
