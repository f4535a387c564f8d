/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{error, info};
use std::collections::VecDeque;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::BuildingConfig;
use crate::elevator::ElevatorFSM;
use crate::shared::{BuildingReport, Direction, Request, SystemError, SystemStatus};

/***************************************/
/*             Public API              */
/***************************************/
/**
 * The building coordinator.
 *
 * Owns the fleet, the two pending-request queues and the system lifecycle
 * state. Every tick it decides which cabins may pull new work (and how
 * much), then advances every cabin exactly once. All routing happens in two
 * places only: direction choice at enqueue time, and ground/top-floor batch
 * dispatch at the start of a tick.
 *
 * # Fields
 * - `n_floors`:     Floors in the building, validated to 1..=30.
 * - `n_elevators`:  Fleet size, validated to 1..=10; never resized.
 * - `capacity`:     Per-cabin manifest bound, validated to 3..=20.
 * - `elevators`:    The fleet, created once at construction.
 * - `up_queue`:     Pending up requests, insertion-ordered.
 * - `down_queue`:   Pending down requests, insertion-ordered.
 * - `status`:       Running / Stopping / OutOfService.
 */
pub struct Building {
    n_floors: u8,
    n_elevators: u8,
    capacity: u8,
    elevators: Vec<ElevatorFSM>,
    up_queue: VecDeque<Request>,
    down_queue: VecDeque<Request>,
    status: SystemStatus,
}

impl Building {
    pub fn new(n_floors: u8, n_elevators: u8, capacity: u8) -> Result<Building, SystemError> {
        if n_floors < 1 || n_floors > 30 {
            return Err(SystemError::InvalidConfiguration(format!(
                "number of floors must be between 1 and 30, got {}",
                n_floors
            )));
        }
        if n_elevators < 1 || n_elevators > 10 {
            return Err(SystemError::InvalidConfiguration(format!(
                "number of elevators must be between 1 and 10, got {}",
                n_elevators
            )));
        }
        if capacity < 3 || capacity > 20 {
            return Err(SystemError::InvalidConfiguration(format!(
                "elevator capacity must be between 3 and 20, got {}",
                capacity
            )));
        }

        let elevators = (0..n_elevators)
            .map(|_| ElevatorFSM::new(n_floors, capacity))
            .collect();

        Ok(Building {
            n_floors,
            n_elevators,
            capacity,
            elevators,
            up_queue: VecDeque::new(),
            down_queue: VecDeque::new(),
            status: SystemStatus::OutOfService,
        })
    }

    pub fn from_config(config: &BuildingConfig) -> Result<Building, SystemError> {
        Building::new(config.n_floors, config.n_elevators, config.capacity)
    }

    /// Validate a request and append it to the queue for its direction.
    /// Queue choice is the only routing decision made here.
    pub fn add_request(&mut self, request: Request) -> Result<(), SystemError> {
        if self.status != SystemStatus::Running {
            return Err(SystemError::InvalidState(
                "building system is not running".to_string(),
            ));
        }
        if request.from_floor() >= self.n_floors || request.to_floor() >= self.n_floors {
            return Err(SystemError::InvalidRequest(format!(
                "request {} is outside floors 0..={}",
                request,
                self.n_floors - 1
            )));
        }

        info!("request {} queued ({:?})", request, request.direction());
        match request.direction() {
            Direction::Up => self.up_queue.push_back(request),
            Direction::Down => self.down_queue.push_back(request),
        }
        Ok(())
    }

    /// Offer each eligible cabin a batch from the queue matching the
    /// terminal floor it is parked at. Eligibility is checked before any
    /// request leaves a queue, and empty batches are never offered, so a
    /// committed removal cannot be lost.
    pub fn process_requests(&mut self) {
        let top_floor = self.n_floors - 1;

        for (i, elevator) in self.elevators.iter_mut().enumerate() {
            if !elevator.is_taking_requests() {
                continue;
            }

            let batch = if elevator.current_floor() == 0 {
                take_batch(&mut self.up_queue, elevator.remaining_capacity())
            } else if elevator.current_floor() == top_floor {
                take_batch(&mut self.down_queue, elevator.remaining_capacity())
            } else {
                continue;
            };

            if batch.is_empty() {
                continue;
            }

            info!(
                "dispatching {} request(s) to elevator {} at floor {}",
                batch.len(),
                i + 1,
                elevator.current_floor()
            );
            if let Err(e) = elevator.load_requests(batch) {
                // Removal is committed at this point; the batch is dropped,
                // not requeued.
                error!("elevator {} refused its batch: {}", i + 1, e);
            }
        }
    }

    /// Start every cabin and accept requests. No-op when already running.
    pub fn start(&mut self) -> Result<(), SystemError> {
        match self.status {
            SystemStatus::Running => Ok(()),
            SystemStatus::Stopping => Err(SystemError::InvalidState(
                "building system is stopping, cannot start".to_string(),
            )),
            SystemStatus::OutOfService => {
                for elevator in &mut self.elevators {
                    elevator.start();
                }
                self.status = SystemStatus::Running;
                info!("building system running");
                Ok(())
            }
        }
    }

    /// Begin shutting down: all cabins head out of service and both pending
    /// queues are dropped immediately. Passengers already aboard are carried
    /// to the ground floor first. No-op when already stopping or stopped.
    pub fn stop(&mut self) {
        if self.status == SystemStatus::OutOfService || self.status == SystemStatus::Stopping {
            return;
        }

        for elevator in &mut self.elevators {
            elevator.take_out_of_service();
        }
        self.up_queue.clear();
        self.down_queue.clear();
        self.status = SystemStatus::Stopping;
        info!("building system stopping, pending queues cleared");
    }

    /// Advance the whole system one tick: dispatch (while running), then
    /// step every cabin, then complete the shutdown once the last cabin
    /// reaches the ground floor.
    pub fn step(&mut self) {
        if self.status == SystemStatus::OutOfService {
            return;
        }

        if self.status == SystemStatus::Running {
            self.process_requests();
        }

        for elevator in &mut self.elevators {
            elevator.step();
        }

        if self.status == SystemStatus::Stopping
            && self.elevators.iter().all(|e| e.current_floor() == 0)
        {
            self.status = SystemStatus::OutOfService;
            info!("all cabins on the ground floor, building system out of service");
        }
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    pub fn n_elevators(&self) -> u8 {
        self.n_elevators
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn status(&self) -> SystemStatus {
        self.status
    }

    /// Consolidated point-in-time snapshot; every field is an owned copy.
    pub fn report(&self) -> BuildingReport {
        BuildingReport {
            n_floors: self.n_floors,
            n_elevators: self.n_elevators,
            capacity: self.capacity,
            elevators: self.elevators.iter().map(|e| e.report()).collect(),
            up_queue: self.up_queue.iter().cloned().collect(),
            down_queue: self.down_queue.iter().cloned().collect(),
            status: self.status,
        }
    }
}

// Remove at most `limit` requests from the front of a queue, preserving
// submission order.
fn take_batch(queue: &mut VecDeque<Request>, limit: u8) -> Vec<Request> {
    let count = (limit as usize).min(queue.len());
    queue.drain(..count).collect()
}
