/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Direction, ElevatorReport, Request, SystemError};

/***************************************/
/*             Constants               */
/***************************************/
/// Ticks the doors stay open at a stop.
pub const DOOR_OPEN_TICKS: u8 = 3;
/// Ticks an empty cabin waits at a floor before repositioning.
pub const IDLE_WAIT_TICKS: u8 = 5;

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    Idle,
    Moving,
    DoorOpen,
    OutOfService,
}

/**
 * One cabin of the building, advanced one tick at a time.
 *
 * The FSM (Finite State Machine) owns the cabin position, door state and the
 * manifest of requests it is committed to serving. It never pulls work on
 * its own; the coordinator hands it a batch with `load_requests` and drives
 * time forward by calling `step` once per system tick.
 *
 * # Fields
 * - `n_floors`:        Floors served; the cabin position stays in `0..n_floors`.
 * - `capacity`:        Upper bound on the manifest size.
 * - `behaviour`:       Idle / Moving / DoorOpen / OutOfService.
 * - `floor`:           Current cabin position.
 * - `target`:          Terminal floor of the current run.
 * - `door_timer`:      Remaining ticks the doors stay open.
 * - `idle_timer`:      Remaining ticks before an idle cabin repositions.
 * - `stops`:           Per-floor stop flags for the current run.
 * - `manifest`:        Requests currently aboard or awaiting pickup.
 * - `shutting_down`:   Deferred out-of-service intent.
 */
pub struct ElevatorFSM {
    n_floors: u8,
    capacity: u8,
    behaviour: Behaviour,
    floor: u8,
    target: u8,
    door_timer: u8,
    idle_timer: u8,
    stops: Vec<bool>,
    manifest: Vec<Request>,
    shutting_down: bool,
}

impl ElevatorFSM {
    pub fn new(n_floors: u8, capacity: u8) -> ElevatorFSM {
        ElevatorFSM {
            n_floors,
            capacity,
            behaviour: Behaviour::OutOfService,
            floor: 0,
            target: 0,
            door_timer: 0,
            idle_timer: 0,
            stops: vec![false; n_floors as usize],
            manifest: Vec::new(),
            shutting_down: false,
        }
    }

    /// Put the cabin into service. No-op while it is already serving.
    pub fn start(&mut self) {
        if self.behaviour == Behaviour::OutOfService || self.shutting_down {
            self.behaviour = Behaviour::Idle;
            self.door_timer = 0;
            self.idle_timer = IDLE_WAIT_TICKS;
            self.shutting_down = false;
            self.manifest.clear();
            self.clear_stops();
            self.target = self.floor;
        }
    }

    /// Record the intent to leave service. The cabin stops accepting work
    /// immediately; `step` finishes any open door cycle, returns the cabin
    /// to floor 0, releases everyone there and completes the transition.
    pub fn take_out_of_service(&mut self) {
        if self.behaviour != Behaviour::OutOfService {
            self.shutting_down = true;
            self.idle_timer = 0;
        }
    }

    /// Whether the coordinator may offer this cabin a batch right now.
    pub fn is_taking_requests(&self) -> bool {
        self.behaviour == Behaviour::Idle && !self.shutting_down
    }

    pub fn current_floor(&self) -> u8 {
        self.floor
    }

    pub fn remaining_capacity(&self) -> u8 {
        self.capacity - self.manifest.len() as u8
    }

    /// Accept a batch of same-direction requests as the new manifest and
    /// begin the run. The batch is validated in full before any state is
    /// touched; an empty batch is an accepted no-op.
    pub fn load_requests(&mut self, batch: Vec<Request>) -> Result<(), SystemError> {
        if batch.is_empty() {
            return Ok(());
        }
        if !self.is_taking_requests() {
            return Err(SystemError::InvalidState(
                "elevator is not accepting requests".to_string(),
            ));
        }
        if batch.len() > self.remaining_capacity() as usize {
            return Err(SystemError::InvalidRequest(format!(
                "batch of {} exceeds remaining capacity {}",
                batch.len(),
                self.remaining_capacity()
            )));
        }

        let direction = batch[0].direction();
        for request in &batch {
            if request.from_floor() >= self.n_floors || request.to_floor() >= self.n_floors {
                return Err(SystemError::InvalidRequest(format!(
                    "floor out of range in request {}",
                    request
                )));
            }
            if request.direction() != direction {
                return Err(SystemError::InvalidRequest(format!(
                    "mixed directions in batch (request {})",
                    request
                )));
            }
        }

        for request in &batch {
            self.stops[request.from_floor() as usize] = true;
            self.stops[request.to_floor() as usize] = true;
        }

        // A run always sweeps through to its terminal floor so the cabin
        // parks where the next dispatch happens.
        self.target = match direction {
            Direction::Up => self.n_floors - 1,
            Direction::Down => 0,
        };
        self.manifest = batch;
        self.idle_timer = 0;
        self.behaviour = Behaviour::Moving;
        debug!(
            "cabin at floor {} starts a {:?} run with {} request(s)",
            self.floor,
            direction,
            self.manifest.len()
        );
        Ok(())
    }

    /// Advance the cabin by exactly one unit of simulated time.
    pub fn step(&mut self) {
        match self.behaviour {
            Behaviour::OutOfService => {}
            Behaviour::DoorOpen => {
                self.door_timer -= 1;
                if self.door_timer == 0 {
                    self.close_door();
                }
            }
            Behaviour::Moving => {
                self.advance_cabin();
            }
            Behaviour::Idle => {
                if self.shutting_down {
                    if self.floor == 0 {
                        self.finish_run();
                    } else {
                        self.target = 0;
                        self.behaviour = Behaviour::Moving;
                    }
                } else if self.idle_timer > 0 {
                    self.idle_timer -= 1;
                } else {
                    self.reposition();
                }
            }
        }
    }

    pub fn report(&self) -> ElevatorReport {
        ElevatorReport {
            taking_requests: self.is_taking_requests(),
            floor: self.floor,
            door_timer: self.door_timer,
            idle_timer: self.idle_timer,
        }
    }

    fn advance_cabin(&mut self) {
        if self.shutting_down {
            self.target = 0;
            self.clear_stops();
        }

        // A stop at the dispatch floor means boarding: open without moving.
        if self.stops[self.floor as usize] {
            self.open_door();
            return;
        }

        if self.floor < self.target {
            self.floor += 1;
        } else if self.floor > self.target {
            self.floor -= 1;
        }

        if self.stops[self.floor as usize] {
            self.open_door();
        } else if self.floor == self.target {
            self.finish_run();
        }
    }

    fn open_door(&mut self) {
        self.stops[self.floor as usize] = false;
        self.door_timer = DOOR_OPEN_TICKS;
        self.behaviour = Behaviour::DoorOpen;
        debug!("doors open at floor {}", self.floor);
    }

    fn close_door(&mut self) {
        let floor = self.floor;
        self.manifest.retain(|request| request.to_floor() != floor);

        if self.shutting_down {
            if self.floor == 0 {
                self.finish_run();
            } else {
                self.target = 0;
                self.clear_stops();
                self.behaviour = Behaviour::Moving;
            }
        } else if self.has_stops() || self.floor != self.target {
            self.behaviour = Behaviour::Moving;
        } else {
            self.finish_run();
        }
    }

    // End of a run: park at the terminal, or complete a pending shutdown.
    fn finish_run(&mut self) {
        if self.shutting_down {
            // Anyone still aboard is released here at the ground floor.
            self.manifest.clear();
            self.clear_stops();
            self.behaviour = Behaviour::OutOfService;
            self.door_timer = 0;
            self.idle_timer = 0;
            self.shutting_down = false;
            debug!("cabin out of service at floor {}", self.floor);
        } else {
            self.behaviour = Behaviour::Idle;
            self.idle_timer = IDLE_WAIT_TICKS;
        }
    }

    // Idle countdown expired: shuttle to the opposite terminal so the cabin
    // parks where a pending queue can reach it.
    fn reposition(&mut self) {
        self.target = if self.floor == 0 { self.n_floors - 1 } else { 0 };
        if self.target == self.floor {
            // Single-floor building: nowhere to go.
            self.idle_timer = IDLE_WAIT_TICKS;
            return;
        }
        self.behaviour = Behaviour::Moving;
        debug!(
            "idle cabin at floor {} repositioning to floor {}",
            self.floor, self.target
        );
    }

    fn has_stops(&self) -> bool {
        self.stops.iter().any(|&stop| stop)
    }

    fn clear_stops(&mut self) {
        self.stops.iter_mut().for_each(|stop| *stop = false);
    }
}

/***************************************/
/*          Test introspection         */
/***************************************/
#[cfg(test)]
impl ElevatorFSM {
    pub fn test_get_behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub fn test_get_manifest(&self) -> &[Request] {
        &self.manifest
    }

    pub fn test_expire_idle_timer(&mut self) {
        self.idle_timer = 0;
    }
}
