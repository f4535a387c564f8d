/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::error::SystemError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/**
 * A single passenger request: board at `from_floor`, leave at `to_floor`.
 *
 * Floors are 0-indexed. The pair is immutable once created and its direction
 * is derived, never stored. Range checking against the building height is
 * done by the coordinator at enqueue time; the only thing a `Request` can
 * rule out on its own is `from == to`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Request {
    from_floor: u8,
    to_floor: u8,
}

impl Request {
    pub fn new(from_floor: u8, to_floor: u8) -> Result<Request, SystemError> {
        if from_floor == to_floor {
            return Err(SystemError::InvalidRequest(format!(
                "start and end floor are both {}",
                from_floor
            )));
        }
        Ok(Request {
            from_floor,
            to_floor,
        })
    }

    pub fn from_floor(&self) -> u8 {
        self.from_floor
    }

    pub fn to_floor(&self) -> u8 {
        self.to_floor
    }

    pub fn direction(&self) -> Direction {
        if self.from_floor < self.to_floor {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}->{}", self.from_floor, self.to_floor)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    #[serde(rename = "running")]
    Running,
    #[serde(rename = "stopping")]
    Stopping,
    #[serde(rename = "outOfService")]
    OutOfService,
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let display = match *self {
            SystemStatus::Running => "Running",
            SystemStatus::Stopping => "Stopping",
            SystemStatus::OutOfService => "Out Of Service",
        };
        write!(f, "{}", display)
    }
}

/// Point-in-time summary of one cabin, as exposed to external consumers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorReport {
    #[serde(rename = "takingRequests")]
    pub taking_requests: bool,
    pub floor: u8,
    #[serde(rename = "doorTimer")]
    pub door_timer: u8,
    #[serde(rename = "idleTimer")]
    pub idle_timer: u8,
}

/**
 * Consolidated read-only snapshot of the whole building.
 *
 * Produced by `Building::report()`; every field is an owned copy taken at
 * the moment of the call, so the snapshot stays consistent no matter what
 * the coordinator does afterwards. The `Display` rendering is part of the
 * external contract (field order and labels included).
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildingReport {
    #[serde(rename = "numFloors")]
    pub n_floors: u8,
    #[serde(rename = "numElevators")]
    pub n_elevators: u8,
    #[serde(rename = "elevatorCapacity")]
    pub capacity: u8,
    pub elevators: Vec<ElevatorReport>,
    #[serde(rename = "upRequests")]
    pub up_queue: Vec<Request>,
    #[serde(rename = "downRequests")]
    pub down_queue: Vec<Request>,
    pub status: SystemStatus,
}

impl fmt::Display for BuildingReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Building Report:")?;
        writeln!(f, "Number of Floors: {}", self.n_floors)?;
        writeln!(f, "Number of Elevators: {}", self.n_elevators)?;
        writeln!(f, "Elevator Capacity: {}", self.capacity)?;

        writeln!(f)?;
        writeln!(f, "Elevator Reports:")?;
        for (i, report) in self.elevators.iter().enumerate() {
            writeln!(f, "Elevator {} Report:", i + 1)?;
            writeln!(f, "  - Status: {}", report.taking_requests)?;
            writeln!(f, "  - Current Floor: {}", report.floor)?;
            writeln!(f, "  - Door Open Timer: {}", report.door_timer)?;
            writeln!(f, "  - End Wait Timer: {}", report.idle_timer)?;
        }

        writeln!(f)?;
        writeln!(f, "Up Requests:")?;
        for request in &self.up_queue {
            writeln!(f, "  - {}", request)?;
        }

        writeln!(f)?;
        writeln!(f, "Down Requests:")?;
        for request in &self.down_queue {
            writeln!(f, "  - {}", request)?;
        }

        writeln!(f)?;
        writeln!(f, "System Status: {}", self.status)
    }
}
