pub mod error;
pub mod macros;
pub mod structs;

pub use error::SystemError;
pub use structs::BuildingReport;
pub use structs::Direction;
pub use structs::ElevatorReport;
pub use structs::Request;
pub use structs::SystemStatus;
