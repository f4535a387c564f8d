/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*             Error types             */
/***************************************/
/// Errors raised by the building coordinator and the elevator state machine.
///
/// All of these are synchronous and local to the call that produced them;
/// nothing is retried internally and no state is mutated on the error path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SystemError {
    /// Out-of-range construction parameters. Fatal to construction.
    #[error("invalid building configuration: {0}")]
    InvalidConfiguration(String),

    /// A request that can never be served: equal floors or out-of-range floor.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An operation that is not legal in the current lifecycle state.
    #[error("invalid system state: {0}")]
    InvalidState(String),
}
