/***************************************/
/*               Macros                */
/***************************************/
// Unwrap a Result or log the error and exit. For driver startup paths only;
// the core modules propagate errors instead.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(e) => {
                error!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    };
}
