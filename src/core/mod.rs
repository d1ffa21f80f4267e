pub mod errors;
pub mod http;
pub mod tasks;

pub use errors::{
    ErrorKind,
    PredictError,
};
