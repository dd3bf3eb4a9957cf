pub mod routes;
pub mod startup;
pub mod errors;
pub mod response;
pub mod openapi;

pub use startup::{build_app, run};
