//! Server module for building the two HTTP front ends
//!
//! - `ServerBuilder` wires a database (or stub services) into a front end
//! - `ServerHost` carries the services the exposures dispatch to
//! - `exposure` holds the store web API and the product function app

pub mod builder;
pub mod exposure;
pub mod host;
pub mod telemetry;

pub use builder::ServerBuilder;
pub use exposure::{Exposure, FunctionsExposure, RestExposure};
pub use host::ServerHost;
pub use telemetry::init_tracing;
