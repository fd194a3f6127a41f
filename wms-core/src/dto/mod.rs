//! DTOs for communication with the monitoring server

pub mod service;
pub mod workflow;
