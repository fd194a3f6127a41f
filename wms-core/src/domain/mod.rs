//! Domain types

pub mod event;
pub mod outcome;
pub mod session;
