//! WMS Core
//!
//! Core types for the workflow monitoring client.
//!
//! This crate contains:
//! - Domain types: sessions, run metadata, log events and response outcomes
//! - DTOs: request and response bodies exchanged with the monitoring server

pub mod domain;
pub mod dto;
