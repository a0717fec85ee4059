//! Mission Manager - field-service back office.
//!
//! Tracks missions and the interventions scheduled under them, detects
//! interventions that ran past their due date, drives the review workflow
//! of intervention reports, and records in-app notifications for every
//! transition that someone needs to hear about.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
