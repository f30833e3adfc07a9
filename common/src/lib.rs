// Shared library for the Meet Sync event service

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod display;
pub mod errors;
pub mod models;
pub mod service;
pub mod telemetry;
pub mod validation;
