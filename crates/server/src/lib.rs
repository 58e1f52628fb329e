pub mod backend;
pub mod config;
pub mod health;
pub mod openapi;
pub mod rest;
pub mod state;
pub mod telemetry;
