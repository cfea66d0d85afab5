pub mod advice;
pub mod analysis;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod ui;
