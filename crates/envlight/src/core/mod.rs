//! Core configuration shared by every subsystem

pub mod config;
