//! Infrastructure layer - Cache backends, repositories and services

pub mod cache;
pub mod logging;
pub mod menu;
pub mod services;
