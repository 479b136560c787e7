//! Vitrine - Personal site backend
//!
//! This library provides the API, services, and storage layers for a
//! personal website: blog posts, portfolio projects, and contact
//! submissions behind a token-authenticated admin surface.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
