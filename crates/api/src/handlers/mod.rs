//! HTTP request handlers, one module per resource.

pub mod achievement;
pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod lead;
pub mod project;
pub mod task;
