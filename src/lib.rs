//! Core library exports for the product catalog service.
//!
//! This crate exposes the domain entities, Diesel models, repositories,
//! forms, routes and service layers used by the catalog web application.

pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
