pub mod backend;
pub mod catalog;
pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod orders;
pub mod response;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
