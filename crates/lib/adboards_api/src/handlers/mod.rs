//! Request handlers.

pub mod ads;
pub mod auth;
pub mod complaints;
pub mod favorites;
pub mod people;
