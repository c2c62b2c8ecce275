//! Application services composing the domain with persistence adapters.

pub mod admin;
pub mod content;
pub mod error;
pub mod events;
pub mod pagination;
pub mod repos;
pub mod seed;
