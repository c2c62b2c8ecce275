//! Akademi content service.
//!
//! A multilingual institutional content backend: posts (blog, events, videos,
//! podcasts, services), static content pages, heroes, FAQs and site settings
//! served out of Postgres through a cached, locale-aware read layer.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod util;
