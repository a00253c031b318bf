//! Domain services used by the HTTP routes and background pollers.
//!
//! ARCHITECTURE
//! ============
//! Service modules own polling, session bookkeeping, and persistence so
//! route handlers stay focused on request/response translation.

pub mod activity;
pub mod health;
pub mod kpi_monitor;
pub mod recording;
pub mod toast;
