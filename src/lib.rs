//! sheetdash: a production dashboard over a Google Sheets range.
//!
//! Two clients initialize side by side ([`session::ReadinessTracker`]), the
//! user authorizes through [`identity::TokenClient`], and the
//! [`session::SessionController`] loads the range with [`sheets::SheetsClient`]
//! and renders it through a [`dashboard::DashboardView`].

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod session;
pub mod sheets;
pub mod ui;
