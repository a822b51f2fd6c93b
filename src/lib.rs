//! projtrack - a personal project tracker
//!
//! Users record their software projects (name, link, description, status)
//! and tag them with skills. The same SQLite store is driven two ways: a
//! conversational bot that runs `!command` scripts over any chat
//! [`bot::Channel`], and the `projtrack` CLI.
//!
//! # Architecture
//!
//! - [`bot`] - Conversational command scripts
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Project, Skill, Status)
//! - [`storage`] - SQLite database layer
//! - [`config`] - Database path and user resolution
//! - [`validate`] - Choice matching and suggestions
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};
