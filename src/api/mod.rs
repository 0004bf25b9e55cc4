//! # API Module
//!
//! HTTP handlers served by moodlist's local servers.
//!
//! ## Web form
//!
//! - [`web::index`] - login link or playlist form
//! - [`web::login`] - redirect to the Spotify consent page
//! - [`web::callback`] - OAuth callback of a web session
//! - [`web::generate`] - runs the playlist pipeline for the submitted form
//! - [`web::logout`] - forgets the session and clears its cookie
//!
//! ## Command line login
//!
//! - [`callback`] - OAuth callback of the one-shot login server
//!
//! ## Monitoring
//!
//! - [`health`] - status and version

mod callback;
mod health;
pub mod pages;
pub mod web;

pub use callback::{callback, complete_login};
pub use health::health;
