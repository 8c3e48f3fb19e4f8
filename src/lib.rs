#![doc(test(attr(deny(warnings))))]

//! Cofrinho offers savings-goal tracking primitives: goals funded through
//! independent cash and Pix balances, derived progress metrics, friend
//! comparison ranking, and an activity feed, plus an interactive CLI.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cofrinho tracing initialized.");
    });
}
