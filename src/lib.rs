#![cfg_attr(not(any(test, feature = "mock")), no_std)]

//! wifly_link - WiFly radio bring-up and UART relay for embedded targets
//!
//! This library provisions a Roving Networks WiFly module over its UART
//! command interface and then relays upper-layer bytes through it, using
//! platform abstraction traits so the same code runs on target and in host
//! tests.

// Platform abstraction layer (byte transport, mocks)
pub mod platform;

// Core infrastructure (logging, shared state)
pub mod core;

// Link configuration (credentials, timings)
pub mod parameters;

// Device drivers (WiFly state machine, link buffer, client API)
pub mod devices;
