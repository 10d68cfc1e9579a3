//! Link configuration
//!
//! Network credentials baked into the provisioning command sequence and the
//! fixed delays used by the bring-up driver.
//!
//! # Build-time Defaults
//!
//! `build.rs` exports `WIFI_SSID` and `WIFI_PASSWORD` from the build
//! environment. When they are unset the reference network `paradise` /
//! `kiwibird` is used.

pub mod timing;
pub mod wifi;

pub use timing::WiflyTimings;
pub use wifi::{ConfigError, WifiCredentials};
