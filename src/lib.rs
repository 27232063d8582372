//! Device quirks
//!
//! Classifies a device from its platform-reported identification strings
//! into known hardware families that need device-specific workarounds.
//!
//! ```
//! use device_quirks::device::{Classification, DeviceIdentity};
//!
//! let classification = Classification::of(DeviceIdentity::new("samsung", "GT-I9300", "m0"));
//! assert!(classification.is_samsung_s3());
//! ```

pub mod config;
pub mod device;
pub mod probe;
