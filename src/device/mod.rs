//! Device classification module
//!
//! Maps platform-reported identification strings (manufacturer, model,
//! device) onto known hardware families that need special-case handling
//! elsewhere in a host application. Everything here is pure and operates on
//! in-memory strings only; obtaining those strings is the host's job (see
//! [`crate::probe`]).

mod classifier;
mod family;
mod identity;

pub use classifier::{
    classify, is_amazon, is_amazon_cello, is_manufacturer, matches_family, Classification,
    MANUFACTURER_AMAZON, MODEL_AMAZON_CELLO,
};
pub use family::{FamilyId, KnownDeviceFamily, KNOWN_FAMILIES};
pub use identity::DeviceIdentity;
