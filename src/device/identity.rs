//! Platform-reported device identity

use serde::{Deserialize, Serialize};

/// Identification strings reported by the platform.
///
/// On Android these are `Build.MANUFACTURER`, `Build.MODEL` and
/// `Build.DEVICE`. A field the platform did not report is an empty string;
/// empty fields never match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Vendor name (e.g., "samsung", "Samsung Electronics Co., Ltd.")
    #[serde(default)]
    pub manufacturer: String,
    /// User-facing model name (e.g., "SD4930UR")
    #[serde(default)]
    pub model: String,
    /// Hardware revision code (e.g., "m0", "t0lteatt")
    #[serde(default)]
    pub device: String,
}

impl DeviceIdentity {
    pub fn new(
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
            device: device.into(),
        }
    }

    /// True when the platform reported nothing at all.
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_empty() && self.model.is_empty() && self.device.is_empty()
    }

    /// Replace fields with the given overrides where present.
    pub fn with_overrides(
        mut self,
        manufacturer: Option<&str>,
        model: Option<&str>,
        device: Option<&str>,
    ) -> Self {
        if let Some(m) = manufacturer {
            self.manufacturer = m.to_string();
        }
        if let Some(m) = model {
            self.model = m.to_string();
        }
        if let Some(d) = device {
            self.device = d.to_string();
        }
        self
    }
}

impl std::fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let or_unknown = |s: &str| if s.is_empty() { "?" } else { s }.to_string();
        write!(
            f,
            "{} {} ({})",
            or_unknown(&self.manufacturer),
            or_unknown(&self.model),
            or_unknown(&self.device)
        )
    }
}
