//! Platform identity probe
//!
//! Obtains a [`DeviceIdentity`] for the running machine. This is host-side
//! plumbing; the classifier itself never queries the platform.
//!
//! Detection order:
//! - Android: system properties from `getprop` (the values behind
//!   `Build.MANUFACTURER`, `Build.MODEL`, `Build.DEVICE`)
//! - Linux: DMI data under /sys/class/dmi/id
//! - Otherwise an empty identity, which matches no family

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::device::DeviceIdentity;

const PROP_MANUFACTURER: &str = "ro.product.manufacturer";
const PROP_MODEL: &str = "ro.product.model";
const PROP_DEVICE: &str = "ro.product.device";

const DMI_ROOT: &str = "/sys/class/dmi/id";

/// Probe errors
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("{0} not available")]
    CommandUnavailable(String),

    #[error("{command} exited with {status}")]
    CommandFailed { command: String, status: String },

    #[error("Property missing: {0}")]
    PropertyMissing(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Detect the identity of the running device.
///
/// Never fails: when every method comes up empty the result is an empty
/// identity.
pub fn detect() -> DeviceIdentity {
    match detect_getprop() {
        Ok(identity) => return identity,
        Err(err) => debug!(error = %err, "getprop probe failed"),
    }

    #[cfg(target_os = "linux")]
    {
        match detect_dmi(Path::new(DMI_ROOT)) {
            Ok(identity) => return identity,
            Err(err) => debug!(error = %err, "DMI probe failed"),
        }
    }

    debug!("No platform identity available, using empty identity");
    DeviceIdentity::default()
}

/// Read Android system properties via `getprop`
fn detect_getprop() -> Result<DeviceIdentity, ProbeError> {
    let output = Command::new("getprop")
        .output()
        .map_err(|_| ProbeError::CommandUnavailable("getprop".to_string()))?;

    if !output.status.success() {
        return Err(ProbeError::CommandFailed {
            command: "getprop".to_string(),
            status: output.status.to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    identity_from_props(&parse_getprop_listing(&stdout))
}

/// Parse `getprop` listing output.
///
/// Format: one property per line, `[ro.product.model]: [SD4930UR]`.
pub fn parse_getprop_listing(output: &str) -> HashMap<String, String> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (key, value) = line.split_once("]: [")?;
            let key = key.strip_prefix('[')?;
            let value = value.strip_suffix(']')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

fn identity_from_props(props: &HashMap<String, String>) -> Result<DeviceIdentity, ProbeError> {
    let manufacturer = props
        .get(PROP_MANUFACTURER)
        .ok_or_else(|| ProbeError::PropertyMissing(PROP_MANUFACTURER.to_string()))?;

    // Values are passed through untouched; classification depends on the
    // exact strings the platform reports.
    let get = |key: &str| props.get(key).cloned().unwrap_or_default();

    Ok(DeviceIdentity {
        manufacturer: manufacturer.clone(),
        model: get(PROP_MODEL),
        device: get(PROP_DEVICE),
    })
}

/// Read vendor/product from a DMI sysfs directory
fn detect_dmi(root: &Path) -> Result<DeviceIdentity, ProbeError> {
    let manufacturer = read_dmi_field(root, "sys_vendor")?;
    let model = read_dmi_field(root, "product_name").unwrap_or_default();
    let device = read_dmi_field(root, "product_family")
        .or_else(|_| read_dmi_field(root, "board_name"))
        .unwrap_or_default();

    Ok(DeviceIdentity {
        manufacturer,
        model,
        device,
    })
}

fn read_dmi_field(root: &Path, name: &str) -> Result<String, ProbeError> {
    let value = fs::read_to_string(root.join(name))?;
    // sysfs values carry a trailing newline
    let value = value.trim_end_matches('\n');
    if value.is_empty() {
        return Err(ProbeError::PropertyMissing(name.to_string()));
    }
    Ok(value.to_string())
}
