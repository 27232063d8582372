//! Device classifier
//!
//! All checks are total functions over strings: missing or unexpected
//! platform values classify as "no match", never as an error.
//!
//! Family membership uses a case-sensitive substring match on the
//! manufacturer (firmware builds report "samsung", "Samsung",
//! "Samsung Electronics Co., Ltd.", ...) while device identifiers and models
//! must match exactly.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::family::{FamilyId, KnownDeviceFamily, KNOWN_FAMILIES};
use super::identity::DeviceIdentity;

pub const MANUFACTURER_AMAZON: &str = "Amazon";
/// Amazon Fire Phone ("cello")
pub const MODEL_AMAZON_CELLO: &str = "SD4930UR";

/// Exact, case-sensitive manufacturer comparison. A missing manufacturer
/// never matches.
pub fn is_manufacturer(identity: &DeviceIdentity, manufacturer: &str) -> bool {
    !identity.manufacturer.is_empty() && identity.manufacturer == manufacturer
}

pub fn is_amazon(identity: &DeviceIdentity) -> bool {
    is_manufacturer(identity, MANUFACTURER_AMAZON)
}

pub fn is_amazon_cello(identity: &DeviceIdentity) -> bool {
    is_amazon(identity) && identity.model == MODEL_AMAZON_CELLO
}

/// Whether the identity belongs to `family`
pub fn matches_family(identity: &DeviceIdentity, family: &KnownDeviceFamily) -> bool {
    matches_device_set(identity, family.manufacturer_substrings, family.device_ids)
}

/// Manufacturer contains one of `manufacturer_substrings` and the device is
/// exactly one of `device_ids`.
fn matches_device_set(
    identity: &DeviceIdentity,
    manufacturer_substrings: &[&str],
    device_ids: &[&str],
) -> bool {
    if identity.device.is_empty() {
        return false;
    }

    let manufacturer_ok = manufacturer_substrings
        .iter()
        .any(|s| !s.is_empty() && identity.manufacturer.contains(s));
    if !manufacturer_ok {
        return false;
    }

    device_ids.iter().any(|d| *d == identity.device)
}

/// Every registered family the identity belongs to, in registration order
pub fn classify(identity: &DeviceIdentity) -> Vec<&'static KnownDeviceFamily> {
    let matched: Vec<_> = KNOWN_FAMILIES
        .iter()
        .filter(|family| matches_family(identity, family))
        .collect();

    for family in &matched {
        debug!(
            family = %family.id,
            manufacturer = %identity.manufacturer,
            device = %identity.device,
            "Device matched known family"
        );
    }

    matched
}

/// Classification result a host computes once at startup and passes down
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Identity the result was computed from
    pub identity: DeviceIdentity,
    /// Matched families
    pub families: BTreeSet<FamilyId>,
    /// Manufacturer is exactly "Amazon"
    pub amazon: bool,
    /// Amazon Fire Phone
    pub amazon_cello: bool,
}

impl Classification {
    pub fn of(identity: DeviceIdentity) -> Self {
        let families = classify(&identity).into_iter().map(|f| f.id).collect();
        let amazon = is_amazon(&identity);
        let amazon_cello = is_amazon_cello(&identity);

        Self {
            identity,
            families,
            amazon,
            amazon_cello,
        }
    }

    pub fn has(&self, id: FamilyId) -> bool {
        self.families.contains(&id)
    }

    pub fn is_samsung_s3(&self) -> bool {
        self.has(FamilyId::GalaxyS3)
    }

    pub fn is_samsung_note2(&self) -> bool {
        self.has(FamilyId::GalaxyNote2)
    }

    pub fn is_amazon(&self) -> bool {
        self.amazon
    }

    pub fn is_amazon_cello(&self) -> bool {
        self.amazon_cello
    }

    /// Matched families with their reference data
    pub fn families(&self) -> impl Iterator<Item = &'static KnownDeviceFamily> + '_ {
        self.families.iter().map(|id| KnownDeviceFamily::get(*id))
    }

    /// True when no special-case handling applies
    pub fn is_generic(&self) -> bool {
        self.families.is_empty() && !self.amazon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(manufacturer: &str, device: &str) -> DeviceIdentity {
        DeviceIdentity::new(manufacturer, "", device)
    }

    fn ids(identity: &DeviceIdentity) -> Vec<FamilyId> {
        classify(identity).into_iter().map(|f| f.id).collect()
    }

    #[test]
    fn galaxy_s3_lowercase_manufacturer() {
        assert_eq!(ids(&identity("samsung", "m0")), vec![FamilyId::GalaxyS3]);
    }

    #[test]
    fn galaxy_note2_with_corporate_manufacturer() {
        assert_eq!(
            ids(&identity("Samsung Electronics", "t0lteatt")),
            vec![FamilyId::GalaxyNote2]
        );
        assert_eq!(
            ids(&identity("Samsung Electronics Co., Ltd.", "SC-02E")),
            vec![FamilyId::GalaxyNote2]
        );
    }

    #[test]
    fn unknown_samsung_device_matches_nothing() {
        assert!(classify(&identity("Samsung", "unknown-device-id")).is_empty());
    }

    #[test]
    fn manufacturer_without_substring_never_matches() {
        for family in KNOWN_FAMILIES {
            for device in family.device_ids {
                for manufacturer in ["", "LGE", "SAMSUNG", "motorola", "Samsun"] {
                    assert!(
                        !matches_family(&identity(manufacturer, device), family),
                        "{manufacturer}/{device}"
                    );
                }
            }
        }
    }

    #[test]
    fn device_outside_set_never_matches() {
        let s3 = KnownDeviceFamily::get(FamilyId::GalaxyS3);
        for device in ["", "M0", "m0 ", " m0", "m0x", "t0lteatt", "d2"] {
            for manufacturer in ["samsung", "Samsung", "Samsung Electronics"] {
                assert!(
                    !matches_family(&identity(manufacturer, device), s3),
                    "{manufacturer}/{device}"
                );
            }
        }
    }

    #[test]
    fn every_listed_device_matches_its_family() {
        for family in KNOWN_FAMILIES {
            for device in family.device_ids {
                assert!(matches_family(&identity("samsung", device), family));
            }
        }
    }

    #[test]
    fn is_manufacturer_is_exact() {
        let id = identity("Amazon", "");
        assert!(is_manufacturer(&id, "Amazon"));
        assert!(!is_manufacturer(&id, "amazon"));
        assert!(!is_manufacturer(&id, "Amaz"));
        assert!(!is_manufacturer(&id, ""));
    }

    #[test]
    fn missing_manufacturer_never_matches() {
        let missing = DeviceIdentity::default();
        assert!(!is_manufacturer(&missing, ""));
        assert!(!is_manufacturer(&missing, MANUFACTURER_AMAZON));
        assert!(!is_amazon(&DeviceIdentity::new("", MODEL_AMAZON_CELLO, "")));
    }

    #[test]
    fn amazon_cello_requires_exact_model() {
        let cello = DeviceIdentity::new("Amazon", "SD4930UR", "");
        assert!(is_amazon(&cello));
        assert!(is_amazon_cello(&cello));

        assert!(!is_amazon_cello(&DeviceIdentity::new("Amazon", "sd4930ur", "")));
        assert!(!is_amazon_cello(&DeviceIdentity::new("Amazon", "KFTHWI", "")));
        assert!(!is_amazon_cello(&DeviceIdentity::new(
            "Amazon.com",
            "SD4930UR",
            ""
        )));
    }

    #[test]
    fn empty_identity_matches_nothing() {
        let classification = Classification::of(DeviceIdentity::default());
        assert!(classification.is_generic());
        assert!(!classification.is_amazon_cello());
    }

    #[test]
    fn classify_is_idempotent() {
        let id = identity("samsung", "d2vzw");
        assert_eq!(classify(&id), classify(&id));
        assert_eq!(Classification::of(id.clone()), Classification::of(id));
    }

    #[test]
    fn classification_accessors() {
        let s3 = Classification::of(identity("samsung", "m0"));
        assert!(s3.is_samsung_s3());
        assert!(!s3.is_samsung_note2());
        assert!(!s3.is_generic());
        assert_eq!(
            s3.families().map(|f| f.name).collect::<Vec<_>>(),
            vec!["Samsung Galaxy S3"]
        );

        let cello = Classification::of(DeviceIdentity::new("Amazon", "SD4930UR", "cello"));
        assert!(cello.is_amazon());
        assert!(cello.is_amazon_cello());
        assert!(cello.families.is_empty());
    }

    #[test]
    fn classification_serializes_family_ids() {
        let json = serde_json::to_value(Classification::of(identity("samsung", "t03g"))).unwrap();
        assert_eq!(json["families"], serde_json::json!(["galaxy_note2"]));
        assert_eq!(json["identity"]["device"], "t03g");
        assert_eq!(json["amazon"], false);
    }
}
