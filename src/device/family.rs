//! Known device families
//!
//! Device identifier lists are copied from the Google Play supported devices
//! list (https://support.google.com/googleplay/answer/1727131) and are frozen
//! reference data.

use serde::Serialize;

/// Identifier of a known hardware family
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyId {
    /// Samsung Galaxy S3 (all carrier variants)
    GalaxyS3,
    /// Samsung Galaxy Note 2 (all carrier variants)
    GalaxyNote2,
}

impl std::fmt::Display for FamilyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FamilyId::GalaxyS3 => write!(f, "galaxy_s3"),
            FamilyId::GalaxyNote2 => write!(f, "galaxy_note2"),
        }
    }
}

/// A named set of device identifiers sharing a hardware quirk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownDeviceFamily {
    /// Stable identifier
    pub id: FamilyId,
    /// Marketing name (e.g., "Samsung Galaxy S3")
    pub name: &'static str,
    /// Alternative names for lookups
    pub aliases: &'static [&'static str],
    /// Manufacturer must contain at least one of these (case-sensitive)
    pub manufacturer_substrings: &'static [&'static str],
    /// Device identifiers belonging to the family (exact match)
    pub device_ids: &'static [&'static str],
}

const SAMSUNG: &[&str] = &["samsung", "Samsung"];

/// Every family the classifier knows about, in evaluation order
pub static KNOWN_FAMILIES: &[KnownDeviceFamily] = &[
    KnownDeviceFamily {
        id: FamilyId::GalaxyS3,
        name: "Samsung Galaxy S3",
        aliases: &["Galaxy S3", "S3", "GT-I9300"],
        manufacturer_substrings: SAMSUNG,
        device_ids: &[
            "SC-03E",
            "c1att",
            "c1ktt",
            "c1lgt",
            "c1skt",
            "d2att",
            "d2can",
            "d2cri",
            "d2dcm",
            "d2lteMetroPCS",
            "d2lterefreshspr",
            "d2ltetmo",
            "d2mtr",
            "d2spi",
            "d2spr",
            "d2tfnspr",
            "d2tfnvzw",
            "d2tmo",
            "d2usc",
            "d2vmu",
            "d2vzw",
            "d2xar",
            "m0",
            "m0apt",
            "m0chn",
            "m0cmcc",
            "m0ctc",
            "m0ctcduos",
            "m0skt",
            "m3",
            "m3dcm",
        ],
    },
    KnownDeviceFamily {
        id: FamilyId::GalaxyNote2,
        name: "Samsung Galaxy Note 2",
        aliases: &["Galaxy Note 2", "Note 2", "Note II", "GT-N7100"],
        manufacturer_substrings: SAMSUNG,
        device_ids: &[
            "SC-02E",
            "t03g",
            "t03gchn",
            "t03gchnduos",
            "t03gcmcc",
            "t03gctc",
            "t03gcuduos",
            "t0lte",
            "t0lteatt",
            "t0ltecan",
            "t0ltecmcc",
            "t0ltedcm",
            "t0ltektt",
            "t0ltelgt",
            "t0lteskt",
            "t0ltespr",
            "t0ltetmo",
            "t0lteusc",
            "t0ltevzw",
        ],
    },
];

impl KnownDeviceFamily {
    /// Look up a registered family by id
    pub fn get(id: FamilyId) -> &'static KnownDeviceFamily {
        // Indices follow the order of KNOWN_FAMILIES.
        match id {
            FamilyId::GalaxyS3 => &KNOWN_FAMILIES[0],
            FamilyId::GalaxyNote2 => &KNOWN_FAMILIES[1],
        }
    }

    /// Find a family by id, name or alias, ignoring case and punctuation.
    ///
    /// This is for human lookups (CLI); device classification never uses it.
    pub fn find(query: &str) -> Option<&'static KnownDeviceFamily> {
        let query = normalize_match_key(query);
        if query.is_empty() {
            return None;
        }
        KNOWN_FAMILIES.iter().find(|f| {
            normalize_match_key(&f.id.to_string()) == query
                || normalize_match_key(f.name) == query
                || f.aliases.iter().any(|a| normalize_match_key(a) == query)
        })
    }

    /// Whether `device` is one of this family's identifiers (exact match)
    pub fn contains_device(&self, device: &str) -> bool {
        self.device_ids.iter().any(|d| *d == device)
    }
}

fn normalize_match_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
