//! Structured addresses stored as JSON strings.
//!
//! A patient address is a `{"region", "district", "township"}` triple serialised into the
//! backend's single `address` text column. Older records hold free text, which is displayed
//! as-is.

use crate::constants::ADDRESS_PLACEHOLDER;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSelection {
    pub region: String,
    pub district: String,
    pub township: String,
}

impl AddressSelection {
    fn is_complete(&self) -> bool {
        [&self.region, &self.district, &self.township]
            .iter()
            .all(|part| !part.trim().is_empty())
    }
}

/// Decodes a stored address. Invalid JSON or any blank part yields `None`.
pub fn parse_address_json(value: &str) -> Option<AddressSelection> {
    let selection: AddressSelection = serde_json::from_str(value).ok()?;
    selection.is_complete().then_some(selection)
}

/// Encodes a selection for storage exactly as given; `None` stays `None`.
pub fn to_address_json(selection: Option<&AddressSelection>) -> Option<String> {
    serde_json::to_string(selection?).ok()
}

/// `township, district, region` for structured addresses, legacy text unchanged, and the
/// placeholder when nothing is stored.
pub fn format_address_for_display(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return ADDRESS_PLACEHOLDER.to_string();
    };
    match parse_address_json(raw) {
        Some(a) => format!("{}, {}, {}", a.township, a.district, a.region),
        None => raw.to_string(),
    }
}

struct District {
    name: &'static str,
    townships: &'static [&'static str],
}

struct Region {
    name: &'static str,
    districts: &'static [District],
}

static CATALOG: &[Region] = &[
    Region {
        name: "Yangon",
        districts: &[
            District {
                name: "East",
                townships: &["Botahtaung", "Dagon Seikkan", "Pazundaung", "Thaketa"],
            },
            District {
                name: "West",
                townships: &["Ahlone", "Bahan", "Kamayut", "Lanmadaw", "Latha"],
            },
            District {
                name: "North",
                townships: &["Hlaingthaya", "Insein", "Mingaladon"],
            },
            District {
                name: "South",
                townships: &["Kyauktan", "Thanlyin"],
            },
        ],
    },
    Region {
        name: "Mandalay",
        districts: &[
            District {
                name: "Mandalay",
                townships: &["Aungmyethazan", "Chanayethazan", "Mahaaungmyay", "Pyigyitagon"],
            },
            District {
                name: "Pyin Oo Lwin",
                townships: &["Madaya", "Pyin Oo Lwin", "Singu"],
            },
            District {
                name: "Meiktila",
                townships: &["Mahlaing", "Meiktila", "Thazi"],
            },
        ],
    },
    Region {
        name: "Ayeyarwady",
        districts: &[
            District {
                name: "Pathein",
                townships: &["Kangyidaunt", "Ngapudaw", "Pathein"],
            },
            District {
                name: "Hinthada",
                townships: &["Hinthada", "Zalun"],
            },
        ],
    },
    Region {
        name: "Bago",
        districts: &[
            District {
                name: "Bago",
                townships: &["Bago", "Thanatpin", "Waw"],
            },
            District {
                name: "Taungoo",
                townships: &["Oktwin", "Taungoo"],
            },
        ],
    },
    Region {
        name: "Shan",
        districts: &[
            District {
                name: "Taunggyi",
                townships: &["Kalaw", "Nyaungshwe", "Taunggyi"],
            },
            District {
                name: "Lashio",
                townships: &["Hsenwi", "Lashio"],
            },
        ],
    },
    Region {
        name: "Mon",
        districts: &[District {
            name: "Mawlamyine",
            townships: &["Mawlamyine", "Mudon", "Thanbyuzayat"],
        }],
    },
];

pub fn regions() -> Vec<&'static str> {
    CATALOG.iter().map(|r| r.name).collect()
}

/// Districts of `region`; empty for an unknown region.
pub fn districts(region: &str) -> Vec<&'static str> {
    CATALOG
        .iter()
        .find(|r| r.name == region)
        .map(|r| r.districts.iter().map(|d| d.name).collect())
        .unwrap_or_default()
}

pub fn townships(region: &str, district: &str) -> Vec<&'static str> {
    CATALOG
        .iter()
        .find(|r| r.name == region)
        .and_then(|r| r.districts.iter().find(|d| d.name == district))
        .map(|d| d.townships.to_vec())
        .unwrap_or_default()
}
