//! Plan-set analysis and installation manual lookup.
//!
//! `CatalogAnalyzer` stands in for document extraction: it picks equipment
//! from a fixed catalog of common residential solar hardware. Choices are
//! derived from a SHA-256 digest of the document locator, so the same plan
//! set always yields the same equipment.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{PlanSetAnalyzer, ServiceError};
use crate::domain::EquipmentItem;
use crate::store::views::{INVERTER, SOLAR_PANEL};

struct CatalogModel {
    model: &'static str,
    manufacturer: &'static str,
    specifications: &'static [(&'static str, &'static str)],
}

struct CatalogEntry {
    name: &'static str,
    models: &'static [CatalogModel],
}

static CATALOG: [CatalogEntry; 4] = [
    CatalogEntry {
        name: SOLAR_PANEL,
        models: &[
            CatalogModel {
                model: "SP-400W",
                manufacturer: "SunPower",
                specifications: &[("wattage", "400W"), ("dimensions", "1.7m x 1.0m"), ("efficiency", "22.8%")],
            },
            CatalogModel {
                model: "LG-350N",
                manufacturer: "LG",
                specifications: &[("wattage", "350W"), ("dimensions", "1.6m x 1.0m"), ("efficiency", "21.7%")],
            },
            CatalogModel {
                model: "Q.PEAK-G9",
                manufacturer: "Q CELLS",
                specifications: &[("wattage", "385W"), ("dimensions", "1.7m x 1.0m"), ("efficiency", "20.6%")],
            },
        ],
    },
    CatalogEntry {
        name: INVERTER,
        models: &[
            CatalogModel {
                model: "SB-7.7",
                manufacturer: "SMA",
                specifications: &[("capacity", "7.7kW"), ("efficiency", "97.5%")],
            },
            CatalogModel {
                model: "SE-7600H",
                manufacturer: "SolarEdge",
                specifications: &[("capacity", "7.6kW"), ("efficiency", "99.0%")],
            },
            CatalogModel {
                model: "IQ7+",
                manufacturer: "Enphase",
                specifications: &[("capacity", "295VA"), ("efficiency", "97.0%")],
            },
        ],
    },
    CatalogEntry {
        name: "Mounting System",
        models: &[
            CatalogModel {
                model: "RailMount-S",
                manufacturer: "IronRidge",
                specifications: &[("material", "Aluminum"), ("load", "175 lbs/ft")],
            },
            CatalogModel {
                model: "FlashFoot",
                manufacturer: "QuickMount PV",
                specifications: &[("material", "Aluminum"), ("load", "150 lbs/ft")],
            },
        ],
    },
    CatalogEntry {
        name: "Battery",
        models: &[
            CatalogModel {
                model: "Powerwall 2",
                manufacturer: "Tesla",
                specifications: &[("capacity", "13.5kWh"), ("power", "7kW peak")],
            },
            CatalogModel {
                model: "LG RESU10H",
                manufacturer: "LG",
                specifications: &[("capacity", "9.8kWh"), ("power", "5kW")],
            },
        ],
    },
];

static MANUALS: [(&str, &str); 9] = [
    ("SunPower", "https://us.sunpower.com/sites/default/files/media-library/manuals/mn-sunpower-x-series-residential-installation-guide-532618-revb.pdf"),
    ("LG", "https://www.lg.com/global/business/download/resources/solar/LG_Solar_Installation_Manual.pdf"),
    ("Q CELLS", "https://www.q-cells.com/en/service/downloads/installation-guides"),
    ("SMA", "https://files.sma.de/downloads/SB-US-IA-en-36.pdf"),
    ("SolarEdge", "https://www.solaredge.com/sites/default/files/se-hd-wave-single-phase-inverter-installation-guide-na.pdf"),
    ("Enphase", "https://enphase.com/download/iq7-iq7-iq7x-installation-and-operation-manual"),
    ("IronRidge", "https://www.ironridge.com/downloads/pdfs/XR/XR_Installation_Manual.pdf"),
    ("QuickMount PV", "https://quickmountpv.com/support/technical-documentation.html"),
    ("Tesla", "https://www.tesla.com/sites/default/files/pdfs/powerwall/Powerwall_2_AC_Installation_Manual_en_NA.pdf"),
];

const SEARCH_URL: &str = "https://example.com/search";

/// Installation manual URL for a manufacturer, if one is known.
pub fn manual_url(manufacturer: &str) -> Option<&'static str> {
    MANUALS
        .iter()
        .find(|(name, _)| *name == manufacturer)
        .map(|(_, url)| *url)
}

/// Locate installation instructions for an equipment item.
///
/// Known manufacturers map to their published manual; anything else gets a
/// search link for "{manufacturer} {name} {model} installation manual".
pub fn installation_instructions(item: &EquipmentItem) -> String {
    if let Some(url) = manual_url(&item.manufacturer) {
        return url.to_string();
    }

    let query = format!(
        "{} {} {} installation manual",
        item.manufacturer,
        item.name,
        item.model.as_deref().unwrap_or("")
    );
    format!("{}?q={}", SEARCH_URL, urlencoding::encode(&query))
}

fn quantity_for(name: &str, byte: u8) -> u32 {
    let byte = u32::from(byte);
    match name {
        SOLAR_PANEL => 5 + byte % 26,
        INVERTER => 1 + byte % 2,
        _ => 1 + byte % 5,
    }
}

/// Deterministic catalog-backed analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogAnalyzer;

impl CatalogAnalyzer {
    pub fn extract(url: &str) -> Vec<EquipmentItem> {
        let digest = Sha256::digest(url.as_bytes());

        let count = 2 + usize::from(digest[0]) % 3;

        // Partial Fisher-Yates over the catalog keeps the chosen types distinct.
        let mut order: Vec<usize> = (0..CATALOG.len()).collect();
        for i in 0..count {
            let j = i + usize::from(digest[1 + i]) % (order.len() - i);
            order.swap(i, j);
        }

        order[..count]
            .iter()
            .enumerate()
            .map(|(i, &index)| {
                let entry = &CATALOG[index];
                let model = &entry.models[usize::from(digest[8 + i]) % entry.models.len()];

                EquipmentItem {
                    id: Uuid::new_v4(),
                    name: entry.name.to_string(),
                    manufacturer: model.manufacturer.to_string(),
                    model: Some(model.model.to_string()),
                    quantity: quantity_for(entry.name, digest[16 + i]),
                    specifications: Some(
                        model
                            .specifications
                            .iter()
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .collect::<BTreeMap<_, _>>(),
                    ),
                    installation_url: manual_url(model.manufacturer).map(str::to_string),
                }
            })
            .collect()
    }
}

#[async_trait]
impl PlanSetAnalyzer for CatalogAnalyzer {
    #[instrument(skip(self))]
    async fn analyze(&self, url: &str) -> Result<Vec<EquipmentItem>, ServiceError> {
        if url.trim().is_empty() {
            return Err(ServiceError::Parse("plan set has no location".to_string()));
        }

        let items = Self::extract(url);
        debug!(items = items.len(), "Plan set analyzed");
        Ok(items)
    }
}
