//! Compliance document catalog and document-type allow-list

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The five trade documents the assistant knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "IEC")]
    Iec,
    #[serde(rename = "AD Code")]
    AdCode,
    #[serde(rename = "Commercial Invoice")]
    CommercialInvoice,
    #[serde(rename = "Bill of Lading")]
    BillOfLading,
    #[serde(rename = "Packing List")]
    PackingList,
}

impl DocumentType {
    /// All types, in catalog order
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Iec,
        DocumentType::AdCode,
        DocumentType::CommercialInvoice,
        DocumentType::BillOfLading,
        DocumentType::PackingList,
    ];

    /// Display name, also the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Iec => "IEC",
            DocumentType::AdCode => "AD Code",
            DocumentType::CommercialInvoice => "Commercial Invoice",
            DocumentType::BillOfLading => "Bill of Lading",
            DocumentType::PackingList => "Packing List",
        }
    }

    /// Human-readable description from the catalog
    pub fn description(&self) -> &'static str {
        match self {
            DocumentType::Iec => "Importer-Exporter Code, required for international trade.",
            DocumentType::AdCode => "Authorized Dealer Code for foreign currency transactions.",
            DocumentType::CommercialInvoice => "Details of goods, value, and sale terms.",
            DocumentType::BillOfLading => "Proof of goods received for shipment.",
            DocumentType::PackingList => "Details of shipment contents.",
        }
    }

    /// Catalog entry for this type
    pub fn descriptor(&self) -> DocumentDescriptor {
        DocumentDescriptor {
            document: self.as_str(),
            description: self.description(),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    /// Exact, case-sensitive match against the allow-list
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidDocumentType(s.to_string()))
    }
}

/// Read-only (type, description) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentDescriptor {
    pub document: &'static str,
    pub description: &'static str,
}

/// Full catalog in fixed order
pub fn catalog() -> Vec<DocumentDescriptor> {
    DocumentType::ALL.iter().map(DocumentType::descriptor).collect()
}

/// Sample 3 to 5 distinct catalog entries
pub fn sample_documents<R: Rng>(rng: &mut R) -> Vec<DocumentDescriptor> {
    let count = rng.gen_range(3..=5);
    DocumentType::ALL
        .choose_multiple(rng, count)
        .map(DocumentType::descriptor)
        .collect()
}
