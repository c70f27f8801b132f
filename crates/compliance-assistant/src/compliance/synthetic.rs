//! Randomized placeholder content for each document type

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::catalog::DocumentType;

/// Sentinel content for document types outside the catalog
pub const UNKNOWN_CONTENT: &str = "unknown";

const COMPANIES: &[&str] = &[
    "Shree Ganesh Exports Pvt Ltd",
    "Coastal Spice Traders",
    "Indus Textiles LLP",
    "Nandi Engineering Works",
    "Malabar Cashew Company",
];

const BUYERS: &[&str] = &[
    "Hamburg Import GmbH",
    "Pacific Rim Distributors Inc",
    "Gulf Star Trading LLC",
    "Rotterdam Fresh Foods BV",
    "Maple Leaf Wholesale Ltd",
];

const GOODS: &[&str] = &[
    "Cotton Yarn",
    "Black Pepper",
    "Basmati Rice",
    "Brass Fittings",
    "Cashew Kernels",
    "Handloom Sarees",
];

const BANKS: &[&str] = &[
    "State Bank of India",
    "HDFC Bank",
    "ICICI Bank",
    "Bank of Baroda",
    "Axis Bank",
];

const PORTS: &[&str] = &[
    "Nhava Sheva (INNSA1)",
    "Chennai (INMAA1)",
    "Mundra (INMUN1)",
    "Cochin (INCOK1)",
    "Kolkata (INCCU1)",
];

const FOREIGN_PORTS: &[&str] = &[
    "Hamburg",
    "Rotterdam",
    "Jebel Ali",
    "Singapore",
    "Los Angeles",
];

const VESSELS: &[&str] = &["MSC Aurora", "Maersk Kolkata", "CMA CGM Tigris", "Ever Grace"];

/// Synthesized document payload
#[derive(Debug, Clone, Serialize)]
pub struct SyntheticDocument {
    pub document_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<Uuid>,
    pub content: Value,
}

impl SyntheticDocument {
    /// True when the type was not recognized
    pub fn is_unknown(&self) -> bool {
        self.content == Value::String(UNKNOWN_CONTENT.to_string())
    }
}

/// Generate content for a document-type name.
///
/// Unknown names produce the `"unknown"` sentinel instead of an error.
pub fn generate<R: Rng>(document_type: &str, rng: &mut R) -> SyntheticDocument {
    let Ok(doc_type) = document_type.parse::<DocumentType>() else {
        return SyntheticDocument {
            document_type: document_type.to_string(),
            document_id: None,
            content: Value::String(UNKNOWN_CONTENT.to_string()),
        };
    };

    let content = match doc_type {
        DocumentType::CommercialInvoice => commercial_invoice(rng),
        DocumentType::Iec => iec(rng),
        DocumentType::AdCode => ad_code(rng),
        DocumentType::BillOfLading => bill_of_lading(rng),
        DocumentType::PackingList => packing_list(rng),
    };

    SyntheticDocument {
        document_type: doc_type.to_string(),
        document_id: Some(Uuid::new_v4()),
        content,
    }
}

fn pick<'a, R: Rng>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn digits<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

fn past_date<R: Rng>(rng: &mut R, max_days: i64) -> String {
    (Utc::now() - Duration::days(rng.gen_range(0..=max_days)))
        .format("%Y-%m-%d")
        .to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn commercial_invoice<R: Rng>(rng: &mut R) -> Value {
    let items: Vec<Value> = (0..rng.gen_range(1..=4))
        .map(|_| {
            let quantity = rng.gen_range(10..=500u32);
            let unit_price = round2(rng.gen_range(1.5..250.0));
            json!({
                "description": pick(rng, GOODS),
                "quantity": quantity,
                "unit_price": unit_price,
                "amount": round2(f64::from(quantity) * unit_price),
            })
        })
        .collect();
    let total: f64 = items.iter().filter_map(|i| i["amount"].as_f64()).sum();

    json!({
        "invoice_number": format!("INV-{}", digits(rng, 5)),
        "invoice_date": past_date(rng, 30),
        "exporter": pick(rng, COMPANIES),
        "importer": pick(rng, BUYERS),
        "currency": pick(rng, &["USD", "EUR", "AED", "GBP"]),
        "items": items,
        "total_value": round2(total),
    })
}

fn iec<R: Rng>(rng: &mut R) -> Value {
    let letters: String = (0..5)
        .map(|_| char::from(b'A' + rng.gen_range(0..26u8)))
        .collect();
    let check = char::from(b'A' + rng.gen_range(0..26u8));

    json!({
        "iec_number": digits(rng, 10),
        "business_name": pick(rng, COMPANIES),
        "pan": format!("{}{}{}", letters, digits(rng, 4), check),
        "issue_date": past_date(rng, 3650),
        "status": pick(rng, &["Active", "Active", "Active", "Suspended"]),
    })
}

fn ad_code<R: Rng>(rng: &mut R) -> Value {
    json!({
        "ad_code": digits(rng, 14),
        "bank_name": pick(rng, BANKS),
        "branch": pick(rng, &["Mumbai Fort", "Chennai Parrys", "Kochi Willingdon Island", "Ahmedabad Ashram Road"]),
        "port_code": pick(rng, PORTS),
    })
}

fn bill_of_lading<R: Rng>(rng: &mut R) -> Value {
    json!({
        "bl_number": format!("BL-{}", digits(rng, 8)),
        "vessel": pick(rng, VESSELS),
        "voyage": format!("{}{}", digits(rng, 3), pick(rng, &["E", "W", "N", "S"])),
        "shipper": pick(rng, COMPANIES),
        "consignee": pick(rng, BUYERS),
        "port_of_loading": pick(rng, PORTS),
        "port_of_discharge": pick(rng, FOREIGN_PORTS),
        "container_count": rng.gen_range(1..=12u32),
        "shipped_on": past_date(rng, 60),
    })
}

fn packing_list<R: Rng>(rng: &mut R) -> Value {
    let packages: Vec<Value> = (1..=rng.gen_range(1..=5u32))
        .map(|package_no| {
            let net = round2(rng.gen_range(5.0..800.0));
            json!({
                "package_no": package_no,
                "contents": pick(rng, GOODS),
                "net_weight_kg": net,
                "gross_weight_kg": round2(net * rng.gen_range(1.02..1.15)),
            })
        })
        .collect();
    let total_net: f64 = packages.iter().filter_map(|p| p["net_weight_kg"].as_f64()).sum();
    let total_gross: f64 = packages
        .iter()
        .filter_map(|p| p["gross_weight_kg"].as_f64())
        .sum();

    json!({
        "packing_list_number": format!("PL-{}", digits(rng, 5)),
        "exporter": pick(rng, COMPANIES),
        "total_packages": packages.len(),
        "packages": packages,
        "total_net_weight_kg": round2(total_net),
        "total_gross_weight_kg": round2(total_gross),
    })
}
