// src/catalog.rs

//! Candidate search-field descriptors. Three sources feed the board: the
//! curated built-in list (padded with generic fillers on demand), a
//! randomized generator for load testing, and an optional YAML catalog file
//! that overrides the built-ins when present. Ids must be unique within any
//! returned sequence; later duplicates are dropped with a warning.

use std::collections::HashSet;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::FieldboardConfig;
use crate::error::{FieldboardError, Result};
use crate::{log_info, log_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Date,
    DateRange,
    DateSingle,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Date => "date",
            FieldKind::DateRange => "date range",
            FieldKind::DateSingle => "single date",
        }
    }
}

/// One optional search field. Identity is `id`; `name` is the display label
/// and need not be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<bool>,
}

impl FieldDescriptor {
    pub fn new(name: &str, id: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            range: None,
        }
    }

    fn with_range(mut self, range: bool) -> Self {
        self.range = Some(range);
        self
    }

    /// Paired from/to inputs. A plain `date` defaults to a range unless the
    /// flag opts out; the flag can also force a range onto other kinds.
    pub fn is_date_range(&self) -> bool {
        match self.kind {
            FieldKind::DateRange => true,
            FieldKind::Date => self.range != Some(false),
            _ => self.range == Some(true),
        }
    }

    /// Single date input.
    pub fn is_date_single(&self) -> bool {
        match self.kind {
            FieldKind::DateSingle => true,
            FieldKind::Date => self.range == Some(false),
            _ => false,
        }
    }
}

lazy_static::lazy_static! {
    /// Curated enterprise fields backing [`generate`] and [`builtin`].
    static ref ENTERPRISE_FIELDS: Vec<FieldDescriptor> = {
        use FieldKind::*;
        [
            ("Customer ID", "customer_id", Text),
            ("First Name", "first_name", Text),
            ("Last Name", "last_name", Text),
            ("Email Address", "email", Email),
            ("Phone Number", "phone", Text),
            ("Account Number", "account_number", Text),
            ("Policy Number", "policy_number", Text),
            ("Claim ID", "claim_id", Text),
            ("Date of Birth", "date_of_birth", Date),
            ("Hire Date", "hire_date", Date),
            ("Effective Date", "effective_date", Date),
            ("Expiry Date", "expiry_date", Date),
            ("Date of Loss", "date_of_loss", Date),
            ("SSN", "ssn", Text),
            ("License Number", "license_number", Text),
            ("ZIP Code", "zip_code", Text),
            ("State", "state", Text),
            ("City", "city", Text),
            ("Address", "address", Text),
            ("Company", "company", Text),
            ("Department", "department", Text),
            ("Position", "position", Text),
            ("Employee ID", "employee_id", Text),
            ("Badge Number", "badge_number", Text),
            ("VIN", "vin", Text),
            ("License Plate", "license_plate", Text),
            ("Reference Number", "reference_number", Text),
            ("Incident Date", "incident_date", Date),
            ("Case Number", "case_number", Text),
            ("Contract ID", "contract_id", Text),
            ("Invoice Number", "invoice_number", Text),
            ("Order ID", "order_id", Text),
            ("Service Date", "service_date", Date),
            ("Appointment Date", "appointment_date", Date),
            ("Priority Level", "priority_level", Text),
            ("Status", "status", Text),
            ("Region", "region", Text),
        ]
        .iter()
        .map(|(name, id, kind)| FieldDescriptor::new(name, id, *kind))
        .collect()
    };
}

/// Showcase fields exercising every date variant.
fn demo_date_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("Effective Date", "effective_date", FieldKind::Date).with_range(true),
        FieldDescriptor::new("Expiry Date", "expiry_date", FieldKind::DateRange),
        FieldDescriptor::new("Coverage Period", "coverage_period", FieldKind::DateRange),
        FieldDescriptor::new("Hire Date", "hire_date", FieldKind::DateSingle),
        FieldDescriptor::new("Date of Birth", "dob", FieldKind::DateSingle),
    ]
}

/// The default catalog: demo date fields first, then the full enterprise
/// list, deduplicated by id.
pub fn builtin() -> Vec<FieldDescriptor> {
    let mut fields = demo_date_fields();
    fields.extend(generate(ENTERPRISE_FIELDS.len()));
    dedup_by_id(fields)
}

/// Deterministic catalog of `n` fields: the enterprise list first, padded
/// with generic `Field N` text fields when `n` exceeds it.
pub fn generate(n: usize) -> Vec<FieldDescriptor> {
    let mut fields: Vec<FieldDescriptor> = ENTERPRISE_FIELDS.iter().take(n).cloned().collect();
    for i in ENTERPRISE_FIELDS.len()..n {
        fields.push(FieldDescriptor::new(
            &format!("Field {}", i + 1),
            &format!("field_{}", i + 1),
            FieldKind::Text,
        ));
    }
    fields
}

/// Randomized catalog of `n` fields with 16-character alphanumeric names.
/// Ids carry an `a` prefix so they never start with a digit.
pub fn generate_random(n: usize) -> Vec<FieldDescriptor> {
    const NAME_ID_LENGTH: usize = 16;
    let mut rng = rand::thread_rng();
    let mut fields = Vec::with_capacity(n);
    for _ in 0..n {
        let name = random_string(&mut rng, NAME_ID_LENGTH);
        let id = format!("a{}", random_string(&mut rng, NAME_ID_LENGTH));
        let kind = if rng.gen_bool(0.5) {
            FieldKind::Date
        } else {
            FieldKind::Text
        };
        fields.push(FieldDescriptor::new(&name, &id, kind));
    }
    dedup_by_id(fields)
}

fn random_string(rng: &mut impl Rng, length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Loads a YAML catalog file: a sequence of descriptors using the `type`
/// key for the kind, e.g. `- { id: claim_id, name: Claim ID, type: text }`.
pub fn load_file(path: &Path) -> Result<Vec<FieldDescriptor>> {
    let content = std::fs::read_to_string(path)?;
    let fields: Vec<FieldDescriptor> = serde_yaml::from_str(&content)?;
    if fields.is_empty() {
        return Err(FieldboardError::CatalogError(format!(
            "{} contains no fields",
            path.display()
        )));
    }
    Ok(dedup_by_id(fields))
}

/// Picks the catalog for this run: the configured file when it loads, the
/// built-in list otherwise.
pub fn resolve(config: &FieldboardConfig) -> Vec<FieldDescriptor> {
    if let Some(path) = &config.catalog_file {
        match load_file(Path::new(path)) {
            Ok(fields) => {
                log_info!("Loaded {} fields from {}", fields.len(), path);
                return fields;
            }
            Err(e) => {
                log_warn!("Falling back to built-in catalog: {}", e);
            }
        }
    }
    builtin()
}

fn dedup_by_id(fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(fields.len());
    for field in fields {
        if seen.insert(field.id.clone()) {
            unique.push(field);
        } else {
            log_warn!("Dropping duplicate field id: {}", field.id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_pads_with_generic_fields() {
        let fields = generate(40);
        assert_eq!(fields.len(), 40);
        assert_eq!(fields[0].id, "customer_id");
        assert_eq!(fields[37].name, "Field 38");
        assert_eq!(fields[39].id, "field_40");
    }

    #[test]
    fn generate_truncates_to_n() {
        let fields = generate(3);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2].id, "last_name");
    }

    #[test]
    fn builtin_ids_are_unique_and_demo_fields_win() {
        let fields = builtin();
        let ids: HashSet<&str> = fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), fields.len());
        // hire_date appears in both sources; the demo (date_single) comes first
        let hire = fields.iter().find(|f| f.id == "hire_date").unwrap();
        assert_eq!(hire.kind, FieldKind::DateSingle);
        assert!(ids.contains("coverage_period"));
        assert!(ids.contains("region"));
    }

    #[test]
    fn generate_random_shapes_ids_and_kinds() {
        let fields = generate_random(25);
        assert_eq!(fields.len(), 25);
        for field in &fields {
            assert!(field.id.starts_with('a'));
            assert_eq!(field.id.len(), 17);
            assert_eq!(field.name.len(), 16);
            assert!(matches!(field.kind, FieldKind::Text | FieldKind::Date));
        }
    }

    #[test]
    fn date_variant_semantics() {
        let plain_date = FieldDescriptor::new("D", "d", FieldKind::Date);
        assert!(plain_date.is_date_range());
        assert!(!plain_date.is_date_single());

        let single = FieldDescriptor::new("D", "d", FieldKind::Date).with_range(false);
        assert!(!single.is_date_range());
        assert!(single.is_date_single());

        let forced = FieldDescriptor::new("T", "t", FieldKind::Text).with_range(true);
        assert!(forced.is_date_range());

        assert!(FieldDescriptor::new("R", "r", FieldKind::DateRange).is_date_range());
        assert!(FieldDescriptor::new("S", "s", FieldKind::DateSingle).is_date_single());
        assert!(!FieldDescriptor::new("T", "t", FieldKind::Text).is_date_range());
    }

    #[test]
    fn load_file_parses_and_dedups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yml");
        std::fs::write(
            &path,
            "- { id: claim_id, name: Claim ID, type: text }\n\
             - { id: coverage, name: Coverage, type: date_range }\n\
             - { id: claim_id, name: Duplicate, type: text }\n",
        )
        .unwrap();

        let fields = load_file(&path).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].kind, FieldKind::DateRange);
    }

    #[test]
    fn load_file_rejects_empty_catalogs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yml");
        std::fs::write(&path, "[]\n").unwrap();
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn resolve_falls_back_when_file_is_missing() {
        let config = FieldboardConfig {
            catalog_file: Some("./missing-catalog.yml".to_string()),
            ..FieldboardConfig::default()
        };
        let fields = resolve(&config);
        assert_eq!(fields.len(), builtin().len());
    }
}
