use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Column order of the registry CSV.
pub const REGISTRY_HEADERS: [&str; 5] = [
    "cin",
    "company_name",
    "registration_date",
    "registered_address",
    "status",
];

/// One row of the simulated MCA/ROC registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    pub cin: String,
    pub company_name: String,
    pub registration_date: String,
    pub registered_address: String,
    pub status: String,
}

#[derive(Debug, thiserror::Error)]
pub enum KycError {
    #[error("failed to access company registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read company registry: {0}")]
    Csv(#[from] csv::Error),
}

/// In-memory registry keyed by uppercased CIN.
#[derive(Debug, Clone, Default)]
pub struct CompanyRegistry {
    records: BTreeMap<String, RegistryRecord>,
}

impl CompanyRegistry {
    /// Load the registry from a CSV file. A missing file is created with the
    /// correct headers and yields an empty registry; an empty or
    /// wrongly-headed file yields an empty registry silently.
    pub fn load(path: &Path) -> Result<Self, KycError> {
        if !path.is_file() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(REGISTRY_HEADERS)?;
            writer.flush()?;
            return Ok(Self::default());
        }

        let mut reader = match csv::Reader::from_path(path) {
            Ok(reader) => reader,
            Err(_) => return Ok(Self::default()),
        };

        let headers = match reader.headers() {
            Ok(headers) => headers.clone(),
            Err(_) => return Ok(Self::default()),
        };
        let present: Vec<String> = headers
            .iter()
            .map(|column| column.trim().to_ascii_lowercase())
            .collect();
        if !REGISTRY_HEADERS
            .iter()
            .all(|required| present.iter().any(|column| column == required))
        {
            return Ok(Self::default());
        }

        let mut records = BTreeMap::new();
        for row in reader.deserialize::<RegistryRecord>() {
            let Ok(mut record) = row else {
                continue;
            };
            record.cin = record.cin.trim().to_ascii_uppercase();
            if record.cin.is_empty() {
                continue;
            }
            record.company_name = record.company_name.trim().to_string();
            record.registration_date = record.registration_date.trim().to_string();
            record.registered_address = record.registered_address.trim().to_string();
            record.status = record.status.trim().to_string();
            records.insert(record.cin.clone(), record);
        }

        Ok(Self { records })
    }

    pub fn from_records(rows: impl IntoIterator<Item = RegistryRecord>) -> Self {
        let mut records = BTreeMap::new();
        for mut record in rows {
            record.cin = record.cin.trim().to_ascii_uppercase();
            records.insert(record.cin.clone(), record);
        }
        Self { records }
    }

    pub fn lookup(&self, cin: &str) -> Option<&RegistryRecord> {
        self.records.get(&cin.trim().to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
