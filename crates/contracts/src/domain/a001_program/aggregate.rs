use crate::shared::record::Record;
use serde::{Deserialize, Serialize};

/// Columns a programs CSV must provide, in the documented order.
pub const PROGRAM_CSV_COLUMNS: [&str; 5] = ["program", "platform", "visibility", "status", "apex_domain"];

/// Form DTO of the program create/edit modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub program: String,
    pub platform: String,
    pub visibility: String,
    pub status: String,
    #[serde(default)]
    pub domains_list: Vec<String>,
    #[serde(default)]
    pub domains: usize,
}

impl Default for ProgramDto {
    fn default() -> Self {
        Self {
            id: None,
            program: String::new(),
            platform: String::new(),
            visibility: "public".to_string(),
            status: "active".to_string(),
            domains_list: Vec::new(),
            domains: 0,
        }
    }
}

impl ProgramDto {
    /// Prefills the edit form from a table row.
    pub fn from_record(record: &Record) -> Self {
        let text = |field: &str| record.get_str(field).unwrap_or_default().to_string();
        Self {
            id: record.id().map(|id| id.to_string()),
            program: text("program"),
            platform: record
                .get_str("platform_name")
                .or_else(|| record.get_str("platform"))
                .unwrap_or_default()
                .to_string(),
            visibility: record
                .get_str("visibility")
                .unwrap_or("public")
                .to_string(),
            status: if record.get_flag("is_active") || record.get_str("status") == Some("active") {
                "active".to_string()
            } else {
                "inactive".to_string()
            },
            domains_list: record
                .get("domains_list")
                .and_then(|v| v.as_array())
                .map(|items| items.iter().filter_map(|d| d.as_str().map(String::from)).collect())
                .unwrap_or_default(),
            domains: record.get_i64("domains").unwrap_or(0).max(0) as usize,
        }
    }

    /// Record pushed into the table before the server confirms the change.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("program", self.program.clone());
        record.insert("platform", self.platform.clone());
        record.insert("platform_name", self.platform.clone());
        record.insert("visibility", self.visibility.clone());
        record.insert("status", self.status.clone());
        record.insert("is_active", self.status == "active");
        record.insert("domains_list", self.domains_list.clone());
        record.insert("domains", self.domain_count() as u64);
        if let Some(id) = &self.id {
            record.insert("id", id.clone());
        }
        record
    }

    /// Attached domains; rows loaded from the list only carry the count.
    pub fn domain_count(&self) -> usize {
        self.domains_list.len().max(self.domains)
    }

    /// Request body with `domains` recomputed from the attached list.
    pub fn to_payload(&self) -> serde_json::Value {
        let mut dto = self.clone();
        dto.domains = dto.domain_count();
        serde_json::to_value(dto).unwrap_or_default()
    }
}

/// One row of an imported programs CSV after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCsvRow {
    pub program: String,
    pub platform: String,
    pub visibility: String,
    pub status: String,
    pub apex_domain: String,
}

/// Body of `POST /api/shared/programs/import-csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportProgramsRequest {
    pub programs: Vec<ProgramCsvRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_record_reads_status_flag() {
        let record = Record::from_value(json!({
            "id": 3, "program": "Acme", "platform_name": "HackerOne", "is_active": 1, "domains": 4
        }))
        .unwrap();
        let dto = ProgramDto::from_record(&record);
        assert_eq!(dto.id.as_deref(), Some("3"));
        assert_eq!(dto.platform, "HackerOne");
        assert_eq!(dto.status, "active");
        assert_eq!(dto.domains, 4);
    }

    #[test]
    fn test_payload_counts_domains_list() {
        let dto = ProgramDto {
            program: "Beta".into(),
            domains_list: vec!["beta.com".into(), "beta.net".into()],
            ..Default::default()
        };
        let payload = dto.to_payload();
        assert_eq!(payload["domains"], json!(2));
        assert!(payload.get("id").is_none());
    }

    #[test]
    fn test_record_roundtrip_keeps_domains_list() {
        let dto = ProgramDto {
            id: Some("9".into()),
            program: "Gamma".into(),
            platform: "Bugcrowd".into(),
            status: "inactive".into(),
            domains_list: vec!["gamma.io".into()],
            ..Default::default()
        };
        let back = ProgramDto::from_record(&dto.to_record());
        assert_eq!(back.domains_list, vec!["gamma.io".to_string()]);
        assert_eq!(back.status, "inactive");
        assert_eq!(back.domains, 1);
    }
}
