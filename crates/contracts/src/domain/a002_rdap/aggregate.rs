use crate::shared::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Kind
// ============================================================================

/// Category of an RDAP entry. The wire form is the plural table key (`orgs`, `names` ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdapKind {
    Orgs,
    Names,
    Emails,
    Addresses,
    Nameservers,
    Phones,
    Groups,
}

impl RdapKind {
    /// Kinds offered by the add form, in display order.
    pub const SELECTABLE: [RdapKind; 6] = [
        RdapKind::Orgs,
        RdapKind::Names,
        RdapKind::Emails,
        RdapKind::Addresses,
        RdapKind::Nameservers,
        RdapKind::Phones,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RdapKind::Orgs => "orgs",
            RdapKind::Names => "names",
            RdapKind::Emails => "emails",
            RdapKind::Addresses => "addresses",
            RdapKind::Nameservers => "nameservers",
            RdapKind::Phones => "phones",
            RdapKind::Groups => "groups",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "orgs" => Some(RdapKind::Orgs),
            "names" => Some(RdapKind::Names),
            "emails" => Some(RdapKind::Emails),
            "addresses" => Some(RdapKind::Addresses),
            "nameservers" => Some(RdapKind::Nameservers),
            "phones" => Some(RdapKind::Phones),
            "groups" => Some(RdapKind::Groups),
            _ => None,
        }
    }

    /// Singular label shown in badges and form options.
    pub fn singular(&self) -> &'static str {
        match self {
            RdapKind::Orgs => "Organization",
            RdapKind::Names => "Name",
            RdapKind::Emails => "Email",
            RdapKind::Addresses => "Address",
            RdapKind::Nameservers => "Nameserver",
            RdapKind::Phones => "Phone",
            RdapKind::Groups => "Group",
        }
    }

    /// Plural heading, e.g. of a group in the related-items drawer.
    pub fn plural(&self) -> &'static str {
        match self {
            RdapKind::Orgs => "Organizations",
            RdapKind::Names => "Names",
            RdapKind::Emails => "Emails",
            RdapKind::Addresses => "Addresses",
            RdapKind::Nameservers => "Nameservers",
            RdapKind::Phones => "Phones",
            RdapKind::Groups => "Groups",
        }
    }

    pub fn metric_title(&self) -> &'static str {
        match self {
            RdapKind::Orgs => "Total Organizations",
            RdapKind::Names => "Total Names",
            RdapKind::Emails => "Total Emails",
            RdapKind::Addresses => "Total Addresses",
            RdapKind::Nameservers => "Total Nameservers",
            RdapKind::Phones => "Total Phones",
            RdapKind::Groups => "Total Groups",
        }
    }
}

// ============================================================================
// Draft
// ============================================================================

/// Body of `POST /api/deeper/rdap`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RdapItemDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub fk_programs_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_org_id: Option<String>,
}

impl RdapItemDraft {
    /// Checks the add form in the order the user sees the fields.
    pub fn validate(&self) -> Result<RdapKind, String> {
        let kind = RdapKind::parse(&self.kind).ok_or_else(|| "Please select a type".to_string())?;
        if kind == RdapKind::Orgs && self.fk_programs_id.trim().is_empty() {
            return Err("Please select a program".to_string());
        }
        if kind != RdapKind::Orgs && self.fk_org_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err("Please select an organization".to_string());
        }
        if self.value.trim().is_empty() {
            return Err("Value is required".to_string());
        }
        Ok(kind)
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("type", self.kind.clone());
        record.insert("value", self.value.trim().to_string());
        record.insert("fk_programs_id", self.fk_programs_id.clone());
        if let Some(org) = &self.fk_org_id {
            record.insert("fk_org_id", org.clone());
        }
        record
    }
}

// ============================================================================
// Metrics
// ============================================================================

/// Reads `/api/deeper/rdap-metrics` into per-kind counters. Non-numeric fields are skipped.
pub fn metrics_from_json(value: &Value) -> BTreeMap<String, i64> {
    let mut counters = BTreeMap::new();
    if let Value::Object(map) = value {
        for (key, v) in map {
            let count = match v {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            };
            if let Some(count) = count {
                counters.insert(key.clone(), count);
            }
        }
    }
    counters
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_roundtrip_names() {
        for kind in RdapKind::SELECTABLE {
            assert_eq!(RdapKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RdapKind::parse("bogus"), None);
    }

    #[test]
    fn test_validate_messages() {
        let mut draft = RdapItemDraft::default();
        assert_eq!(draft.validate(), Err("Please select a type".to_string()));

        draft.kind = "orgs".into();
        assert_eq!(draft.validate(), Err("Please select a program".to_string()));

        draft.fk_programs_id = "4".into();
        assert_eq!(draft.validate(), Err("Value is required".to_string()));

        draft.value = "ACME Inc".into();
        assert_eq!(draft.validate(), Ok(RdapKind::Orgs));

        draft.kind = "emails".into();
        assert_eq!(draft.validate(), Err("Please select an organization".to_string()));
        draft.fk_org_id = Some("11".into());
        assert_eq!(draft.validate(), Ok(RdapKind::Emails));
    }

    #[test]
    fn test_draft_serializes_type_field() {
        let draft = RdapItemDraft {
            kind: "orgs".into(),
            value: "ACME".into(),
            fk_programs_id: "1".into(),
            fk_org_id: None,
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body, json!({"type": "orgs", "value": "ACME", "fk_programs_id": "1"}));
    }

    #[test]
    fn test_metrics_from_json() {
        let m = metrics_from_json(&json!({"orgs": 3, "names": "2", "error": null}));
        assert_eq!(m.get("orgs"), Some(&3));
        assert_eq!(m.get("names"), Some(&2));
        assert!(!m.contains_key("error"));
    }
}
