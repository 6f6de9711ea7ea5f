use contracts::domain::a002_rdap::aggregate::RdapKind;
use contracts::shared::{Record, RecordId};
use std::collections::HashMap;

/// Содержимое раскрытой строки организации
#[derive(Debug, Clone, PartialEq)]
pub enum RelatedState {
    Loading,
    Loaded(Vec<Record>),
    Failed(String),
}

/// Which organization rows are expanded and what their drawers hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpandedRows {
    open: HashMap<RecordId, RelatedState>,
}

impl ExpandedRows {
    pub fn is_open(&self, id: &RecordId) -> bool {
        self.open.contains_key(id)
    }

    pub fn state(&self, id: &RecordId) -> Option<&RelatedState> {
        self.open.get(id)
    }

    /// Opens or closes a row. Returns `true` when the row was opened and its
    /// related items need to be fetched.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if self.open.remove(id).is_some() {
            false
        } else {
            self.open.insert(id.clone(), RelatedState::Loading);
            true
        }
    }

    /// Ignored when the row was collapsed while the request was in flight.
    pub fn resolve(&mut self, id: &RecordId, state: RelatedState) {
        if let Some(slot) = self.open.get_mut(id) {
            *slot = state;
        }
    }
}

/// Related rows grouped by kind, in the order the add form lists the kinds.
/// Unknown kinds go last under their raw name.
pub fn group_related(rows: &[Record]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for row in rows {
        let kind = row.get_str("type").unwrap_or("other");
        let value = row.get_str("value").unwrap_or_default().to_string();
        match groups.iter_mut().find(|(k, _)| k == kind) {
            Some((_, values)) => values.push(value),
            None => groups.push((kind.to_string(), vec![value])),
        }
    }
    let rank = |kind: &str| {
        RdapKind::SELECTABLE
            .iter()
            .position(|k| k.as_str() == kind)
            .unwrap_or(RdapKind::SELECTABLE.len())
    };
    groups.sort_by_key(|(kind, _)| rank(kind));
    groups
}

/// Heading of a related group, e.g. "Emails".
pub fn group_title(kind: &str) -> String {
    match RdapKind::parse(kind) {
        Some(k) => k.plural().to_string(),
        None => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_toggle_cycle() {
        let mut rows = ExpandedRows::default();
        let id = RecordId::from(4);
        assert!(rows.toggle(&id));
        assert_eq!(rows.state(&id), Some(&RelatedState::Loading));
        assert!(!rows.toggle(&id));
        assert!(!rows.is_open(&id));
    }

    #[test]
    fn test_resolve_after_collapse_is_ignored() {
        let mut rows = ExpandedRows::default();
        let id = RecordId::from(4);
        rows.toggle(&id);
        rows.toggle(&id);
        rows.resolve(&id, RelatedState::Loaded(vec![]));
        assert!(!rows.is_open(&id));

        rows.toggle(&id);
        rows.resolve(&id, RelatedState::Failed("HTTP error! Status: 500".into()));
        assert!(matches!(rows.state(&id), Some(RelatedState::Failed(_))));
    }

    #[test]
    fn test_group_related_order() {
        let rows = vec![
            record(json!({"type": "phones", "value": "+1 555"})),
            record(json!({"type": "names", "value": "John"})),
            record(json!({"type": "phones", "value": "+1 556"})),
            record(json!({"type": "weird", "value": "?"})),
        ];
        let groups = group_related(&rows);
        let kinds: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(kinds, vec!["names", "phones", "weird"]);
        assert_eq!(groups[1].1, vec!["+1 555".to_string(), "+1 556".to_string()]);
    }

    #[test]
    fn test_group_title() {
        assert_eq!(group_title("emails"), "Emails");
        assert_eq!(group_title("addresses"), "Addresses");
        assert_eq!(group_title("handles"), "handles");
    }
}
