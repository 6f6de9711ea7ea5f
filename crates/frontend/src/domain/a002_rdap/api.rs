use crate::shared::api_utils::{api_url, list_url, segment, with_query};
use crate::shared::http::{delete_json, get_json, post_json, put_json, FetchError};
use crate::shared::optimistic::RecordEndpoints;
use crate::shared::table_data::TableQuery;
use contracts::domain::a002_rdap::aggregate::{metrics_from_json, RdapKind};
use contracts::shared::{ListQuery, MutationResponse, Record, RecordId};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

const API_PATH: &str = "/api/deeper/rdap";

/// Одна страница RDAP-таблицы (сырой ответ для `use_table_data`)
pub async fn fetch_page(query: TableQuery) -> Result<Value, FetchError> {
    get_json(&list_url(API_PATH, &query.to_list_query())).await
}

/// Счётчики по типам для карточек метрик
pub async fn fetch_metrics() -> Result<BTreeMap<String, i64>, FetchError> {
    let body = get_json(&api_url("/api/deeper/rdap-metrics")).await?;
    Ok(metrics_from_json(&body))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelatedQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    program_id: Option<String>,
}

/// Names, emails, addresses ... attached to an organization.
pub async fn fetch_related(
    org_id: &RecordId,
    program_id: Option<String>,
) -> Result<Vec<Record>, FetchError> {
    let url = with_query(
        &api_url(&format!("{}/related/{}", API_PATH, segment(org_id.as_str()))),
        &RelatedQuery { program_id },
    );
    let body = get_json(&url).await?;
    Ok(related_from_json(body))
}

/// Organizations offered by the add form.
pub async fn fetch_organizations() -> Result<Vec<Record>, FetchError> {
    let body = get_json(&list_url(API_PATH, &ListQuery::new(1, 100, ""))).await?;
    Ok(organizations_from_json(body))
}

fn data_array(body: Value) -> Vec<Record> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items.into_iter().filter_map(Record::from_value).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// `{success, data: [...]}`; `success: false` reads as "nothing related".
pub fn related_from_json(body: Value) -> Vec<Record> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Vec::new();
    }
    data_array(body)
}

pub fn organizations_from_json(body: Value) -> Vec<Record> {
    data_array(body)
        .into_iter()
        .filter(|r| r.get_str("type") == Some(RdapKind::Orgs.as_str()))
        .map(|mut org| {
            if org.get_str("value").is_none() {
                let name = org.get_str("name").unwrap_or_default().to_string();
                org.insert("value", name);
            }
            org
        })
        .collect()
}

/// `/api/deeper/rdap/{type}/{id}` of an existing row.
pub fn item_url(record: &Record, id: &RecordId) -> String {
    let kind = record.get_str("type").unwrap_or(RdapKind::Orgs.as_str());
    api_url(&format!("{}/{}/{}", API_PATH, segment(kind), segment(id.as_str())))
}

#[derive(Serialize)]
struct DeleteQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    fk_programs_id: Option<String>,
}

pub fn delete_url(record: &Record, id: &RecordId) -> String {
    let fk_programs_id = record
        .get("fk_programs_id")
        .and_then(RecordId::from_value)
        .map(|p| p.to_string());
    with_query(&item_url(record, id), &DeleteQuery { fk_programs_id })
}

/// REST endpoints of RDAP items
#[derive(Debug, Clone, Copy, Default)]
pub struct RdapEndpoints;

impl RecordEndpoints for RdapEndpoints {
    async fn create(&self, draft: &Record) -> Result<MutationResponse, FetchError> {
        post_json(&api_url(API_PATH), &draft.clone().into_value())
            .await
            .map(MutationResponse::from_json)
    }

    async fn update(&self, id: &RecordId, record: &Record) -> Result<MutationResponse, FetchError> {
        put_json(&item_url(record, id), &record.clone().into_value())
            .await
            .map(MutationResponse::from_json)
    }

    async fn delete(&self, id: &RecordId, record: &Record) -> Result<MutationResponse, FetchError> {
        delete_json(&delete_url(record, id))
            .await
            .map(MutationResponse::from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_item_urls() {
        let row = record(json!({"id": 12, "type": "emails", "fk_programs_id": 4}));
        let id = row.id().unwrap();
        assert_eq!(item_url(&row, &id), "/api/deeper/rdap/emails/12");
        assert_eq!(delete_url(&row, &id), "/api/deeper/rdap/emails/12?fk_programs_id=4");

        let bare = record(json!({"id": 3}));
        assert_eq!(delete_url(&bare, &bare.id().unwrap()), "/api/deeper/rdap/orgs/3");
    }

    #[test]
    fn test_related_from_json() {
        let rows = related_from_json(json!({"success": true, "data": [{"type": "names", "value": "x"}]}));
        assert_eq!(rows.len(), 1);
        assert!(related_from_json(json!({"success": false, "data": [{"v": 1}]})).is_empty());
        assert!(related_from_json(json!(null)).is_empty());
    }

    #[test]
    fn test_organizations_only_orgs() {
        let orgs = organizations_from_json(json!({"data": [
            {"id": 1, "type": "orgs", "name": "ACME"},
            {"id": 2, "type": "emails", "value": "a@acme.com"},
        ]}));
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].get_str("value"), Some("ACME"));
    }
}
