use crate::shared::api_utils::{api_url, list_url, segment};
use crate::shared::http::{delete_json, get_json, post_json, put_json, FetchError};
use crate::shared::optimistic::{confirm, MutationError, RecordEndpoints};
use crate::shared::table_data::{ListPayload, TableQuery};
use contracts::domain::a001_program::aggregate::{ImportProgramsRequest, ProgramCsvRow, ProgramDto};
use contracts::shared::{ListQuery, MutationResponse, Record, RecordId};
use serde_json::Value;

const PROGRAMS_PATH: &str = "/api/shared/programs";
const APEX_PATH: &str = "/api/shared/apex-domains";

/// Максимум программ в выпадающих списках форм
const OPTIONS_LIMIT: usize = 1000;

pub async fn fetch_page(query: TableQuery) -> Result<Value, FetchError> {
    get_json(&list_url(PROGRAMS_PATH, &query.to_list_query())).await
}

pub async fn fetch_apex_page(query: TableQuery) -> Result<Value, FetchError> {
    get_json(&list_url(APEX_PATH, &query.to_list_query())).await
}

/// Программы для select'ов (RDAP add form)
pub async fn fetch_program_options() -> Result<Vec<Record>, FetchError> {
    let body = get_json(&list_url(PROGRAMS_PATH, &ListQuery::new(1, OPTIONS_LIMIT, ""))).await?;
    Ok(ListPayload::from_json(body).records)
}

/// Sends parsed CSV rows to the bulk import endpoint.
pub async fn import_csv(rows: Vec<ProgramCsvRow>) -> Result<MutationResponse, MutationError> {
    let body = serde_json::to_value(ImportProgramsRequest { programs: rows })
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    let response = post_json(&api_url(&format!("{}/import-csv", PROGRAMS_PATH)), &body)
        .await
        .map(MutationResponse::from_json);
    confirm(response)
}

fn program_url(id: &RecordId) -> String {
    api_url(&format!("{}/{}", PROGRAMS_PATH, segment(id.as_str())))
}

fn scope_url(id: &RecordId) -> String {
    api_url(&format!("{}/scope/{}", PROGRAMS_PATH, segment(id.as_str())))
}

/// REST endpoints of programs
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramEndpoints;

impl RecordEndpoints for ProgramEndpoints {
    async fn create(&self, draft: &Record) -> Result<MutationResponse, FetchError> {
        let body = ProgramDto::from_record(draft).to_payload();
        post_json(&api_url(PROGRAMS_PATH), &body)
            .await
            .map(MutationResponse::from_json)
    }

    async fn update(&self, id: &RecordId, record: &Record) -> Result<MutationResponse, FetchError> {
        let body = ProgramDto::from_record(record).to_payload();
        put_json(&program_url(id), &body)
            .await
            .map(MutationResponse::from_json)
    }

    async fn delete(&self, id: &RecordId, _record: &Record) -> Result<MutationResponse, FetchError> {
        delete_json(&program_url(id))
            .await
            .map(MutationResponse::from_json)
    }
}

/// Apex domains live under the program scope endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApexDomainEndpoints;

impl RecordEndpoints for ApexDomainEndpoints {
    async fn create(&self, draft: &Record) -> Result<MutationResponse, FetchError> {
        let program = draft
            .get("fk_programs_id")
            .and_then(RecordId::from_value)
            .ok_or_else(|| FetchError::Decode("apex domain without program".into()))?;
        post_json(
            &api_url(&format!("{}/{}/scope", PROGRAMS_PATH, segment(program.as_str()))),
            &draft.clone().into_value(),
        )
        .await
        .map(MutationResponse::from_json)
    }

    async fn update(&self, id: &RecordId, record: &Record) -> Result<MutationResponse, FetchError> {
        put_json(&scope_url(id), &record.clone().into_value())
            .await
            .map(MutationResponse::from_json)
    }

    async fn delete(&self, id: &RecordId, _record: &Record) -> Result<MutationResponse, FetchError> {
        delete_json(&scope_url(id))
            .await
            .map(MutationResponse::from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(program_url(&RecordId::from(7)), "/api/shared/programs/7");
        assert_eq!(scope_url(&RecordId::from(31)), "/api/shared/programs/scope/31");
    }

    #[test]
    fn test_create_apex_requires_program() {
        let draft = Record::new();
        let result = futures::executor::block_on(ApexDomainEndpoints.create(&draft));
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
