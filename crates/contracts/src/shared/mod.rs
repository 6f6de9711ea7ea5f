pub mod envelope;
pub mod record;

pub use envelope::{ListQuery, MutationResponse, PaginationMeta};
pub use record::{Record, RecordId};
