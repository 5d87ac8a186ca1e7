pub mod doc;
pub mod error;
pub mod redb;
pub mod traits;

pub use doc::{
    Document, ID_FIELD, InvalidId, apply_patch, compare_field_values, date_from_value, date_value,
    doc_matches, id_filter, new_id, parse_id,
};
pub use error::StoreError;
pub use redb::RedbStore;
pub use traits::{DocStore, FindOptions, SortOrder};
