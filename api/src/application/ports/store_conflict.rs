use thiserror::Error;

/// A write rejected by a uniqueness rule of the store.
///
/// Adapters return it inside `anyhow::Error`; use cases downcast it to
/// report a conflict instead of an internal failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreConflict {
    #[error("duplicate email: {0}")]
    Email(String),
    #[error("duplicate title: {0}")]
    Title(String),
}

impl StoreConflict {
    pub fn find(err: &anyhow::Error) -> Option<&StoreConflict> {
        err.downcast_ref::<StoreConflict>()
    }
}
