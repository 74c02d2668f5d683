//! Record-store infrastructure: logical paths, versioned documents, and the
//! `RecordStore` abstraction with its in-memory implementation.
//!
//! The store is always passed in explicitly (constructor/parameter injection);
//! there is no ambient global handle.

pub mod path;
pub mod record_store;

pub use record_store::{
    CommitReceipt, InMemoryRecordStore, ListAppend, RecordStore, RecordWrite, StoreError,
    VersionedRecord, WriteBatch,
};
