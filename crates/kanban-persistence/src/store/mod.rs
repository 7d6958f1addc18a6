pub mod atomic_writer;
pub mod document;
pub mod json_file_store;

pub use atomic_writer::AtomicWriter;
pub use document::{BoardDocument, JsonEnvelope, PersistenceMetadata};
pub use json_file_store::JsonFileStore;
