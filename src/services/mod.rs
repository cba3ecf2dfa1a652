// Service exports
pub mod board;
pub mod reference;
pub mod sqlite;
pub mod tables;

pub use board::{BoardError, BoardStore};
pub use reference::{ReferenceData, ReferenceError, Relation};
pub use sqlite::{AuditRecord, ImportReport, SqliteClient, StoreError};
pub use tables::TableRow;
