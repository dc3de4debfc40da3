//! Spreadsheet output: projecting [`ProductRecord`](shelfscan_core::ProductRecord)s
//! into fixed-width rows and writing them through a [`RowStore`].

pub mod error;
pub mod google;
pub mod projector;
pub mod schema;
pub mod store;
pub mod writer;

pub use error::SheetsError;
pub use google::GoogleSheetsClient;
pub use projector::{infer_currency, project};
pub use schema::RowSchema;
pub use store::RowStore;
pub use writer::{SheetWriter, WriteMode};
