// Service layer between HTTP handlers and storage/domain logic

pub mod analytics;
pub mod catalog;
pub mod export;
pub mod result;

pub use analytics::AnalyticsService;
pub use catalog::CatalogService;
pub use export::{CsvExport, ExportService};
pub use result::ResultService;
