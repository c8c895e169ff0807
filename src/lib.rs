pub mod aggregate;
pub mod category;
pub mod config;
pub mod derive;
pub mod error;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod top_k;

pub use config::DataSources;
pub use error::{AggregationError, LoadError, PipelineError, Result, UnknownCategoryError};
pub use loader::{DatasetContext, load_dataset};
pub use pipeline::{ReportOptions, build_report};
pub use records::{DailyRecord, Dataset, HourlyRecord};
pub use report::{Chart, ChartRow, Question, Report};
