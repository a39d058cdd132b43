pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod session;
pub mod stages;

pub use config::PipelineConfig;
pub use error::ValidationError;
pub use io::{
    ExportFormat, Upload, export, read_upload, render, suggested_file_name,
    suggested_file_name_now, write_csv, write_xlsx,
};
pub use models::{
    AdmissionPolicy, Diagnostics, Notice, NoticeLevel, OUTPUT_COLUMNS, OutputRecord, OutputTable,
    REQUIRED_COLUMNS,
};
pub use session::{Summary, UploadSession};
pub use stages::{PipelineOutput, normalize};
