mod config;
mod errors;
mod files;
mod reporters;
mod results;
mod utils;

pub use crate::config::ReportConfig;
pub use crate::errors::{Error, Result};
pub use crate::reporters::html::{render, render_to_string, HtmlReport, SuiteSection, TestRow};
pub use crate::results::{PerfStats, RunResult, SuiteResult, TestResult, TestStatus};
pub use crate::utils::writer::{WriteBuffer, Writer};
