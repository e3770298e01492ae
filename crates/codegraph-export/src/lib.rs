//! Renders an [`AnalysisResult`] into one of the fixed output formats.
//! Each format is a pure function of the result: running the same analysis
//! twice and exporting both yields byte-identical output.

pub mod dot;
pub mod json;
pub mod mermaid;

use codegraph_analyze::AnalysisResult;
use codegraph_core::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Dot,
    Mermaid,
}

pub fn export(result: &AnalysisResult, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => json::to_json(result),
        ExportFormat::Dot => Ok(dot::to_dot(result)),
        ExportFormat::Mermaid => Ok(mermaid::to_mermaid(result)),
    }
}
