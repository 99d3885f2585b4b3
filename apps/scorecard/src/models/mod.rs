pub mod analysis;
pub mod input;

pub use analysis::{AnalysisResult, Category};
pub use input::{ResumeFile, ResumeInput, ValidationError};
