pub mod input;
pub mod result;

pub use input::{FileLabel, FileUpload, InputForm, LabelStyle, SubmissionInput};
pub use result::{ApiStatus, CategoryBadge, ClassificationResult, ClassifyResponse};
