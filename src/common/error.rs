use std::path::PathBuf;

/// Fatal stage errors. `hint` tells the operator how to produce the missing input.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Input not found: {}. {hint}", .path.display())]
    MissingInput { path: PathBuf, hint: String },
    #[error("Missing columns in {table}: {}", .columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },
}
