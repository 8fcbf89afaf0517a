use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Empty finding group for {id} ({package})")]
    EmptyGroup { id: String, package: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
