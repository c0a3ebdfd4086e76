use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no record has the requested root parent id")]
    NoRoot,
}
