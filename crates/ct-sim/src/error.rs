use ct_core::CtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CtError),
}

pub type SimResult<T> = Result<T, SimError>;
