use crate::error::MandelbrotError;

pub type MandelbrotResult<T> = Result<T, MandelbrotError>;
