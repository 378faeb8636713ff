use ring::rand::{SecureRandom, SystemRandom};
use crate::error::ApiError;

pub fn random_u64(rng: &SystemRandom) -> Result<u64, ApiError> {
    let mut bytes = [0u8; 8];
    rng.fill(&mut bytes)
        .map_err(|_| ApiError::Internal("random number generator failed".into()))?;
    Ok(u64::from_le_bytes(bytes))
}

/// Path segments that are not valid ids or page numbers name nothing.
pub fn parse_param<T>(param: Result<T, &str>) -> Result<T, ApiError> {
    param.map_err(|_| ApiError::NotFound)
}
