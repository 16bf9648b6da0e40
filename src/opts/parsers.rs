use std::str::FromStr;

use crate::prelude::*;

pub fn non_zero_usize(value: &str) -> Result<usize> {
    match FromStr::from_str(value)? {
        value if value >= 1 => Ok(value),
        _ => Err(anyhow!("expected a positive number")),
    }
}

pub fn positive_f64(value: &str) -> Result<f64> {
    match f64::from_str(value)? {
        value if value.is_finite() && value > 0.0 => Ok(value),
        value => Err(anyhow!("{} is not a positive finite number", value)),
    }
}

pub fn non_negative_f64(value: &str) -> Result<f64> {
    match f64::from_str(value)? {
        value if value.is_finite() && value >= 0.0 => Ok(value),
        value => Err(anyhow!("{} is not a non-negative finite number", value)),
    }
}

/// Parses `WIDTHxHEIGHT`.
pub fn dimensions(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| anyhow!("expected `WIDTHxHEIGHT`, got `{}`", value))?;
    match (u32::from_str(width)?, u32::from_str(height)?) {
        (width, height) if width != 0 && height != 0 => Ok((width, height)),
        _ => Err(anyhow!("image dimensions must be positive")),
    }
}
