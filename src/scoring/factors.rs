use anyhow::{bail, Result};
use std::fmt;

/// A rubric adjustment: `+N` adds N points, `xN` multiplies by N.
/// Negative additions are written `+-N`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Add(f64),
    Multiply(f64),
}

impl Effect {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let effect = if let Some(val) = s.strip_prefix('+') {
            Effect::Add(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix('x') {
            Effect::Multiply(val.trim().parse()?)
        } else {
            bail!("Effect must start with + or x: {}", s)
        };

        match effect {
            Effect::Add(n) | Effect::Multiply(n) if !n.is_finite() => {
                bail!("Effect value must be finite: {}", s)
            }
            Effect::Multiply(n) if n < 0.0 => bail!("Multiplier must be non-negative: {}", s),
            _ => Ok(effect),
        }
    }

    pub fn apply(&self, score: f64) -> f64 {
        match self {
            Effect::Add(n) => score + n,
            Effect::Multiply(n) => score * n,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Add(n) => write!(f, "{:+}", n),
            Effect::Multiply(n) => write!(f, "x{}", n),
        }
    }
}
