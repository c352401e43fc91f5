use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Highest numbered segment on the board.
pub const MAX_SEGMENT: u8 = 20;
/// Base value of the bull (25 for the outer ring, doubled for the bullseye).
pub const BULL: u8 = 25;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ThrowError {
    #[error("No dartboard segment scores {0}")]
    InvalidSegment(u8),
    #[error("Multiplier {multiplier} is not possible on segment {segment}")]
    InvalidMultiplier { segment: u8, multiplier: u8 },
}

/// A throw as reported by the scoring device, before any validation.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawThrow {
    pub base_value: u8,
    pub multiplier: u8,
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Multiplier {
    Single,
    Double,
    Triple,
}

impl Multiplier {
    pub fn factor(self) -> u32 {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Triple => 3,
        }
    }
}

/// A single validated dart. Immutable once constructed.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Throw {
    base_value: u8,
    multiplier: Multiplier,
}

impl Throw {
    // Enforce the following constraints:
    // - the base value names a real segment: 0 (miss), 1-20, or the bull
    // - the bull can be single or double, never triple
    // - a miss always stores multiplier 1, whatever the device sent
    pub fn new(raw: RawThrow) -> Result<Self, ThrowError> {
        let RawThrow {
            base_value,
            multiplier,
        } = raw;
        if base_value > MAX_SEGMENT && base_value != BULL {
            return Err(ThrowError::InvalidSegment(base_value));
        }
        let multiplier = match (base_value, multiplier) {
            (0, _) => Multiplier::Single,
            (_, 1) => Multiplier::Single,
            (BULL, 2) => Multiplier::Double,
            (BULL, m) => {
                return Err(ThrowError::InvalidMultiplier {
                    segment: base_value,
                    multiplier: m,
                })
            }
            (_, 2) => Multiplier::Double,
            (_, 3) => Multiplier::Triple,
            (_, m) => {
                return Err(ThrowError::InvalidMultiplier {
                    segment: base_value,
                    multiplier: m,
                })
            }
        };
        Ok(Throw {
            base_value,
            multiplier,
        })
    }

    pub fn base_value(&self) -> u8 {
        self.base_value
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    pub fn score(&self) -> u32 {
        u32::from(self.base_value) * self.multiplier.factor()
    }

    pub fn is_miss(&self) -> bool {
        self.base_value == 0
    }

    pub fn is_double(&self) -> bool {
        self.multiplier == Multiplier::Double
    }

    pub fn is_triple(&self) -> bool {
        self.multiplier == Multiplier::Triple
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.base_value, self.multiplier) {
            (0, _) => write!(f, "Miss"),
            (BULL, Multiplier::Double) => write!(f, "Bull"),
            (n, Multiplier::Single) => write!(f, "{}", n),
            (n, Multiplier::Double) => write!(f, "D{}", n),
            (n, Multiplier::Triple) => write!(f, "T{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(base_value: u8, multiplier: u8) -> RawThrow {
        RawThrow {
            base_value,
            multiplier,
        }
    }

    #[test]
    fn test_construct_throw() {
        assert!(Throw::new(raw(20, 3)).is_ok());
        assert!(Throw::new(raw(1, 1)).is_ok());
        assert!(Throw::new(raw(25, 2)).is_ok());
        assert!(Throw::new(raw(0, 1)).is_ok());

        assert_eq!(Throw::new(raw(21, 1)), Err(ThrowError::InvalidSegment(21)));
        assert_eq!(Throw::new(raw(32, 1)), Err(ThrowError::InvalidSegment(32)));
        assert_eq!(
            Throw::new(raw(25, 3)),
            Err(ThrowError::InvalidMultiplier {
                segment: 25,
                multiplier: 3
            })
        );
        assert_eq!(
            Throw::new(raw(20, 4)),
            Err(ThrowError::InvalidMultiplier {
                segment: 20,
                multiplier: 4
            })
        );
        assert_eq!(
            Throw::new(raw(20, 0)),
            Err(ThrowError::InvalidMultiplier {
                segment: 20,
                multiplier: 0
            })
        );
    }

    #[test]
    fn test_score_is_base_times_multiplier() {
        assert_eq!(Throw::new(raw(20, 3)).unwrap().score(), 60);
        assert_eq!(Throw::new(raw(25, 2)).unwrap().score(), 50);
        assert_eq!(Throw::new(raw(25, 1)).unwrap().score(), 25);
        assert_eq!(Throw::new(raw(19, 2)).unwrap().score(), 38);
        assert_eq!(Throw::new(raw(7, 1)).unwrap().score(), 7);
    }

    #[test]
    fn test_miss_normalizes_multiplier() {
        // A miss scores zero no matter what multiplier the device reported
        let miss = Throw::new(raw(0, 3)).unwrap();
        assert_eq!(miss.score(), 0);
        assert_eq!(miss.multiplier(), Multiplier::Single);
        assert!(miss.is_miss());
    }

    #[test]
    fn test_dart_notation() {
        assert_eq!(Throw::new(raw(0, 1)).unwrap().to_string(), "Miss");
        assert_eq!(Throw::new(raw(5, 1)).unwrap().to_string(), "5");
        assert_eq!(Throw::new(raw(16, 2)).unwrap().to_string(), "D16");
        assert_eq!(Throw::new(raw(20, 3)).unwrap().to_string(), "T20");
        assert_eq!(Throw::new(raw(25, 1)).unwrap().to_string(), "25");
        assert_eq!(Throw::new(raw(25, 2)).unwrap().to_string(), "Bull");
    }
}
