//! API request bodies and input validation

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    state::{domination::{MAX_FILL_SECONDS, MIN_FILL_SECONDS}, Actor, SWITCH_COUNT},
};

/// Largest accepted minutes field
pub const MAX_MINUTES: u32 = 999;
/// Largest accepted seconds field
pub const MAX_SECONDS: u32 = 59;

/// Countdown configuration as entered by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigureRequest {
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

impl ConfigureRequest {
    /// Total countdown length in seconds, rejecting out-of-range fields and
    /// an empty countdown
    pub fn total_seconds(&self) -> Result<u32> {
        if self.minutes > MAX_MINUTES {
            return Err(Error::InvalidMinutes(self.minutes));
        }
        if self.seconds > MAX_SECONDS {
            return Err(Error::InvalidSeconds(self.seconds));
        }

        match self.minutes * 60 + self.seconds {
            0 => Err(Error::InvalidDuration),
            total => Ok(total),
        }
    }
}

/// Domination side selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorRequest {
    pub side: Actor,
}

/// Domination fill time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillDurationRequest {
    pub seconds: f64,
}

impl FillDurationRequest {
    pub fn validated(&self) -> Result<f64> {
        if self.seconds.is_finite() && (MIN_FILL_SECONDS..=MAX_FILL_SECONDS).contains(&self.seconds) {
            Ok(self.seconds)
        } else {
            Err(Error::InvalidFillDuration(self.seconds))
        }
    }
}

/// Check a switch index from the request path
pub fn validate_switch(index: usize) -> Result<usize> {
    if index < SWITCH_COUNT {
        Ok(index)
    } else {
        Err(Error::InvalidSwitch(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configure(minutes: u32, seconds: u32) -> Result<u32> {
        ConfigureRequest { minutes, seconds }.total_seconds()
    }

    #[test]
    fn combines_minutes_and_seconds() {
        assert_eq!(configure(0, 5).expect("valid"), 5);
        assert_eq!(configure(2, 30).expect("valid"), 150);
        assert_eq!(configure(999, 59).expect("valid"), 59_999);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(matches!(configure(1000, 0), Err(Error::InvalidMinutes(1000))));
        assert!(matches!(configure(0, 60), Err(Error::InvalidSeconds(60))));
        assert!(matches!(configure(0, 0), Err(Error::InvalidDuration)));
    }

    #[test]
    fn fill_duration_bounds_are_inclusive() {
        assert_eq!(FillDurationRequest { seconds: 1.0 }.validated().expect("min"), 1.0);
        assert_eq!(FillDurationRequest { seconds: 3600.0 }.validated().expect("max"), 3600.0);
        assert!(FillDurationRequest { seconds: 0.5 }.validated().is_err());
        assert!(FillDurationRequest { seconds: 3600.5 }.validated().is_err());
        assert!(FillDurationRequest { seconds: f64::NAN }.validated().is_err());
    }

    #[test]
    fn switch_index_must_exist() {
        assert_eq!(validate_switch(8).expect("valid"), 8);
        assert!(matches!(validate_switch(9), Err(Error::InvalidSwitch(9))));
    }

    #[test]
    fn actor_request_uses_snake_case_sides() {
        let request: ActorRequest =
            serde_json::from_str(r#"{ "side": "side_b" }"#).expect("json");
        assert_eq!(request.side, Actor::SideB);
    }
}
