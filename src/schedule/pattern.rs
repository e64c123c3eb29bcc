use super::ScheduleError;
use crate::clock::{ClockTime, MINUTES_PER_HOUR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TWELVE_HOURS: u32 = 12 * MINUTES_PER_HOUR;
const SIX_HOURS: u32 = 6 * MINUTES_PER_HOUR;

/// Créneau décidé par un motif pour un jour donné, avant découpage à minuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSpec {
    pub start: ClockTime,
    pub duration_minutes: u32,
}

/// Cadence de rotation travail/repos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RotationPattern {
    /// 12h de travail, 36h de repos : un jour sur deux.
    TwelveThirtySix,
    /// Cycle de 4 jours : jour, nuit, repos, repos.
    TwelveTwentyFourFortyEight,
    /// 6h tous les jours.
    SixTwentyFour,
    /// 12h de travail, 48h de repos : un jour sur trois.
    TwelveFortyEight,
}

impl RotationPattern {
    pub const ALL: [RotationPattern; 4] = [
        RotationPattern::TwelveThirtySix,
        RotationPattern::TwelveTwentyFourFortyEight,
        RotationPattern::SixTwentyFour,
        RotationPattern::TwelveFortyEight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RotationPattern::TwelveThirtySix => "12-on/36-off",
            RotationPattern::TwelveTwentyFourFortyEight => "12-on/24-off-then-12-on/48-off",
            RotationPattern::SixTwentyFour => "6-on/24-off",
            RotationPattern::TwelveFortyEight => "12-on/48-off",
        }
    }

    /// Longueur du cycle en jours.
    pub fn cycle_days(&self) -> u32 {
        match self {
            RotationPattern::TwelveThirtySix => 2,
            RotationPattern::TwelveTwentyFourFortyEight => 4,
            RotationPattern::SixTwentyFour => 1,
            RotationPattern::TwelveFortyEight => 3,
        }
    }

    /// Créneau du jour `day_index` (0 = premier jour de la période), ou `None`
    /// pour un jour de repos. Les nuits démarrent à `anchor + 12h`.
    pub fn shift_for_day(&self, day_index: u32, anchor: ClockTime) -> Option<ShiftSpec> {
        let day = |duration_minutes| ShiftSpec {
            start: anchor,
            duration_minutes,
        };
        let night = ShiftSpec {
            start: anchor.add_hours(12),
            duration_minutes: TWELVE_HOURS,
        };
        match (self, day_index % self.cycle_days()) {
            (RotationPattern::TwelveThirtySix, 0) => Some(day(TWELVE_HOURS)),
            (RotationPattern::TwelveTwentyFourFortyEight, 0) => Some(day(TWELVE_HOURS)),
            (RotationPattern::TwelveTwentyFourFortyEight, 1) => Some(night),
            (RotationPattern::SixTwentyFour, _) => Some(day(SIX_HOURS)),
            (RotationPattern::TwelveFortyEight, 0) => Some(day(TWELVE_HOURS)),
            _ => None,
        }
    }
}

impl fmt::Display for RotationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RotationPattern {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "12-on/36-off" | "12x36" => Ok(RotationPattern::TwelveThirtySix),
            "12-on/24-off-then-12-on/48-off" | "12x24-12x48" | "12x24_48" | "12x24" => {
                Ok(RotationPattern::TwelveTwentyFourFortyEight)
            }
            "6-on/24-off" | "6x24" => Ok(RotationPattern::SixTwentyFour),
            "12-on/48-off" | "12x48" => Ok(RotationPattern::TwelveFortyEight),
            _ => Err(ScheduleError::InvalidPattern(s.to_string())),
        }
    }
}

impl TryFrom<String> for RotationPattern {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RotationPattern> for String {
    fn from(p: RotationPattern) -> Self {
        p.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven() -> ClockTime {
        ClockTime::parse("07:00").unwrap()
    }

    #[test]
    fn names_roundtrip() {
        for p in RotationPattern::ALL {
            assert_eq!(p.name().parse::<RotationPattern>().unwrap(), p);
        }
        assert_eq!(
            "12x36".parse::<RotationPattern>().unwrap(),
            RotationPattern::TwelveThirtySix
        );
        assert_eq!(
            "12x24_48".parse::<RotationPattern>().unwrap(),
            RotationPattern::TwelveTwentyFourFortyEight
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "24x72".parse::<RotationPattern>().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidPattern(ref s) if s == "24x72"));
    }

    #[test]
    fn four_day_cycle() {
        let p = RotationPattern::TwelveTwentyFourFortyEight;
        let d0 = p.shift_for_day(0, seven()).unwrap();
        let d1 = p.shift_for_day(1, seven()).unwrap();
        assert_eq!(d0.start.to_string(), "07:00");
        assert_eq!(d1.start.to_string(), "19:00");
        assert_eq!(d1.duration_minutes, 720);
        assert!(p.shift_for_day(2, seven()).is_none());
        assert!(p.shift_for_day(3, seven()).is_none());
        assert_eq!(p.shift_for_day(4, seven()), Some(d0));
    }

    #[test]
    fn twelve_thirty_six_alternates() {
        let p = RotationPattern::TwelveThirtySix;
        let worked: Vec<bool> = (0..6).map(|i| p.shift_for_day(i, seven()).is_some()).collect();
        assert_eq!(worked, [true, false, true, false, true, false]);
    }

    #[test]
    fn serde_uses_canonical_name() {
        let json = serde_json::to_string(&RotationPattern::SixTwentyFour).unwrap();
        assert_eq!(json, "\"6-on/24-off\"");
        let back: RotationPattern = serde_json::from_str("\"12x48\"").unwrap();
        assert_eq!(back, RotationPattern::TwelveFortyEight);
    }
}
