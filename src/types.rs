use std::fmt;

use crate::error::{Result, SolarError};

/// Output unit for angular results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// Output unit for the equation of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EquationOfTimeUnit {
    #[default]
    Radians,
    Minutes,
    Hours,
}

/// Unit of a time-of-day value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeUnit {
    #[default]
    Minutes,
    Hours,
}

/// Whether sunrise/sunset times are returned as raw minutes or as a clock string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventFormat {
    #[default]
    Minutes,
    Clock,
}

/// Output shape of [`crate::daylight::minutes_to_clock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClockFormat {
    #[default]
    Parts,
    Text,
}

/// How the clock time fed to [`crate::angles::true_solar_time`] is referenced.
///
/// `timezone` is in hours east of UTC and must be present when `local_time` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrueSolarTimeOptions {
    pub local_time: bool,
    pub timezone: Option<f64>,
    pub result: TimeUnit,
}

impl Default for TrueSolarTimeOptions {
    fn default() -> Self {
        Self {
            local_time: false,
            timezone: None,
            result: TimeUnit::Minutes,
        }
    }
}

impl TrueSolarTimeOptions {
    pub fn utc() -> Self {
        Self::default()
    }

    pub fn local(timezone: f64) -> Self {
        Self {
            local_time: true,
            timezone: Some(timezone),
            result: TimeUnit::Minutes,
        }
    }

    pub fn in_hours(self) -> Self {
        Self {
            result: TimeUnit::Hours,
            ..self
        }
    }
}

/// A geographic location in degrees, longitude positive east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub latitude: f64,
    pub longitude: f64,
}

impl Site {
    /// Builds a site after checking the conventional coordinate ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SolarError::InvalidLatitude { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SolarError::InvalidLongitude { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a site without range checks; the formulas accept any real input.
    pub const fn unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn daylight(&self, day: f64) -> Result<DaylightSummary> {
        crate::daylight::daylight_summary(self.latitude, self.longitude, day)
    }
}

/// Hour and minute of a minutes-of-day value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    pub hour: i64,
    pub minute: i64,
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clock {
    Parts(ClockTime),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    /// Minutes of day, UTC.
    Minutes(f64),
    /// Zero-padded "HH:MM", UTC.
    Clock(String),
}

/// A sunrise or sunset time with its hour angle in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct SunEvent {
    pub time: EventTime,
    pub hour_angle: f64,
}

impl SunEvent {
    pub fn minutes(&self) -> Option<f64> {
        match self.time {
            EventTime::Minutes(m) => Some(m),
            EventTime::Clock(_) => None,
        }
    }
}

/// Whether the sun crosses the refraction-corrected horizon on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKind {
    Normal,
    /// The sun never sets.
    PolarDay,
    /// The sun never rises.
    PolarNight,
}

/// Daylight timings for one site and day, all in minutes (UTC).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaylightSummary {
    pub sunrise: f64,
    pub solar_noon: f64,
    pub sunset: f64,
    pub day_length: f64,
}

/// Everything [`crate::angles::solar_position`] derives for one instant.
///
/// Angles are in radians; times are in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub day_of_year: f64,
    pub minute_of_day: f64,
    pub declination: f64,
    pub equation_of_time: f64,
    pub true_solar_time: f64,
    pub hour_angle: f64,
    pub cos_zenith: f64,
    pub zenith: f64,
    pub elevation: f64,
    /// Half-range azimuth in [0, π], measured from due south.
    pub azimuth: f64,
    /// Azimuth clockwise from north in [0, 2π).
    pub azimuth_full_circle: f64,
}
