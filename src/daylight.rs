//! Day length, sunrise, sunset, solar noon and clock formatting.
//!
//! Sunrise and sunset use the refraction-corrected zenith of 90.833°. At
//! latitudes where the sun stays above or below that horizon all day the
//! hour-angle cosine leaves [-1, 1] and the scalar functions fail with
//! [`SolarError::Domain`]; [`classify_day`] tells the two cases apart.

use std::f64::consts::PI;

use log::debug;

use crate::angles::{self, REFRACTION_CORRECTED_ZENITH_DEG};
use crate::error::{check_unit_interval, Result, SolarError};
use crate::types::{
    AngleUnit, Clock, ClockFormat, ClockTime, DayKind, DaylightSummary, EquationOfTimeUnit,
    EventFormat, EventTime, SunEvent,
};

const SUNRISE_COSINE: &str = "cosine of sunrise hour angle";

/// Cosine of the sunrise hour angle. Outside [-1, 1] on polar days and nights.
pub fn sunrise_hour_angle_cosine(latitude: f64, day: f64) -> f64 {
    let lat = angles::deg_to_rad(latitude);
    let delta = angles::declination(day, AngleUnit::Radians);
    let zenith = angles::deg_to_rad(REFRACTION_CORRECTED_ZENITH_DEG);
    zenith.cos() / (lat.cos() * delta.cos()) - lat.tan() * delta.tan()
}

/// Sunrise hour angle in radians, positive.
fn sunrise_hour_angle(latitude: f64, day: f64) -> Result<f64> {
    let cos_ha = sunrise_hour_angle_cosine(latitude, day);
    if cos_ha.is_finite() && !(-1.0..=1.0).contains(&cos_ha) {
        debug!("{:?} at latitude {latitude}, day {day}", kind_from_cosine(cos_ha));
    }
    Ok(check_unit_interval(SUNRISE_COSINE, cos_ha)?.acos())
}

pub(crate) fn kind_from_cosine(cos_ha: f64) -> DayKind {
    if cos_ha < -1.0 {
        DayKind::PolarDay
    } else if cos_ha > 1.0 {
        DayKind::PolarNight
    } else {
        DayKind::Normal
    }
}

pub fn classify_day(latitude: f64, day: f64) -> DayKind {
    kind_from_cosine(sunrise_hour_angle_cosine(latitude, day))
}

/// Maximum daylight duration in minutes.
pub fn day_length(latitude: f64, day: f64) -> Result<f64> {
    Ok(24.0 / PI * sunrise_hour_angle(latitude, day)? * 60.0)
}

/// Minutes of day (UTC) at which the sun sits at hour angle `ha_deg`.
pub(crate) fn event_minutes(longitude: f64, day: f64, ha_deg: f64) -> f64 {
    720.0 - 4.0 * (longitude + ha_deg) - angles::equation_of_time(day, EquationOfTimeUnit::Minutes)
}

fn sun_event(longitude: f64, day: f64, ha_deg: f64, format: EventFormat) -> Result<SunEvent> {
    format_event(event_minutes(longitude, day, ha_deg), ha_deg, format)
}

pub(crate) fn format_event(minutes: f64, ha_deg: f64, format: EventFormat) -> Result<SunEvent> {
    let time = match format {
        EventFormat::Minutes => EventTime::Minutes(minutes),
        EventFormat::Clock => EventTime::Clock(clock_time(minutes)?.to_string()),
    };
    Ok(SunEvent {
        time,
        hour_angle: ha_deg,
    })
}

/// Sunrise in UTC, with the hour angle in degrees taken positive.
pub fn sunrise(latitude: f64, longitude: f64, day: f64, format: EventFormat) -> Result<SunEvent> {
    let ha_deg = angles::rad_to_deg(sunrise_hour_angle(latitude, day)?);
    sun_event(longitude, day, ha_deg, format)
}

/// Sunset in UTC, with the hour angle in degrees taken negative.
pub fn sunset(latitude: f64, longitude: f64, day: f64, format: EventFormat) -> Result<SunEvent> {
    let ha_deg = -angles::rad_to_deg(sunrise_hour_angle(latitude, day)?);
    sun_event(longitude, day, ha_deg, format)
}

/// Solar noon in minutes of day (UTC).
pub fn solar_noon(longitude: f64, day: f64) -> f64 {
    event_minutes(longitude, day, 0.0)
}

/// Splits minutes of day into hour and rounded minute.
///
/// The minute is rounded half to even; a rounded minute of 60 carries into
/// the hour. No wrap is applied past 24:00.
pub fn clock_time(minutes: f64) -> Result<ClockTime> {
    if !minutes.is_finite() {
        return Err(SolarError::domain("minutes of day", minutes));
    }
    let mut hour = (minutes / 60.0).floor() as i64;
    let mut minute = minutes.rem_euclid(60.0).round_ties_even() as i64;
    if minute == 60 {
        hour += 1;
        minute = 0;
    }
    Ok(ClockTime { hour, minute })
}

pub fn minutes_to_clock(minutes: f64, format: ClockFormat) -> Result<Clock> {
    let time = clock_time(minutes)?;
    Ok(match format {
        ClockFormat::Parts => Clock::Parts(time),
        ClockFormat::Text => Clock::Text(time.to_string()),
    })
}

/// Sunrise, solar noon, sunset and day length for one day, in minutes (UTC).
pub fn daylight_summary(latitude: f64, longitude: f64, day: f64) -> Result<DaylightSummary> {
    let ha = sunrise_hour_angle(latitude, day)?;
    let ha_deg = angles::rad_to_deg(ha);
    Ok(DaylightSummary {
        sunrise: event_minutes(longitude, day, ha_deg),
        solar_noon: solar_noon(longitude, day),
        sunset: event_minutes(longitude, day, -ha_deg),
        day_length: 24.0 / PI * ha * 60.0,
    })
}
