use std::f64::consts::{FRAC_PI_2, PI, TAU};

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use log::trace;

use crate::error::{check_unit_interval, Result, SolarError};
use crate::types::{
    AngleUnit, EquationOfTimeUnit, Site, SolarPosition, TimeUnit, TrueSolarTimeOptions,
};

pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Radians of equation of time to minutes (Spencer 1971).
pub const EOT_MINUTES_PER_RADIAN: f64 = 229.18;
pub const MEAN_SUN_EARTH_DISTANCE_KM: f64 = 149_600_000.0;
/// Sunrise/sunset zenith, including refraction and the solar disk radius.
pub const REFRACTION_CORRECTED_ZENITH_DEG: f64 = 90.833;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / PI)
}

pub fn normalize_radians(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Day of year (1..=366) used as the periodic Fourier argument.
pub fn day_of_year<D: Datelike>(date: &D) -> f64 {
    date.ordinal() as f64
}

pub fn minute_of_day<T: Timelike>(time: &T) -> f64 {
    time.hour() as f64 * 60.0 + time.minute() as f64 + time.second() as f64 / 60.0
}

/// Fractional year angle `2π(d−1)/365` shared by the Spencer series.
pub fn year_angle(day: f64) -> f64 {
    TAU * (day - 1.0) / DAYS_PER_YEAR
}

/// Solar declination (Spencer 1971, via Paltridge & Platt 1976).
pub fn declination(day: f64, unit: AngleUnit) -> f64 {
    let t = year_angle(day);
    let delta = 0.006918 - 0.399912 * t.cos() + 0.070257 * t.sin() - 0.006758 * (2.0 * t).cos()
        + 0.000907 * (2.0 * t).sin()
        - 0.002697 * (3.0 * t).cos()
        + 0.00148 * (3.0 * t).sin();
    match unit {
        AngleUnit::Radians => delta,
        AngleUnit::Degrees => rad_to_deg(delta),
    }
}

/// Equation of time (Spencer 1971).
pub fn equation_of_time(day: f64, unit: EquationOfTimeUnit) -> f64 {
    let t = year_angle(day);
    let eqtime = 0.000075 + 0.001868 * t.cos()
        - 0.032077 * t.sin()
        - 0.014615 * (2.0 * t).cos()
        - 0.040849 * (2.0 * t).sin();
    match unit {
        EquationOfTimeUnit::Radians => eqtime,
        EquationOfTimeUnit::Minutes => eqtime * EOT_MINUTES_PER_RADIAN,
        EquationOfTimeUnit::Hours => eqtime * (180.0 / (PI * DEGREES_PER_HOUR)),
    }
}

/// True solar time from a clock time given in minutes of day.
///
/// With `options.local_time` set, `minute_of_day` is local clock time and
/// `options.timezone` (hours east of UTC) is required.
pub fn true_solar_time(
    longitude: f64,
    minute_of_day: f64,
    day: f64,
    options: &TrueSolarTimeOptions,
) -> Result<f64> {
    let timezone = match (options.local_time, options.timezone) {
        (false, _) => None,
        (true, Some(tz)) => Some(tz),
        (true, None) => {
            return Err(SolarError::MissingParameter {
                parameter: "timezone",
            })
        }
    };
    Ok(true_solar_time_with(
        longitude,
        minute_of_day,
        day,
        timezone,
        options.result,
    ))
}

pub(crate) fn true_solar_time_with(
    longitude: f64,
    minute_of_day: f64,
    day: f64,
    timezone: Option<f64>,
    result: TimeUnit,
) -> f64 {
    match (timezone, result) {
        (None, TimeUnit::Minutes) => {
            minute_of_day
                + equation_of_time(day, EquationOfTimeUnit::Minutes)
                + longitude / DEGREES_PER_HOUR * 60.0
        }
        (None, TimeUnit::Hours) => {
            minute_of_day / 60.0
                + equation_of_time(day, EquationOfTimeUnit::Hours)
                + longitude / DEGREES_PER_HOUR
        }
        (Some(tz), TimeUnit::Minutes) => {
            minute_of_day + equation_of_time(day, EquationOfTimeUnit::Minutes) + 4.0 * longitude
                - 60.0 * tz
        }
        (Some(tz), TimeUnit::Hours) => {
            minute_of_day / 60.0
                + equation_of_time(day, EquationOfTimeUnit::Hours)
                + 4.0 * longitude / 60.0
                - tz
        }
    }
}

/// Hour angle of a true solar time. Negative before solar noon.
pub fn hour_angle(true_solar_time: f64, input: TimeUnit, output: AngleUnit) -> f64 {
    let ha = match input {
        TimeUnit::Minutes => true_solar_time / 4.0 - 180.0,
        TimeUnit::Hours => (true_solar_time - 12.0) * DEGREES_PER_HOUR,
    };
    match output {
        AngleUnit::Degrees => ha,
        AngleUnit::Radians => deg_to_rad(ha),
    }
}

fn utc_minutes(hour: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Minutes => hour,
        TimeUnit::Hours => hour * 60.0,
    }
}

/// Hour angle in radians for a UTC time of day.
pub(crate) fn utc_hour_angle(longitude: f64, day: f64, hour: f64, unit: TimeUnit) -> f64 {
    let minutes = utc_minutes(hour, unit);
    let tst = true_solar_time_with(longitude, minutes, day, None, TimeUnit::Minutes);
    hour_angle(tst, TimeUnit::Minutes, AngleUnit::Radians)
}

fn cosine_zenith_at(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat = deg_to_rad(latitude);
    declination.cos() * lat.cos() * hour_angle.cos() + declination.sin() * lat.sin()
}

/// Cosine of the solar zenith angle (Varejão-Silva & Ceballos 1980).
///
/// `hour` is UTC, in minutes of day or hours according to `unit`. Values
/// outside [-1, 1] mean the inputs were out of convention and are returned as is.
pub fn cosine_zenith(latitude: f64, longitude: f64, day: f64, hour: f64, unit: TimeUnit) -> f64 {
    let delta = declination(day, AngleUnit::Radians);
    let ha = utc_hour_angle(longitude, day, hour, unit);
    let mu0 = cosine_zenith_at(latitude, delta, ha);
    trace!("declination={delta} hour_angle={ha} mu0={mu0}");
    mu0
}

/// Solar zenith angle in radians.
pub fn zenith_angle(
    latitude: f64,
    longitude: f64,
    day: f64,
    hour: f64,
    unit: TimeUnit,
) -> Result<f64> {
    let mu0 = cosine_zenith(latitude, longitude, day, hour, unit);
    Ok(check_unit_interval("cosine of zenith angle", mu0)?.acos())
}

/// Solar elevation above the horizon in radians.
pub fn solar_elevation(
    latitude: f64,
    longitude: f64,
    day: f64,
    hour: f64,
    unit: TimeUnit,
) -> Result<f64> {
    Ok(FRAC_PI_2 - zenith_angle(latitude, longitude, day, hour, unit)?)
}

/// `sin(Z)·cos(lat)`; vanishes at the poles and with the sun at the zenith.
fn azimuth_denominator(latitude: f64, mu0: f64) -> f64 {
    mu0.acos().sin() * deg_to_rad(latitude).cos()
}

/// Pulls a rounding overshoot of the azimuth cosine back onto ±1.
///
/// On the meridian the ratio is exactly ±1, but the error inherited from μ0
/// grows as `ε / sin²Z`, so the allowed overshoot is scaled by `sin²Z`.
fn snap_azimuth_cosine(cos_azim: f64, mu0: f64) -> f64 {
    let sin2_z = 1.0 - mu0 * mu0;
    let excess = cos_azim.abs() - 1.0;
    if excess > 0.0 && excess * sin2_z <= 8.0 * f64::EPSILON {
        cos_azim.clamp(-1.0, 1.0)
    } else {
        cos_azim
    }
}

/// `(sin(lat)·μ0 − sin δ) / (sin Z·cos lat)`, NaN where the denominator vanishes.
pub(crate) fn azimuth_cosine_unchecked(latitude: f64, declination: f64, mu0: f64) -> f64 {
    let denominator = azimuth_denominator(latitude, mu0);
    if denominator.abs() < f64::EPSILON {
        return f64::NAN;
    }
    let ratio = (deg_to_rad(latitude).sin() * mu0 - declination.sin()) / denominator;
    snap_azimuth_cosine(ratio, mu0)
}

fn checked_azimuth(latitude: f64, declination: f64, mu0: f64) -> Result<f64> {
    check_unit_interval("cosine of zenith angle", mu0)?;
    let denominator = azimuth_denominator(latitude, mu0);
    if denominator.abs() < f64::EPSILON {
        return Err(SolarError::domain("sin(zenith)·cos(latitude)", denominator));
    }
    let cos_azim = azimuth_cosine_unchecked(latitude, declination, mu0);
    Ok(check_unit_interval("cosine of azimuth", cos_azim)?.acos())
}

/// Solar azimuth in radians, [0, π], measured from due south.
///
/// This is the principal `acos` branch, so morning and afternoon positions
/// mirrored about the meridian give the same value. See
/// [`azimuth_full_circle`] for the quadrant-corrected angle.
pub fn azimuth(latitude: f64, longitude: f64, day: f64, hour: f64, unit: TimeUnit) -> Result<f64> {
    let delta = declination(day, AngleUnit::Radians);
    let mu0 = cosine_zenith(latitude, longitude, day, hour, unit);
    checked_azimuth(latitude, delta, mu0)
}

/// Folds a half-range azimuth onto [0, 2π) clockwise from north using the
/// sign of the hour angle.
pub fn fold_azimuth(half_range: f64, hour_angle: f64) -> f64 {
    let north_based = if hour_angle > 0.0 {
        PI + half_range
    } else {
        PI - half_range
    };
    normalize_radians(north_based)
}

/// Solar azimuth in radians clockwise from north, [0, 2π).
pub fn azimuth_full_circle(
    latitude: f64,
    longitude: f64,
    day: f64,
    hour: f64,
    unit: TimeUnit,
) -> Result<f64> {
    let half = azimuth(latitude, longitude, day, hour, unit)?;
    Ok(fold_azimuth(half, utc_hour_angle(longitude, day, hour, unit)))
}

/// Sun–earth distance in kilometres (Spencer series).
pub fn sun_earth_distance(day: f64) -> f64 {
    let t = year_angle(day);
    MEAN_SUN_EARTH_DISTANCE_KM
        / (1.000110
            + 0.034221 * t.cos()
            + 0.001280 * t.sin()
            + 0.000719 * (2.0 * t).cos()
            + 0.000077 * (2.0 * t).sin())
        .sqrt()
}

/// Bundles the solar geometry at an instant. The time is converted to UTC first.
pub fn solar_position<Tz: TimeZone>(site: &Site, dt: &DateTime<Tz>) -> Result<SolarPosition> {
    let utc = dt.with_timezone(&Utc);
    let day = day_of_year(&utc);
    let minute = minute_of_day(&utc);

    let delta = declination(day, AngleUnit::Radians);
    let eot = equation_of_time(day, EquationOfTimeUnit::Minutes);
    let tst = true_solar_time_with(site.longitude, minute, day, None, TimeUnit::Minutes);
    let ha = hour_angle(tst, TimeUnit::Minutes, AngleUnit::Radians);
    let mu0 = cosine_zenith_at(site.latitude, delta, ha);
    trace!("day={day} minute={minute} tst={tst} mu0={mu0}");

    let zenith = check_unit_interval("cosine of zenith angle", mu0)?.acos();
    let azim = checked_azimuth(site.latitude, delta, mu0)?;

    Ok(SolarPosition {
        day_of_year: day,
        minute_of_day: minute,
        declination: delta,
        equation_of_time: eot,
        true_solar_time: tst,
        hour_angle: ha,
        cos_zenith: mu0,
        zenith,
        elevation: FRAC_PI_2 - zenith,
        azimuth: azim,
        azimuth_full_circle: fold_azimuth(azim, ha),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_angle_starts_at_zero() {
        assert_eq!(year_angle(1.0), 0.0);
        assert!((year_angle(366.0) - TAU).abs() < 1e-12);
    }

    #[test]
    fn fold_azimuth_mirrors_about_meridian() {
        let morning = fold_azimuth(PI / 2.0, -0.5);
        let afternoon = fold_azimuth(PI / 2.0, 0.5);
        assert!((morning - PI / 2.0).abs() < 1e-12);
        assert!((afternoon - 3.0 * PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn snap_azimuth_cosine_only_absorbs_rounding() {
        let mu0 = 0.5;
        assert_eq!(snap_azimuth_cosine(-1.0000000000000004, mu0), -1.0);
        assert_eq!(snap_azimuth_cosine(1.0 + 1e-15, mu0), 1.0);
        assert_eq!(snap_azimuth_cosine(1.001, mu0), 1.001);
        assert_eq!(snap_azimuth_cosine(0.3, mu0), 0.3);
    }

    #[test]
    fn fold_azimuth_due_south_is_pi() {
        assert!((fold_azimuth(0.0, 0.0) - PI).abs() < 1e-12);
        assert!(fold_azimuth(PI, -0.1).abs() < 1e-12);
    }
}
