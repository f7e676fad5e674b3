//! Elementwise versions of the solar formulas over `ndarray` inputs.
//!
//! Inputs of a call must share one shape; a single-element array broadcasts
//! against the others. Domain failures are not errors here: they surface as
//! NaN in the affected elements, as the scalar IEEE operations would produce.
//!
//! [`sunrise`] and [`sunset`] return raw minutes; [`sunrise_events`] and
//! [`sunset_events`] honour an [`EventFormat`], and [`minutes_to_clock`] a
//! [`ClockFormat`], yielding `None` where no clock time exists.

use log::debug;
use ndarray::{Array, ArrayView, Dimension, Zip};

use crate::angles;
use crate::daylight;
use crate::error::{Result, SolarError};
use crate::types::{
    AngleUnit, Clock, ClockFormat, EquationOfTimeUnit, EventFormat, SunEvent, TimeUnit,
    TrueSolarTimeOptions,
};

/// Shape of the call: the first input with more than one element, else the first.
fn common_dim<D: Dimension>(dims: &[D]) -> D {
    dims.iter()
        .find(|d| d.size() != 1)
        .or_else(|| dims.first())
        .cloned()
        .unwrap_or_default()
}

fn conform<'b, D: Dimension>(
    quantity: &'static str,
    input: &'b ArrayView<'_, f64, D>,
    dim: &D,
) -> Result<ArrayView<'b, f64, D>> {
    if input.raw_dim() == *dim {
        return Ok(input.view());
    }
    if input.len() == 1 {
        if let Some(view) = input.broadcast(dim.clone()) {
            return Ok(view);
        }
    }
    Err(SolarError::ShapeMismatch {
        quantity,
        expected: dim.slice().to_vec(),
        found: input.shape().to_vec(),
    })
}

fn log_nan_count<D: Dimension>(what: &str, values: &Array<f64, D>) {
    let nan = values.iter().filter(|v| v.is_nan()).count();
    if nan > 0 {
        debug!("{what}: {nan} of {} elements outside the domain", values.len());
    }
}

pub fn declination<D: Dimension>(days: &ArrayView<'_, f64, D>, unit: AngleUnit) -> Array<f64, D> {
    days.mapv(|d| angles::declination(d, unit))
}

pub fn equation_of_time<D: Dimension>(
    days: &ArrayView<'_, f64, D>,
    unit: EquationOfTimeUnit,
) -> Array<f64, D> {
    days.mapv(|d| angles::equation_of_time(d, unit))
}

pub fn sun_earth_distance<D: Dimension>(days: &ArrayView<'_, f64, D>) -> Array<f64, D> {
    days.mapv(angles::sun_earth_distance)
}

pub fn hour_angle<D: Dimension>(
    true_solar_time: &ArrayView<'_, f64, D>,
    input: TimeUnit,
    output: AngleUnit,
) -> Array<f64, D> {
    true_solar_time.mapv(|t| angles::hour_angle(t, input, output))
}

/// Fails with [`SolarError::MissingParameter`] before touching the data when
/// local time is requested without a timezone.
pub fn true_solar_time<D: Dimension>(
    longitude: &ArrayView<'_, f64, D>,
    minute_of_day: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
    options: &TrueSolarTimeOptions,
) -> Result<Array<f64, D>> {
    let timezone = match (options.local_time, options.timezone) {
        (true, None) => {
            return Err(SolarError::MissingParameter {
                parameter: "timezone",
            })
        }
        (true, tz) => tz,
        (false, _) => None,
    };
    let dim = common_dim(&[longitude.raw_dim(), minute_of_day.raw_dim(), day.raw_dim()]);
    let lon = conform("longitude", longitude, &dim)?;
    let minute = conform("minute of day", minute_of_day, &dim)?;
    let day = conform("day", day, &dim)?;
    Ok(Zip::from(&lon).and(&minute).and(&day).map_collect(|&lon, &m, &d| {
        angles::true_solar_time_with(lon, m, d, timezone, options.result)
    }))
}

pub fn cosine_zenith<D: Dimension>(
    latitude: &ArrayView<'_, f64, D>,
    longitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
    hour: &ArrayView<'_, f64, D>,
    unit: TimeUnit,
) -> Result<Array<f64, D>> {
    let dim = common_dim(&[
        latitude.raw_dim(),
        longitude.raw_dim(),
        day.raw_dim(),
        hour.raw_dim(),
    ]);
    let lat = conform("latitude", latitude, &dim)?;
    let lon = conform("longitude", longitude, &dim)?;
    let day = conform("day", day, &dim)?;
    let hour = conform("hour", hour, &dim)?;
    Ok(Zip::from(&lat)
        .and(&lon)
        .and(&day)
        .and(&hour)
        .map_collect(|&lat, &lon, &d, &h| angles::cosine_zenith(lat, lon, d, h, unit)))
}

/// Half-range azimuth in radians from due south; NaN where undefined.
pub fn azimuth<D: Dimension>(
    latitude: &ArrayView<'_, f64, D>,
    longitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
    hour: &ArrayView<'_, f64, D>,
    unit: TimeUnit,
) -> Result<Array<f64, D>> {
    let mu0 = cosine_zenith(latitude, longitude, day, hour, unit)?;
    let dim = mu0.raw_dim();
    let lat = conform("latitude", latitude, &dim)?;
    let day = conform("day", day, &dim)?;
    let azim = Zip::from(&lat).and(&day).and(&mu0).map_collect(|&lat, &d, &mu0| {
        let delta = angles::declination(d, AngleUnit::Radians);
        angles::azimuth_cosine_unchecked(lat, delta, mu0).acos()
    });
    log_nan_count("azimuth", &azim);
    Ok(azim)
}

/// Azimuth in radians clockwise from north; NaN where undefined.
pub fn azimuth_full_circle<D: Dimension>(
    latitude: &ArrayView<'_, f64, D>,
    longitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
    hour: &ArrayView<'_, f64, D>,
    unit: TimeUnit,
) -> Result<Array<f64, D>> {
    let half = azimuth(latitude, longitude, day, hour, unit)?;
    let dim = half.raw_dim();
    let lon = conform("longitude", longitude, &dim)?;
    let day = conform("day", day, &dim)?;
    let hour = conform("hour", hour, &dim)?;
    Ok(Zip::from(&half)
        .and(&lon)
        .and(&day)
        .and(&hour)
        .map_collect(|&a, &lon, &d, &h| {
            angles::fold_azimuth(a, angles::utc_hour_angle(lon, d, h, unit))
        }))
}

/// Day length in minutes; NaN on polar days and nights.
pub fn day_length<D: Dimension>(
    latitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
) -> Result<Array<f64, D>> {
    let dim = common_dim(&[latitude.raw_dim(), day.raw_dim()]);
    let lat = conform("latitude", latitude, &dim)?;
    let day = conform("day", day, &dim)?;
    let length = Zip::from(&lat).and(&day).map_collect(|&lat, &d| {
        24.0 / std::f64::consts::PI * daylight::sunrise_hour_angle_cosine(lat, d).acos() * 60.0
    });
    log_nan_count("day length", &length);
    Ok(length)
}

fn sun_events<D: Dimension>(
    latitude: &ArrayView<'_, f64, D>,
    longitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
    sign: f64,
) -> Result<(Array<f64, D>, Array<f64, D>)> {
    let dim = common_dim(&[latitude.raw_dim(), longitude.raw_dim(), day.raw_dim()]);
    let lat = conform("latitude", latitude, &dim)?;
    let lon = conform("longitude", longitude, &dim)?;
    let day = conform("day", day, &dim)?;
    let ha_deg = Zip::from(&lat).and(&day).map_collect(|&lat, &d| {
        sign * angles::rad_to_deg(daylight::sunrise_hour_angle_cosine(lat, d).acos())
    });
    log_nan_count("sunrise hour angle", &ha_deg);
    let minutes = Zip::from(&lon)
        .and(&day)
        .and(&ha_deg)
        .map_collect(|&lon, &d, &ha| daylight::event_minutes(lon, d, ha));
    Ok((minutes, ha_deg))
}

/// Sunrise minutes (UTC) and hour angles in degrees.
pub fn sunrise<D: Dimension>(
    latitude: &ArrayView<'_, f64, D>,
    longitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
) -> Result<(Array<f64, D>, Array<f64, D>)> {
    sun_events(latitude, longitude, day, 1.0)
}

/// Sunset minutes (UTC) and negated hour angles in degrees.
pub fn sunset<D: Dimension>(
    latitude: &ArrayView<'_, f64, D>,
    longitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
) -> Result<(Array<f64, D>, Array<f64, D>)> {
    sun_events(latitude, longitude, day, -1.0)
}

pub fn solar_noon<D: Dimension>(
    longitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
) -> Result<Array<f64, D>> {
    let dim = common_dim(&[longitude.raw_dim(), day.raw_dim()]);
    let lon = conform("longitude", longitude, &dim)?;
    let day = conform("day", day, &dim)?;
    Ok(Zip::from(&lon)
        .and(&day)
        .map_collect(|&lon, &d| daylight::solar_noon(lon, d)))
}

fn events<D: Dimension>(
    minutes: &Array<f64, D>,
    ha_deg: &Array<f64, D>,
    format: EventFormat,
) -> Array<Option<SunEvent>, D> {
    Zip::from(minutes).and(ha_deg).map_collect(|&m, &ha| {
        if m.is_finite() {
            daylight::format_event(m, ha, format).ok()
        } else {
            None
        }
    })
}

/// Sunrise per element in the requested format; `None` on polar days and nights.
pub fn sunrise_events<D: Dimension>(
    latitude: &ArrayView<'_, f64, D>,
    longitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
    format: EventFormat,
) -> Result<Array<Option<SunEvent>, D>> {
    let (minutes, ha_deg) = sun_events(latitude, longitude, day, 1.0)?;
    Ok(events(&minutes, &ha_deg, format))
}

/// Sunset per element in the requested format; `None` on polar days and nights.
pub fn sunset_events<D: Dimension>(
    latitude: &ArrayView<'_, f64, D>,
    longitude: &ArrayView<'_, f64, D>,
    day: &ArrayView<'_, f64, D>,
    format: EventFormat,
) -> Result<Array<Option<SunEvent>, D>> {
    let (minutes, ha_deg) = sun_events(latitude, longitude, day, -1.0)?;
    Ok(events(&minutes, &ha_deg, format))
}

/// `None` for non-finite minutes, such as a polar sunrise.
pub fn minutes_to_clock<D: Dimension>(
    minutes: &ArrayView<'_, f64, D>,
    format: ClockFormat,
) -> Array<Option<Clock>, D> {
    minutes.map(|&m| daylight::minutes_to_clock(m, format).ok())
}
