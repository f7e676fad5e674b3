use std::f64::consts::PI;

use approx::assert_relative_eq;
use chrono::{NaiveDate, TimeZone, Utc};
use rstest::rstest;

use solar_geometry::angles::*;
use solar_geometry::types::{AngleUnit, EquationOfTimeUnit, Site, TimeUnit, TrueSolarTimeOptions};
use solar_geometry::SolarError;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

const SAO_PAULO: (f64, f64) = (-23.55, -46.64);

// ── Declination ──

#[rstest]
#[case(1.0)]
#[case(80.0)]
#[case(172.0)]
#[case(264.5)]
#[case(355.0)]
fn test_declination_is_annual(#[case] day: f64) {
    assert_relative_eq!(
        declination(day, AngleUnit::Radians),
        declination(day + 365.0, AngleUnit::Radians),
        epsilon = 1e-12
    );
}

#[test]
fn test_declination_june_solstice() {
    assert_approx!(declination(172.0, AngleUnit::Radians), 0.409315, 1e-6);
    assert_approx!(declination(172.0, AngleUnit::Degrees), 23.452, 1e-3);
}

#[test]
fn test_declination_equinox_and_new_year() {
    assert_approx!(declination(80.0, AngleUnit::Degrees), -0.066, 1e-3);
    assert_approx!(declination(1.0, AngleUnit::Degrees), -23.059, 1e-3);
}

#[test]
fn test_declination_bounded_all_days() {
    for n in 1..=366 {
        let decl = declination(n as f64, AngleUnit::Degrees);
        assert!(decl.abs() <= 23.5, "Day {}: {}", n, decl);
    }
}

// ── EquationOfTime ──

#[test]
fn test_equation_of_time_extremes() {
    assert_approx!(equation_of_time(45.0, EquationOfTimeUnit::Minutes), -14.257, 1e-3);
    assert_approx!(equation_of_time(307.0, EquationOfTimeUnit::Minutes), 16.365, 1e-3);
}

#[test]
fn test_equation_of_time_radians_to_minutes() {
    let rad = equation_of_time(1.0, EquationOfTimeUnit::Radians);
    assert_approx!(rad, -0.012672, 1e-9);
    assert_approx!(equation_of_time(1.0, EquationOfTimeUnit::Minutes), rad * 229.18, 1e-12);
}

#[test]
fn test_equation_of_time_hours_match_minutes() {
    for n in 1..=366 {
        let d = n as f64;
        let hours = equation_of_time(d, EquationOfTimeUnit::Hours);
        let minutes = equation_of_time(d, EquationOfTimeUnit::Minutes);
        assert_approx!(hours * 60.0, minutes, 1e-3);
    }
}

// ── TrueSolarTime ──

#[test]
fn test_true_solar_time_utc() {
    let (_, lon) = SAO_PAULO;
    let minutes = true_solar_time(lon, 900.0, 172.0, &TrueSolarTimeOptions::utc()).unwrap();
    assert_approx!(minutes, 712.1118, 1e-3);
    let hours =
        true_solar_time(lon, 900.0, 172.0, &TrueSolarTimeOptions::utc().in_hours()).unwrap();
    assert_approx!(hours, 11.8685, 1e-3);
}

#[test]
fn test_true_solar_time_local_matches_utc() {
    let (_, lon) = SAO_PAULO;
    let local = TrueSolarTimeOptions::local(-3.0);
    let minutes = true_solar_time(lon, 720.0, 172.0, &local).unwrap();
    assert_approx!(minutes, 712.1118, 1e-3);
    let hours = true_solar_time(lon, 720.0, 172.0, &local.in_hours()).unwrap();
    assert_approx!(hours, 11.8685, 1e-3);
}

#[test]
fn test_true_solar_time_local_requires_timezone() {
    let options = TrueSolarTimeOptions {
        local_time: true,
        timezone: None,
        result: TimeUnit::Minutes,
    };
    assert_eq!(
        true_solar_time(0.0, 720.0, 1.0, &options),
        Err(SolarError::MissingParameter {
            parameter: "timezone"
        })
    );
}

#[test]
fn test_true_solar_time_ignores_timezone_for_utc() {
    let options = TrueSolarTimeOptions {
        local_time: false,
        timezone: Some(5.0),
        result: TimeUnit::Minutes,
    };
    let with_tz = true_solar_time(10.0, 600.0, 100.0, &options).unwrap();
    let without = true_solar_time(10.0, 600.0, 100.0, &TrueSolarTimeOptions::default()).unwrap();
    assert_eq!(with_tz, without);
}

// ── HourAngle ──

#[test]
fn test_hour_angle_zero_at_noon() {
    assert_eq!(hour_angle(720.0, TimeUnit::Minutes, AngleUnit::Degrees), 0.0);
    assert_eq!(hour_angle(12.0, TimeUnit::Hours, AngleUnit::Radians), 0.0);
}

#[rstest]
#[case(660.0, 11.0, -15.0)]
#[case(780.0, 13.0, 15.0)]
#[case(360.0, 6.0, -90.0)]
fn test_hour_angle_fifteen_degrees_per_hour(
    #[case] minutes: f64,
    #[case] hours: f64,
    #[case] expected_deg: f64,
) {
    assert_approx!(hour_angle(minutes, TimeUnit::Minutes, AngleUnit::Degrees), expected_deg, 1e-12);
    assert_approx!(hour_angle(hours, TimeUnit::Hours, AngleUnit::Degrees), expected_deg, 1e-12);
    assert_approx!(
        hour_angle(minutes, TimeUnit::Minutes, AngleUnit::Radians),
        expected_deg * PI / 180.0,
        1e-12
    );
}

// ── CosineZenith ──

#[test]
fn test_cosine_zenith_reference_values() {
    let (lat, lon) = SAO_PAULO;
    assert_approx!(cosine_zenith(lat, lon, 172.0, 900.0, TimeUnit::Minutes), 0.681474, 1e-6);
    assert_approx!(cosine_zenith(lat, lon, 172.0, 15.0, TimeUnit::Hours), 0.681474, 1e-6);
    assert_approx!(cosine_zenith(0.0, 0.0, 80.0, 12.0, TimeUnit::Hours), 0.999412, 1e-6);
}

#[test]
fn test_cosine_zenith_bounded() {
    for lat in (-60..=60).step_by(10) {
        for day in (1..=365).step_by(30) {
            for hour in 0..24 {
                let mu0 = cosine_zenith(lat as f64, 30.0, day as f64, hour as f64, TimeUnit::Hours);
                assert!((-1.0..=1.0).contains(&mu0), "lat={lat} day={day} hour={hour}: {mu0}");
            }
        }
    }
}

#[test]
fn test_zenith_and_elevation_are_complementary() {
    let (lat, lon) = SAO_PAULO;
    let z = zenith_angle(lat, lon, 172.0, 15.0, TimeUnit::Hours).unwrap();
    let e = solar_elevation(lat, lon, 172.0, 15.0, TimeUnit::Hours).unwrap();
    assert_approx!(z, 0.681474_f64.acos(), 1e-6);
    assert_approx!(z + e, PI / 2.0, 1e-12);
}

// ── Azimuth ──

#[test]
fn test_azimuth_reference_values() {
    let (lat, lon) = SAO_PAULO;
    assert_approx!(azimuth(lat, lon, 172.0, 900.0, TimeUnit::Minutes).unwrap(), 3.098442, 1e-6);
    assert_approx!(azimuth(lat, lon, 172.0, 13.0, TimeUnit::Hours).unwrap(), 2.518343, 1e-6);
    assert_approx!(azimuth(40.0, -90.0, 172.0, 20.0, TimeUnit::Hours).unwrap(), 1.142140, 1e-6);
}

#[test]
fn test_azimuth_half_range() {
    for hour in 0..24 {
        let a = azimuth(35.0, 0.0, 100.0, hour as f64, TimeUnit::Hours).unwrap();
        assert!((0.0..=PI).contains(&a), "hour={hour}: {a}");
    }
}

#[test]
fn test_azimuth_defined_at_solar_noon() {
    for lat in (-60..=60).step_by(5) {
        for day in (1..=365).step_by(5) {
            let (lat, day) = (lat as f64, day as f64);
            for lon in [-46.64, 0.0, 15.0] {
                let noon = solar_geometry::solar_noon(lon, day);
                let result = azimuth(lat, lon, day, noon, TimeUnit::Minutes);
                if (lat - declination(day, AngleUnit::Degrees)).abs() < 0.1 {
                    continue;
                }
                let a = result.unwrap_or_else(|e| panic!("lat={lat} day={day} lon={lon}: {e}"));
                assert!(a.abs() < 1e-3 || (a - PI).abs() < 1e-3, "lat={lat} day={day}: {a}");
            }
        }
    }
}

#[test]
fn test_solar_position_at_solar_noon() {
    let site = Site::new(40.0, 0.0).unwrap();
    let noon = (solar_geometry::solar_noon(0.0, 172.0) * 60.0).round() as u32;
    let dt = Utc
        .with_ymd_and_hms(2026, 6, 21, noon / 3600, noon / 60 % 60, noon % 60)
        .unwrap();
    let pos = solar_position(&site, &dt).unwrap();
    assert_approx!(pos.azimuth, 0.0, 0.01);
}

#[test]
fn test_azimuth_at_pole_is_domain_error() {
    for lat in [90.0, -90.0] {
        let result = azimuth(lat, 0.0, 172.0, 12.0, TimeUnit::Hours);
        assert!(
            matches!(
                result,
                Err(SolarError::Domain {
                    quantity: "sin(zenith)·cos(latitude)",
                    ..
                })
            ),
            "lat={lat}: {result:?}"
        );
    }
}

#[test]
fn test_azimuth_full_circle_quadrants() {
    let (lat, lon) = SAO_PAULO;
    // Just before solar noon in southern winter: sun slightly east of north.
    let morning = azimuth_full_circle(lat, lon, 172.0, 15.0, TimeUnit::Hours).unwrap();
    assert_approx!(morning, PI - 3.098442, 1e-6);
    // Mid-afternoon in northern summer: sun in the south-west.
    let afternoon = azimuth_full_circle(40.0, -90.0, 172.0, 20.0, TimeUnit::Hours).unwrap();
    assert_approx!(afternoon, PI + 1.142140, 1e-6);
}

// ── SunEarthDistance ──

#[test]
fn test_sun_earth_distance_perihelion_aphelion() {
    assert_approx!(sun_earth_distance(3.0), 147_043_281.4, 1.0);
    assert_approx!(sun_earth_distance(185.0), 152_163_533.5, 1.0);
    assert!(sun_earth_distance(3.0) < MEAN_SUN_EARTH_DISTANCE_KM);
    assert!(sun_earth_distance(185.0) > MEAN_SUN_EARTH_DISTANCE_KM);
}

// ── Calendar helpers and SolarPosition ──

#[test]
fn test_day_of_year_from_dates() {
    let leap = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let common = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
    assert_eq!(day_of_year(&leap), 61.0);
    assert_eq!(day_of_year(&common), 172.0);
}

#[test]
fn test_solar_position_sao_paulo() {
    let (lat, lon) = SAO_PAULO;
    let site = Site::new(lat, lon).unwrap();
    let dt = Utc.with_ymd_and_hms(2026, 6, 21, 15, 0, 0).unwrap();
    let pos = solar_position(&site, &dt).unwrap();
    assert_eq!(pos.day_of_year, 172.0);
    assert_eq!(pos.minute_of_day, 900.0);
    assert_approx!(pos.true_solar_time, 712.1118, 1e-3);
    assert_approx!(pos.cos_zenith, 0.681474, 1e-6);
    assert_approx!(pos.azimuth, 3.098442, 1e-6);
    assert_approx!(pos.azimuth_full_circle, PI - 3.098442, 1e-6);
    assert!(pos.hour_angle < 0.0);
}

#[test]
fn test_solar_position_converts_local_time() {
    let site = Site::unchecked(-23.55, -46.64);
    let local = chrono::FixedOffset::west_opt(3 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 6, 21, 12, 0, 0)
        .unwrap();
    let utc = Utc.with_ymd_and_hms(2026, 6, 21, 15, 0, 0).unwrap();
    assert_eq!(
        solar_position(&site, &local).unwrap(),
        solar_position(&site, &utc).unwrap()
    );
}

#[test]
fn test_site_validation() {
    assert_eq!(
        Site::new(91.0, 0.0),
        Err(SolarError::InvalidLatitude { value: 91.0 })
    );
    assert_eq!(
        Site::new(0.0, -180.5),
        Err(SolarError::InvalidLongitude { value: -180.5 })
    );
    assert!(Site::new(-90.0, 180.0).is_ok());
}
