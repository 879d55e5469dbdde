//! Universal Transverse Mercator, following the series expansions of
//! USGS Professional Paper 1395 (Snyder, 1987), eqs. (8-9) through (8-25).
//!
//! The projection functions are used directly by the grid computations,
//! which need single point conversions with northings reckoned from the
//! equator (i.e. negative on the southern hemisphere). The `utm` operator
//! wraps them for use through a `Context`.
use crate::authoring::*;

/// The scale factor on the central meridian, by definition of UTM
pub(crate) const SCALE_FACTOR: f64 = 0.9996;

/// The false easting, by definition of UTM
pub(crate) const FALSE_EASTING: f64 = 500_000.;

/// The central meridian of `zone`, in radians
pub(crate) fn central_meridian(zone: usize) -> f64 {
    (-183. + 6. * zone as f64).to_radians()
}

// ----- F O R W A R D -----------------------------------------------------------------

/// Project the longitude/latitude (radians) in `lonlat` to easting/northing
/// in `zone`. The northing is signed, with origin at the equator.
pub(crate) fn project(ellps: &Ellipsoid, zone: usize, lonlat: Coor2D) -> Coor2D {
    let eps = ellps.second_eccentricity_squared();
    let lat = lonlat[1];

    let (s, c) = lat.sin_cos();
    let t = s / c;
    let tt = t * t;
    let n = ellps.prime_vertical_radius_of_curvature(lat);
    let cc = eps * c * c;
    let a = c * angular::normalize_symmetric(lonlat[0] - central_meridian(zone));
    let m = ellps.meridional_distance(lat, Fwd);

    let easting = SCALE_FACTOR
        * n
        * (a + (1. - tt + cc) * a.powi(3) / 6.
            + (5. - 18. * tt + tt * tt + 72. * cc - 58. * eps) * a.powi(5) / 120.)
        + FALSE_EASTING;

    let northing = SCALE_FACTOR
        * (m + n
            * t
            * (a * a / 2.
                + (5. - tt + 9. * cc + 4. * cc * cc) * a.powi(4) / 24.
                + (61. - 58. * tt + tt * tt + 600. * cc - 330. * eps) * a.powi(6) / 720.));

    Coor2D::raw(easting, northing)
}

fn fwd(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = op.params.ellps(0);
    let y_0 = op.params.y(0);
    let Ok(zone) = op.params.natural("zone") else {
        return 0;
    };

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let mut coord = project(ellps, zone, operands.get_coord(i));
        if coord.is_nan() {
            operands.set_coord(i, &Coor2D::nan());
            continue;
        }
        coord[1] += y_0;
        operands.set_coord(i, &coord);
        successes += 1;
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

/// The inverse of [`project`]: Easting/northing in `zone` to
/// longitude/latitude in radians
pub(crate) fn unproject(ellps: &Ellipsoid, zone: usize, en: Coor2D) -> Coor2D {
    let eps = ellps.second_eccentricity_squared();

    // The footpoint latitude
    let lat1 = ellps.meridional_distance(en[1] / SCALE_FACTOR, Inv);

    let (s, c) = lat1.sin_cos();
    let t = s / c;
    let tt = t * t;
    let cc = eps * c * c;
    let n1 = ellps.prime_vertical_radius_of_curvature(lat1);
    let r1 = ellps.meridian_radius_of_curvature(lat1);
    let d = (en[0] - FALSE_EASTING) / (n1 * SCALE_FACTOR);

    let lat = lat1
        - (n1 * t / r1)
            * (d * d / 2.
                - (5. + 3. * tt + 10. * cc - 4. * cc * cc - 9. * eps) * d.powi(4) / 24.
                + (61. + 90. * tt + 298. * cc + 45. * tt * tt - 252. * eps - 3. * cc * cc)
                    * d.powi(6)
                    / 720.);

    let lon = central_meridian(zone)
        + (d - (1. + 2. * tt + cc) * d.powi(3) / 6.
            + (5. - 2. * cc + 28. * tt - 3. * cc * cc + 8. * eps + 24. * tt * tt) * d.powi(5)
                / 120.)
            / c;

    Coor2D::raw(angular::normalize_symmetric(lon), lat)
}

fn inv(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = op.params.ellps(0);
    let y_0 = op.params.y(0);
    let Ok(zone) = op.params.natural("zone") else {
        return 0;
    };

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let mut coord = operands.get_coord(i);
        coord[1] -= y_0;
        let coord = unproject(ellps, zone, coord);
        if coord.is_nan() {
            operands.set_coord(i, &Coor2D::nan());
            continue;
        }
        operands.set_coord(i, &coord);
        successes += 1;
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 4] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Flag { key: "south" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },
    OpParameter::Natural { key: "zone", default: None },
];

pub fn new(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    let mut op = Op::plain(parameters, InnerOp(fwd), Some(InnerOp(inv)), &GAMUT, ctx)?;

    // The UTM zone should be an integer between 1 and 60
    let zone = op.params.natural("zone")?;
    if !(1..61).contains(&zone) {
        error!("UTM: {zone}. Must be an integer in the interval 1..60");
        return Err(Error::BadParam("zone".to_string(), zone.to_string()));
    }

    // The false northing is 0 m, or 10_000_000 m if using the southern aspect
    if op.params.boolean("south") {
        op.params.y[0] = 10_000_000.0;
    }
    Ok(op)
}

// ----- T E S T S ---------------------------------------------------------------------
