//! Polar Stereographic, and its special case, the Universal Polar
//! Stereographic (UPS). Only the polar aspects are supported.
//! Following USGS Professional Paper 1395 (Snyder, 1987), eqs. (21-33)
//! through (21-40), and the PROJ implementation of `stere`.
use crate::authoring::*;
use std::f64::consts::FRAC_PI_2;

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let e = op.params.ellps(0).eccentricity();
    let lon_0 = op.params.lon(0);
    let x_0 = op.params.x(0);
    let y_0 = op.params.y(0);
    let south = op.params.lat(0) < 0.;
    let Ok(akm) = op.params.real("akm") else {
        warn!("stere: missing precomputed scaling!");
        return 0;
    };

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let mut coord = operands.get_coord(i);
        let lam = coord[0] - lon_0;
        // The southern aspect is the mirror image of the northern
        let phi = if south { -coord[1] } else { coord[1] };

        // The opposite pole cannot be represented
        if phi.is_nan() || phi <= -FRAC_PI_2 {
            operands.set_coord(i, &Coor2D::nan());
            continue;
        }

        let rho = akm * ts(phi.sin_cos(), e);
        let (s, c) = lam.sin_cos();
        coord[0] = x_0 + rho * s;
        coord[1] = if south { y_0 + rho * c } else { y_0 - rho * c };
        operands.set_coord(i, &coord);
        successes += 1;
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let e = op.params.ellps(0).eccentricity();
    let lon_0 = op.params.lon(0);
    let x_0 = op.params.x(0);
    let y_0 = op.params.y(0);
    let south = op.params.lat(0) < 0.;
    let Ok(akm) = op.params.real("akm") else {
        warn!("stere: missing precomputed scaling!");
        return 0;
    };

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let mut coord = operands.get_coord(i);
        let x = coord[0] - x_0;
        let y = coord[1] - y_0;
        if x.is_nan() || y.is_nan() {
            operands.set_coord(i, &Coor2D::nan());
            continue;
        }
        let rho = x.hypot(y);

        // On the pole, the longitude is undetermined, so we take the central meridian
        let lam = match (rho == 0., south) {
            (true, _) => 0.,
            (false, true) => x.atan2(y),
            (false, false) => x.atan2(-y),
        };
        let phi = pj_phi2(rho / akm, e);

        coord[0] = angular::normalize_symmetric(lam + lon_0);
        coord[1] = if south { -phi } else { phi };
        operands.set_coord(i, &coord);
        successes += 1;
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 7] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },

    OpParameter::Real { key: "lat_0", default: None },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },

    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
];

pub fn new(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    let mut op = Op::plain(parameters, InnerOp(fwd), Some(InnerOp(inv)), &GAMUT, ctx)?;

    let lat_0 = op.params.real("lat_0")?;
    if lat_0.abs() != 90. {
        error!("stere: lat_0={lat_0}. Only the polar aspects (lat_0=90 or lat_0=-90) are supported");
        return Err(Error::BadParam("lat_0".to_string(), lat_0.to_string()));
    }

    precompute(&mut op);
    Ok(op)
}

// ----- C O N S T R U C T O R,   U P S ------------------------------------------------

#[rustfmt::skip]
pub const UPS_GAMUT: [OpParameter; 3] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Flag { key: "south" },
    OpParameter::Text { key: "ellps", default: Some("WGS84") },
];

pub fn ups(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    let mut op = Op::plain(parameters, InnerOp(fwd), Some(InnerOp(inv)), &UPS_GAMUT, ctx)?;

    // UPS is defined on WGS84, so we do not want the context default here
    if !op.params.given.contains_key("ellps") {
        op.params.ellps[0] = Ellipsoid::named("WGS84")?;
    }

    // The origin is on one of the poles
    op.params.lat[0] = if op.params.boolean("south") {
        -FRAC_PI_2
    } else {
        FRAC_PI_2
    };

    // The scaling factor is 0.994 by definition of UPS
    op.params.k[0] = 0.994;

    // The false easting and northing are both 2000 km by definition of UPS
    op.params.x[0] = 2_000_000.;
    op.params.y[0] = 2_000_000.;

    precompute(&mut op);
    Ok(op)
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

// The scaled radius, i.e. the distance from the pole equivalent to ts = 1,
// USGS PP 1395, eq. (21-33)
fn precompute(op: &mut Op) {
    let ellps = op.params.ellps(0);
    let a = ellps.semimajor_axis();
    let e = ellps.eccentricity();
    let k_0 = op.params.k(0);
    let akm = 2. * a * k_0 / ((1. + e).powf(1. + e) * (1. - e).powf(1. - e)).sqrt();
    op.params.real.insert("akm", akm);
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ups() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let north = ctx.op("ups")?;
        let south = ctx.op("ups south")?;

        #[rustfmt::skip]
        let geo = [
            Coor2D::geo( 88.,  40.),
            Coor2D::geo( 84.1, -40.),
        ];

        #[rustfmt::skip]
        let projected = [
            Coor2D::raw(2_142_743.374_559_593, 1_829_885.070_549_584),
            Coor2D::raw(1_578_590.663_792_025, 1_497_783.909_621_404),
        ];

        let mut operands = geo;
        assert_eq!(ctx.apply(north, Fwd, &mut operands)?, 2);
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, projected[i].0, abs_all <= 1e-6);
        }
        assert_eq!(ctx.apply(north, Inv, &mut operands)?, 2);
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, geo[i].0, abs_all <= 1e-12);
        }

        // The southern aspect mirrors the northing around the pole
        #[rustfmt::skip]
        let geo = [
            Coor2D::geo(-88.,   40.),
            Coor2D::geo(-80.1, -40.),
        ];

        #[rustfmt::skip]
        let projected = [
            Coor2D::raw(2_142_743.374_559_593, 2_170_114.929_450_416),
            Coor2D::raw(1_291_797.174_384_117, 2_844_003.261_713_1),
        ];

        let mut operands = geo;
        assert_eq!(ctx.apply(south, Fwd, &mut operands)?, 2);
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, projected[i].0, abs_all <= 1e-6);
        }
        assert_eq!(ctx.apply(south, Inv, &mut operands)?, 2);
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, geo[i].0, abs_all <= 1e-12);
        }
        Ok(())
    }

    #[test]
    fn poles() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let north = ctx.op("ups")?;
        let south = ctx.op("ups south")?;

        // The pole is the false origin
        let mut operands = [Coor2D::geo(90., 0.)];
        ctx.apply(north, Fwd, &mut operands)?;
        assert_float_eq!(operands[0].0, [2e6, 2e6], abs_all <= 1e-6);

        // ...and back again, with the longitude set to the central meridian
        let mut operands = [Coor2D::raw(2e6, 2e6)];
        ctx.apply(south, Inv, &mut operands)?;
        assert_float_eq!(operands[0].0, Coor2D::geo(-90., 0.).0, abs_all <= 1e-15);

        // The opposite pole is out of reach
        let mut operands = [Coor2D::raw(0., -FRAC_PI_2)];
        assert_eq!(ctx.apply(north, Fwd, &mut operands)?, 0);
        assert!(operands[0].is_nan());
        Ok(())
    }

    #[test]
    fn stere() -> Result<(), Error> {
        let mut ctx = Minimal::default();

        // The general polar stereographic, set up as UPS, gives UPS results
        let stere = ctx.op("stere lat_0=-90 k_0=0.994 x_0=2000000 y_0=2000000 ellps=WGS84")?;
        let ups = ctx.op("ups south")?;
        let geo = [Coor2D::geo(-85., 123.), Coor2D::geo(-81., -17.)];

        let mut a = geo;
        let mut b = geo;
        ctx.apply(stere, Fwd, &mut a)?;
        ctx.apply(ups, Fwd, &mut b)?;
        for i in 0..a.len() {
            assert_float_eq!(a[i].0, b[i].0, abs_all <= 1e-9);
        }

        // A rotated central meridian on a unit scale projection
        let stere = ctx.op("stere lat_0=90 lon_0=-45")?;
        let mut operands = [Coor2D::geo(80., -45.)];
        ctx.apply(stere, Fwd, &mut operands)?;
        assert_float_eq!(operands[0][0], 0., abs <= 1e-9);
        assert!(operands[0][1] < 0.);
        ctx.apply(stere, Inv, &mut operands)?;
        assert_float_eq!(operands[0].0, Coor2D::geo(80., -45.).0, abs_all <= 1e-12);

        // Only the polar aspects are supported
        assert!(matches!(
            ctx.op("stere lat_0=45"),
            Err(Error::BadParam(_, _))
        ));
        assert!(matches!(ctx.op("stere"), Err(Error::MissingParam(_))));
        Ok(())
    }
}
