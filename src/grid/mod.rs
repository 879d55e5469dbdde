//! The US National Grid: Encoding geographical coordinates as grid
//! references, and decoding (possibly truncated) grid references back
//! into geographical coordinates.
//!
//! Between 80S and 84N, the grid is based on UTM: A reference like
//! `15T VK 1234 5678` consists of the UTM zone number (15), the latitude
//! band letter (T), the 100 km grid square letters (VK), and the easting
//! and northing within the grid square, here at a resolution of 10 m.
//!
//! Poleward of the UTM limits, the grid is based on UPS, and the zone
//! number is dropped: `Z BF 4274 2988`. The letters A and B (south), and
//! Y and Z (north) designate the western and eastern halves of the polar
//! areas.
use crate::authoring::*;

mod decode;
mod encode;
mod parse;
mod square;
mod tables;

// ----- G R I D   Z O N E S -------------------------------------------------------

/// The grid zone designation of a grid reference, i.e. the part preceding
/// the grid square letters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridZone {
    /// A UTM zone and latitude band, e.g. 15T
    Utm { zone: usize, band: char },
    /// The south polar area, A (western half) or B (eastern half)
    PolarSouth { east: bool },
    /// The north polar area, Y (western half) or Z (eastern half)
    PolarNorth { east: bool },
}

impl GridZone {
    /// The latitude band, or polar area, letter
    #[must_use]
    pub fn letter(&self) -> char {
        match self {
            GridZone::Utm { band, .. } => *band,
            GridZone::PolarSouth { east: false } => 'A',
            GridZone::PolarSouth { east: true } => 'B',
            GridZone::PolarNorth { east: false } => 'Y',
            GridZone::PolarNorth { east: true } => 'Z',
        }
    }
}

// ----- G R I D   P O I N T S -----------------------------------------------------

/// A point in the UTM part of the grid. The northing is reckoned from
/// the equator, i.e. negative on the southern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmPoint {
    pub zone: usize,
    pub band: char,
    pub easting: f64,
    pub northing: f64,
    /// Number of digits per coordinate in the corresponding grid reference
    pub precision: usize,
}

/// A point in the UPS part of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpsPoint {
    /// One of A, B (south), Y, Z (north)
    pub grid_zone: char,
    pub x: f64,
    pub y: f64,
    /// Number of digits per coordinate in the corresponding grid reference
    pub precision: usize,
}

/// The planar representation of a grid reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridPoint {
    Utm(UtmPoint),
    Ups(UpsPoint),
}

impl GridPoint {
    #[must_use]
    pub fn precision(&self) -> usize {
        match self {
            GridPoint::Utm(p) => p.precision,
            GridPoint::Ups(p) => p.precision,
        }
    }

    /// The grid zone designation of the point. `None` for UPS points
    /// with a letter other than A, B, Y or Z
    #[must_use]
    pub fn grid_zone(&self) -> Option<GridZone> {
        match self {
            GridPoint::Utm(p) => Some(GridZone::Utm {
                zone: p.zone,
                band: p.band,
            }),
            GridPoint::Ups(p) => match p.grid_zone {
                'A' => Some(GridZone::PolarSouth { east: false }),
                'B' => Some(GridZone::PolarSouth { east: true }),
                'Y' => Some(GridZone::PolarNorth { east: false }),
                'Z' => Some(GridZone::PolarNorth { east: true }),
                _ => None,
            },
        }
    }
}

// ----- D E C O D I N G   R E S U L T S -------------------------------------------

/// The south west corner of the grid cell identified by a grid reference
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Longitude and latitude, in radians
    pub lonlat: Coor2D,
    /// Number of digits per coordinate in the grid reference
    pub precision: usize,
    /// The grid reference, in canonical form
    pub usng: String,
}

impl Location {
    /// The latitude, in degrees
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.lonlat.latitude()
    }

    /// The longitude, in degrees
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.lonlat.longitude()
    }
}

/// The corners and center of the grid cell identified by a grid reference.
/// All as longitude and latitude, in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    /// The size of the grid cell, e.g. "1 km" or "10 m"
    pub precision: String,
    pub sw: Coor2D,
    pub nw: Coor2D,
    pub ne: Coor2D,
    pub se: Coor2D,
    pub center: Coor2D,
}

// ----- T H E   G R I D -----------------------------------------------------------

/// Conversion between geographical coordinates and grid references.
///
/// The UTM computations are carried out directly, while the polar
/// stereographic computations for the UPS part of the grid go through
/// operators instantiated in the `Context`.
pub struct Usng<C: Context = Minimal> {
    ctx: C,
    ellps: Ellipsoid,
    north: OpHandle,
    south: OpHandle,
}

/// The north polar UPS projection, by way of the general polar stereographic
const UPS_NORTH: &str = "stere lat_0=90 lon_0=0 k_0=0.994 x_0=2000000 y_0=2000000 ellps=WGS84";
/// ... and its southern counterpart
const UPS_SOUTH: &str = "stere lat_0=-90 lon_0=0 k_0=0.994 x_0=2000000 y_0=2000000 ellps=WGS84";

impl Usng<Minimal> {
    /// A grid converter using the built in `Minimal` context
    pub fn new() -> Result<Usng<Minimal>, Error> {
        Usng::with_context(Minimal::new())
    }
}

impl<C: Context> Usng<C> {
    /// A grid converter using a user supplied projection provider, which
    /// must be able to instantiate the polar aspects of `stere`
    pub fn with_context(mut ctx: C) -> Result<Usng<C>, Error> {
        let north = ctx.op(UPS_NORTH)?;
        let south = ctx.op(UPS_SOUTH)?;
        Ok(Usng {
            ctx,
            // The UTM computations use the semiminor axis given to 0.1 m
            ellps: Ellipsoid::from_axes(6_378_137.0, 6_356_752.3),
            north,
            south,
        })
    }

    /// The projection provider
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// The ellipsoid of the UTM computations
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellps
    }

    // Run a single point through one of the polar projections
    fn polar(&self, north: bool, direction: Direction, point: Coor2D) -> Result<Coor2D, Error> {
        let op = if north { self.north } else { self.south };
        let mut operands = [point];
        if self.ctx.apply(op, direction, &mut operands)? != 1 || operands[0].is_nan() {
            return Err(Error::General("Usng: Polar stereographic projection failed"));
        }
        Ok(operands[0])
    }

    /// The longitude and latitude (radians) of a grid point
    pub fn unproject(&self, point: &GridPoint) -> Result<Coor2D, Error> {
        match point {
            GridPoint::Utm(p) => {
                let en = Coor2D::raw(p.easting, p.northing);
                Ok(crate::inner_op::utm::unproject(&self.ellps, p.zone, en))
            }
            GridPoint::Ups(p) => {
                let north = matches!(p.grid_zone, 'Y' | 'Z');
                self.polar(north, Inv, Coor2D::raw(p.x, p.y))
            }
        }
    }
}

// ----- D I S T A N C E -----------------------------------------------------------

/// The great circle distance, in radians, between two points given as
/// longitude/latitude in radians. The Vincenty formula for the sphere,
/// which is well conditioned at all distances.
#[must_use]
pub fn distance(from: &Coor2D, to: &Coor2D) -> f64 {
    let (sin_1, cos_1) = from[1].sin_cos();
    let (sin_2, cos_2) = to[1].sin_cos();
    let (sin_d, cos_d) = (to[0] - from[0]).sin_cos();

    let y = (cos_2 * sin_d).hypot(cos_1 * sin_2 - sin_1 * cos_2 * cos_d);
    let x = sin_1 * sin_2 + cos_1 * cos_2 * cos_d;
    y.atan2(x)
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn distances() {
        let a = Coor2D::geo(0., 0.);
        assert_float_eq!(distance(&a, &Coor2D::geo(0., 90.)), FRAC_PI_2, abs <= 1e-15);
        assert_float_eq!(distance(&a, &Coor2D::geo(90., 0.)), FRAC_PI_2, abs <= 1e-15);
        assert_float_eq!(distance(&a, &Coor2D::geo(0., 180.)), PI, abs <= 1e-15);
        assert_eq!(distance(&a, &a), 0.);

        // Symmetric, and insensitive to longitude wrapping
        let b = Coor2D::geo(44., -93.);
        let c = Coor2D::geo(44.5, -94.);
        assert_float_eq!(distance(&b, &c), distance(&c, &b), abs <= 1e-15);
        assert_float_eq!(
            distance(&b, &Coor2D::geo(44.5, 266.)),
            distance(&b, &c),
            abs <= 1e-12
        );
    }

    #[test]
    fn grid_zones() {
        assert_eq!(GridZone::Utm { zone: 15, band: 'T' }.letter(), 'T');
        assert_eq!(GridZone::PolarSouth { east: false }.letter(), 'A');
        assert_eq!(GridZone::PolarSouth { east: true }.letter(), 'B');
        assert_eq!(GridZone::PolarNorth { east: false }.letter(), 'Y');
        assert_eq!(GridZone::PolarNorth { east: true }.letter(), 'Z');

        let point = GridPoint::Ups(UpsPoint {
            grid_zone: 'Y',
            x: 1.9e6,
            y: 2.1e6,
            precision: 3,
        });
        assert_eq!(point.grid_zone(), Some(GridZone::PolarNorth { east: false }));
        assert_eq!(point.precision(), 3);

        let unknown = GridPoint::Ups(UpsPoint {
            grid_zone: 'Q',
            x: 1.9e6,
            y: 2.1e6,
            precision: 3,
        });
        assert_eq!(unknown.grid_zone(), None);
    }

    #[test]
    fn unproject() -> Result<(), Error> {
        let usng = Usng::new()?;

        // The poles are at the false origin of the UPS grids
        let pole = GridPoint::Ups(UpsPoint {
            grid_zone: 'Z',
            x: 2e6,
            y: 2e6,
            precision: 0,
        });
        assert_float_eq!(usng.unproject(&pole)?.latitude(), 90., abs <= 1e-12);

        // The central meridian of zone 15 on the equator
        let origin = GridPoint::Utm(UtmPoint {
            zone: 15,
            band: 'N',
            easting: 500_000.,
            northing: 0.,
            precision: 0,
        });
        let lonlat = usng.unproject(&origin)?;
        assert_float_eq!(lonlat.0, Coor2D::geo(0., -93.).0, abs_all <= 1e-12);
        Ok(())
    }
}
