//! From geographical coordinates, through UTM or UPS, to grid references
use super::parse::MAX_PRECISION;
use super::tables::*;
use super::*;
use crate::inner_op::utm;

impl<C: Context> Usng<C> {
    /// The grid reference of `point` (given as longitude/latitude in radians,
    /// e.g. from `Coor2D::geo`), with `precision` digits per coordinate.
    /// The point is truncated, not rounded, to the resolution requested.
    pub fn from_lonlat(&self, point: Coor2D, precision: usize) -> Result<String, Error> {
        let grid = self.from_lonlat_to_grid(point, precision)?;
        self.from_grid(&grid)
    }

    /// The UTM or UPS coordinates of `point`
    pub fn from_lonlat_to_grid(&self, point: Coor2D, precision: usize) -> Result<GridPoint, Error> {
        check_precision(precision)?;
        let latitude = point.latitude();
        if !(-90. ..=90.).contains(&latitude) {
            return Err(Error::OutOfRange(latitude, "-90..90".to_string()));
        }
        let longitude = angular::normalize_longitude_degrees(point.longitude());
        if longitude.is_nan() {
            return Err(Error::General("Usng: Undefined longitude"));
        }
        let lonlat = Coor2D::gis(longitude, latitude);

        // The polar areas
        if !(latitude > -80. && latitude < 84.) {
            let north = latitude > 0.;
            let xy = self.polar(north, Fwd, lonlat)?;
            let grid_zone = match (north, longitude < 0.) {
                (false, true) => 'A',
                (false, false) => 'B',
                (true, true) => 'Y',
                (true, false) => 'Z',
            };
            return Ok(GridPoint::Ups(UpsPoint {
                grid_zone,
                x: xy[0],
                y: xy[1],
                precision,
            }));
        }

        let zone = zone_of(longitude);
        let band = band_index_of(latitude)
            .map(|i| BANDS[i])
            .ok_or_else(|| Error::OutOfRange(latitude, "-80..84".to_string()))?;
        let en = utm::project(&self.ellps, zone, lonlat);
        Ok(GridPoint::Utm(UtmPoint {
            zone,
            band,
            easting: en[0],
            northing: en[1],
            precision,
        }))
    }

    /// The grid reference of a UTM or UPS point
    pub fn from_grid(&self, point: &GridPoint) -> Result<String, Error> {
        match point {
            GridPoint::Utm(p) => self.from_utm(p),
            GridPoint::Ups(p) => self.from_ups(p),
        }
    }

    /// The grid reference of a UTM point
    pub fn from_utm(&self, point: &UtmPoint) -> Result<String, Error> {
        let zone = point.zone;
        let invalid = || Error::InvalidGridDesignator(format!("{point:?}"), zone.to_string());
        if !(1..=60).contains(&zone) || band_index(point.band).is_none() {
            return Err(invalid());
        }

        let (ew, ns) = letter_sets(zone);
        let column = (point.easting / 100_000.).floor() as i64 - 1;
        // Tiny negative northings fold to exactly 2000 km
        let row = (point.northing.rem_euclid(2_000_000.) / 100_000.).floor() as i64 % 20;
        let (Some(e), Some(n)) = (get(ew, column), get(ns, row)) else {
            return Err(invalid());
        };

        let prefix = format!("{zone}{}", point.band);
        reference(&prefix, [e, n], point.easting, point.northing, point.precision)
    }

    /// The grid reference of a UPS point
    pub fn from_ups(&self, point: &UpsPoint) -> Result<String, Error> {
        let invalid = || {
            Error::InvalidGridDesignator(format!("{point:?}"), point.grid_zone.to_string())
        };
        let north = match point.grid_zone {
            'A' | 'B' => false,
            'Y' | 'Z' => true,
            _ => return Err(invalid()),
        };

        let mut column = ((point.x - 2_000_000.) / 100_000.).floor() as i64;
        let mut row = ((point.y - 2_000_000.) / 100_000.).floor() as i64;
        if column < 0 {
            column += UPS_X.len() as i64;
        }
        let rows: &[char] = if north { &UPS_Y_NORTH } else { &UPS_Y_SOUTH };
        if row < 0 {
            row += rows.len() as i64;
        }
        let (Some(e), Some(n)) = (get(&UPS_X, column), get(rows, row)) else {
            return Err(invalid());
        };

        let prefix = point.grid_zone.to_string();
        reference(&prefix, [e, n], point.x, point.y, point.precision)
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

fn check_precision(precision: usize) -> Result<(), Error> {
    if precision > MAX_PRECISION {
        return Err(Error::MalformedUsng(
            format!("precision {precision}"),
            "at most 11 digits per coordinate",
        ));
    }
    Ok(())
}

// Letter lookup, with a signed index
fn get(letters: &[char], index: i64) -> Option<char> {
    usize::try_from(index)
        .ok()
        .and_then(|i| letters.get(i))
        .copied()
}

/// The digits of the position of `coordinate` within its 100 km square.
/// Up to 5 digits the coordinate is truncated, beyond that, it is rounded
/// to the resolution requested, but never beyond the edge of the square.
pub(crate) fn digits(coordinate: f64, precision: usize) -> String {
    let mut meters = coordinate.rem_euclid(100_000.);
    // Tiny negative coordinates fold to exactly 100 km
    if meters >= 100_000. {
        meters = 0.;
    }
    if precision <= 5 {
        let whole = format!("{:05}", meters.floor() as u32);
        return whole[..precision].to_string();
    }

    let decimals = precision - 5;
    let scale = 10_u64.pow(decimals as u32);
    let total = ((meters * scale as f64).round() as u64).min(100_000 * scale - 1);
    format!("{:05}{:0decimals$}", total / scale, total % scale)
}

// Assemble the grid reference from its parts
fn reference(
    prefix: &str,
    square: [char; 2],
    easting: f64,
    northing: f64,
    precision: usize,
) -> Result<String, Error> {
    check_precision(precision)?;
    if easting.is_nan() || northing.is_nan() {
        return Err(Error::General("Usng: Undefined grid coordinate"));
    }
    let [e, n] = square;
    if precision == 0 {
        return Ok(format!("{prefix} {e}{n}"));
    }
    Ok(format!(
        "{prefix} {e}{n} {} {}",
        digits(easting, precision),
        digits(northing, precision)
    ))
}

// ----- T E S T S ------------------------------------------------------------------
