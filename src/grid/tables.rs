//! Letter tables for the 100 km grid squares, and the latitude bands
use once_cell::sync::Lazy;

// ----- U T M ---------------------------------------------------------------------

/// Northing letters for the odd numbered zones: 0..20 × 100 km, cycling every 2000 km
#[rustfmt::skip]
pub(crate) const NS_ODD: [char; 20] = [
    'A','B','C','D','E','F','G','H','J','K','L','M','N','P','Q','R','S','T','U','V'
];

/// Northing letters for the even numbered zones, offset by 500 km
#[rustfmt::skip]
pub(crate) const NS_EVEN: [char; 20] = [
    'F','G','H','J','K','L','M','N','P','Q','R','S','T','U','V','A','B','C','D','E'
];

/// Easting letters: 1..9 × 100 km, in three sets cycling over the zones
#[rustfmt::skip]
pub(crate) const EW_SETS: [[char; 8]; 3] = [
    ['A','B','C','D','E','F','G','H'],  // zones 1, 4, 7...
    ['J','K','L','M','N','P','Q','R'],  // zones 2, 5, 8...
    ['S','T','U','V','W','X','Y','Z'],  // zones 3, 6, 9...
];

/// The UTM latitude bands, 8 degrees each, from 80S. Band X extends to 84N.
#[rustfmt::skip]
pub(crate) const BANDS: [char; 20] = [
    'C','D','E','F','G','H','J','K','L','M','N','P','Q','R','S','T','U','V','W','X'
];

/// The southern limit of each band, in degrees
#[rustfmt::skip]
const BAND_LATITUDES: [f64; 20] = [
    -80., -72., -64., -56., -48., -40., -32., -24., -16., -8.,
      0.,   8.,  16.,  24.,  32.,  40.,  48.,  56.,  64., 72.
];

/// Approximate northing of the southern limit of each band, i.e. the
/// meridian arc of a sphere of radius 6356752.3 m. Only used for resolving
/// northings, which the grid references give modulo 2000 km.
pub(crate) static BAND_NORTHINGS: Lazy<[f64; 20]> =
    Lazy::new(|| BAND_LATITUDES.map(|latitude| 110_946.259 * latitude));

/// The easting and northing letter sets for `zone`
pub(crate) fn letter_sets(zone: usize) -> (&'static [char; 8], &'static [char; 20]) {
    let ew = &EW_SETS[(zone + 2) % 3];
    let ns = if zone % 2 == 1 { &NS_ODD } else { &NS_EVEN };
    (ew, ns)
}

/// Index of `band` in `BANDS`
pub(crate) fn band_index(band: char) -> Option<usize> {
    BANDS.iter().position(|&b| b == band)
}

/// The band index for `latitude` (degrees), if it is within the UTM part of the grid.
/// Latitudes from 80N to 84N belong to band X.
pub(crate) fn band_index_of(latitude: f64) -> Option<usize> {
    let index = ((latitude + 80.) / 8.).floor();
    if !(0. ..=20.).contains(&index) {
        return None;
    }
    Some((index as usize).min(19))
}

/// The UTM zone for `longitude` (degrees, normalized to (-180, 180])
pub(crate) fn zone_of(longitude: f64) -> usize {
    let zone = ((longitude + 180.) / 6.).floor() as i64 + 1;
    zone.clamp(1, 60) as usize
}

/// Wrap a zone number, possibly one step outside of the range 1..=60, into the range
pub(crate) fn wrap_zone(zone: i64) -> usize {
    ((zone - 1).rem_euclid(60) + 1) as usize
}

// ----- U P S ---------------------------------------------------------------------

/// Column letters of the polar grids. Indices 0..18 count eastward from
/// the 180/0 meridian on the western (A, Y) side
#[rustfmt::skip]
pub(crate) const UPS_X: [char; 18] = [
    'A','B','C','F','G','H','J','K','L','P','Q','R','S','T','U','X','Y','Z'
];

/// Row letters of the north polar grid
#[rustfmt::skip]
pub(crate) const UPS_Y_NORTH: [char; 14] = [
    'H','J','K','L','M','N','P','A','B','C','D','E','F','G'
];

/// Row letters of the south polar grid
#[rustfmt::skip]
pub(crate) const UPS_Y_SOUTH: [char; 24] = [
    'N','P','Q','R','S','T','U','V','W','X','Y','Z',
    'A','B','C','D','E','F','G','H','J','K','L','M'
];

// ----- T E S T S ------------------------------------------------------------------
