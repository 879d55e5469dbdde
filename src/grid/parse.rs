//! Tokenizing grid references: `15T VK 1234 5678`, and its truncated forms
//! `VK 1234 5678`, `1234 5678`, `15T VK`, `VK`, plus the polar `Z GB 2140 9778`
use super::tables::{band_index, BANDS};
use super::GridZone;
use crate::Error;

/// The largest number of digits per coordinate we handle, i.e. 10 μm resolution
pub(crate) const MAX_PRECISION: usize = 11;

/// The components of a grid reference, as far as they are given
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ParsedUsng {
    /// The UTM zone number
    pub zone: Option<usize>,
    /// The latitude band, or polar area, letter
    pub band: Option<char>,
    /// The 100 km grid square letters
    pub square: Option<[char; 2]>,
    /// Easting offset within the grid square, in meters
    pub easting: f64,
    /// Northing offset within the grid square, in meters
    pub northing: f64,
    /// Number of digits per coordinate
    pub precision: usize,
}

impl ParsedUsng {
    /// Peel the tokens off the end of `usng`: First the digits, then the grid
    /// square letters, and finally the zone and band
    pub(crate) fn new(usng: &str) -> Result<ParsedUsng, Error> {
        let malformed = |reason| Error::MalformedUsng(usng.to_string(), reason);

        let text: String = usng
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if text.is_empty() {
            return Err(malformed("empty grid reference"));
        }
        if !text.is_ascii() {
            return Err(malformed("unexpected characters"));
        }
        let mut parsed = ParsedUsng::default();

        // The coordinate digits, if any
        let letters = text.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &text[letters.len()..];
        if digits.len() % 2 != 0 {
            return Err(malformed("odd number of digits"));
        }
        parsed.precision = digits.len() / 2;
        if parsed.precision > MAX_PRECISION {
            return Err(malformed("too many digits"));
        }
        if parsed.precision > 0 {
            let (easting, northing) = digits.split_at(parsed.precision);
            // Cannot fail: At most 11 ASCII digits each
            let easting = easting.parse::<u64>().map_err(|_| malformed("bad digits"))? as f64;
            let northing = northing.parse::<u64>().map_err(|_| malformed("bad digits"))? as f64;
            (parsed.easting, parsed.northing) = (
                to_meters(easting, parsed.precision),
                to_meters(northing, parsed.precision),
            );
        }

        // The 100 km grid square, if any
        let mut rest = letters;
        let tail: Vec<char> = rest.chars().rev().take(2).collect();
        if tail.len() == 2 && tail.iter().all(char::is_ascii_uppercase) {
            parsed.square = Some([tail[1], tail[0]]);
            rest = &rest[..rest.len() - 2];
        }

        // Zone number and band letter, or just the band letter of a polar area
        if rest.is_empty() {
            return Ok(parsed);
        }
        let band_part = rest.trim_start_matches(|c: char| c.is_ascii_digit());
        let zone_part = &rest[..rest.len() - band_part.len()];
        let mut band_chars = band_part.chars();
        let (Some(band), None) = (band_chars.next(), band_chars.next()) else {
            return Err(malformed("unrecognized zone designation"));
        };

        let polar = matches!(band, 'A' | 'B' | 'Y' | 'Z');
        if !polar && band_index(band).is_none() {
            return Err(malformed("unknown latitude band"));
        }
        parsed.band = Some(band);

        if zone_part.is_empty() {
            return Ok(parsed);
        }
        if polar {
            return Err(malformed("zone number given for a polar area"));
        }
        let zone = zone_part
            .parse::<usize>()
            .map_err(|_| malformed("bad zone number"))?;
        if !(1..=60).contains(&zone) {
            return Err(malformed("zone number outside 1..60"));
        }
        parsed.zone = Some(zone);
        Ok(parsed)
    }

    /// The grid zone, if fully determined by the reference
    pub(crate) fn grid_zone(&self) -> Option<GridZone> {
        let band = self.band?;
        match (band, self.zone) {
            ('A', _) => Some(GridZone::PolarSouth { east: false }),
            ('B', _) => Some(GridZone::PolarSouth { east: true }),
            ('Y', _) => Some(GridZone::PolarNorth { east: false }),
            ('Z', _) => Some(GridZone::PolarNorth { east: true }),
            (band, Some(zone)) if BANDS.contains(&band) => Some(GridZone::Utm { zone, band }),
            _ => None,
        }
    }
}

// Digits to meters. Dividing by an exact power of ten keeps the sub-meter
// values as close as possible to their decimal representation
fn to_meters(digits: f64, precision: usize) -> f64 {
    if precision <= 5 {
        return digits * 10_f64.powi(5 - precision as i32);
    }
    digits / 10_f64.powi(precision as i32 - 5)
}

// ----- T E S T S ------------------------------------------------------------------
