//! From grid references, through UTM or UPS, to geographical coordinates.
//!
//! Grid references lacking the grid zone designation, and possibly also
//! the grid square letters, are resolved by trying all candidates in the
//! vicinity of a reference location, and selecting the one closest to it.
use super::parse::ParsedUsng;
use super::tables::*;
use super::*;
use crate::inner_op::utm;

impl<C: Context> Usng<C> {
    /// Decode `usng` into the south west corner of the grid cell it identifies.
    ///
    /// Truncated references need a `reference` location (longitude/latitude
    /// in radians) in the vicinity. With `strict`, the decoded point must
    /// fall inside the zone and band given (or found).
    pub fn to_lonlat(
        &self,
        usng: &str,
        reference: Option<Coor2D>,
        strict: bool,
    ) -> Result<Location, Error> {
        let grid = self.to_grid(usng, reference, strict)?;
        let lonlat = self.unproject(&grid)?;
        Ok(Location {
            lonlat,
            precision: grid.precision(),
            usng: self.from_grid(&grid)?,
        })
    }

    /// Decode `usng` into UTM or UPS coordinates. See [`Usng::to_lonlat`]
    pub fn to_grid(
        &self,
        usng: &str,
        reference: Option<Coor2D>,
        strict: bool,
    ) -> Result<GridPoint, Error> {
        let parsed = ParsedUsng::new(usng)?;

        // Fully specified
        if let (Some(grid_zone), Some(square)) = (parsed.grid_zone(), parsed.square) {
            return self.resolve(grid_zone, square, &parsed, strict);
        }

        let Some(reference) = reference else {
            return Err(Error::InsufficientInformation(usng.to_string()));
        };
        let latitude = reference.latitude();
        if !(-90. ..=90.).contains(&latitude) || reference[0].is_nan() {
            return Err(Error::OutOfRange(latitude, "-90..90".to_string()));
        }

        // Try all candidates, and keep the first one found among the closest
        let mut best: Option<(f64, GridZone, [char; 2])> = None;
        for (grid_zone, square) in candidates(&parsed, &reference) {
            let trial = self
                .resolve(grid_zone, square, &parsed, false)
                .and_then(|point| self.unproject(&point));
            let lonlat = match trial {
                Ok(lonlat) => lonlat,
                Err(e) => {
                    trace!("{usng}: discarding {grid_zone:?} {square:?}: {e}");
                    continue;
                }
            };
            let d = distance(&reference, &lonlat);
            if best.map_or(true, |(shortest, _, _)| d < shortest) {
                best = Some((d, grid_zone, square));
            }
        }

        let Some((d, grid_zone, square)) = best else {
            return Err(Error::NoMatch(usng.to_string()));
        };
        let km = d * self.ellps.semimajor_axis() / 1000.;
        debug!("{usng}: resolved as {grid_zone:?} {square:?}, {km:.1} km from the reference");
        self.resolve(grid_zone, square, &parsed, strict)
    }

    // A grid point from the grid zone, the grid square and the parsed digits
    fn resolve(
        &self,
        grid_zone: GridZone,
        square: [char; 2],
        parsed: &ParsedUsng,
        strict: bool,
    ) -> Result<GridPoint, Error> {
        match grid_zone {
            GridZone::Utm { zone, band } => {
                let p = self.utm_point(zone, band, square, parsed, strict)?;
                Ok(GridPoint::Utm(p))
            }
            polar => {
                let p = self.ups_point(polar.letter(), square, parsed)?;
                Ok(GridPoint::Ups(p))
            }
        }
    }

    fn utm_point(
        &self,
        zone: usize,
        band: char,
        square: [char; 2],
        parsed: &ParsedUsng,
        strict: bool,
    ) -> Result<UtmPoint, Error> {
        let [e, n] = square;
        let invalid = || {
            Error::InvalidGridDesignator(format!("{zone}{band} {e}{n}"), zone.to_string())
        };
        let band_index = band_index(band).ok_or_else(invalid)?;
        let (ew, ns) = letter_sets(zone);
        let column = ew.iter().position(|&c| c == e).ok_or_else(invalid)?;
        let row = ns.iter().position(|&c| c == n).ok_or_else(invalid)?;

        let easting = (column + 1) as f64 * 100_000. + parsed.easting;
        let mut northing = row as f64 * 100_000. + parsed.northing;

        // The northing is given modulo 2000 km. Move it to the first cycle
        // north of the southern limit of the band...
        let southern_limit = BAND_NORTHINGS[band_index];
        northing += 2_000_000. * ((southern_limit - northing) / 2_000_000.).ceil();
        let mut lonlat = utm::unproject(&self.ellps, zone, Coor2D::raw(easting, northing));

        // ...but the band limits are approximate, so give the previous cycle
        // a chance if we ended up in the wrong band
        if band_index_of(lonlat.latitude()) != Some(band_index) {
            northing -= 2_000_000.;
            lonlat = utm::unproject(&self.ellps, zone, Coor2D::raw(easting, northing));
        }

        let latitude = lonlat.latitude();
        let computed_zone = zone_of(lonlat.longitude());
        let computed_band = band_index_of(latitude);
        let mismatch = |calculated: String| Error::ZoneMismatch {
            supplied: format!("{zone}{band}"),
            calculated,
        };

        if strict {
            if !(-80. ..=84.).contains(&latitude) {
                return Err(Error::OutOfRange(latitude, "-80..84".to_string()));
            }
            if computed_zone != zone {
                return Err(mismatch(format!("zone {computed_zone}")));
            }
            if computed_band != Some(band_index) {
                let calculated = computed_band.map_or('?', |i| BANDS[i]);
                return Err(mismatch(format!("band {calculated}")));
            }
        } else {
            if !(-79.5..=84.5).contains(&latitude) {
                return Err(Error::OutOfRange(latitude, "-79.5..84.5".to_string()));
            }
            if !(100_000. ..=900_000.).contains(&easting) {
                return Err(mismatch(format!("easting {easting}")));
            }
            // Zones and bands are circular
            let dz = computed_zone.abs_diff(zone);
            if dz > 2 && dz < 58 {
                return Err(mismatch(format!("zone {computed_zone}")));
            }
            let Some(computed_band) = computed_band else {
                return Err(mismatch("no band".to_string()));
            };
            let db = computed_band.abs_diff(band_index);
            if db > 1 && db < 19 {
                return Err(mismatch(format!("band {}", BANDS[computed_band])));
            }
        }

        Ok(UtmPoint {
            zone,
            band,
            easting,
            northing,
            precision: parsed.precision,
        })
    }

    fn ups_point(
        &self,
        grid_zone: char,
        square: [char; 2],
        parsed: &ParsedUsng,
    ) -> Result<UpsPoint, Error> {
        let [e, n] = square;
        let invalid = || {
            Error::InvalidGridDesignator(format!("{grid_zone} {e}{n}"), grid_zone.to_string())
        };
        let north = matches!(grid_zone, 'Y' | 'Z');
        let west = matches!(grid_zone, 'A' | 'Y');

        let mut column = UPS_X.iter().position(|&c| c == e).ok_or_else(invalid)? as i64;
        if west {
            column -= UPS_X.len() as i64;
        }

        // Row letters above the pole wrap around to negative indices
        let rows: &[char] = if north { &UPS_Y_NORTH } else { &UPS_Y_SOUTH };
        let reach: i64 = if north { 7 } else { 12 };
        if !(-reach..reach).contains(&column) {
            return Err(invalid());
        }
        let mut row = rows.iter().position(|&c| c == n).ok_or_else(invalid)? as i64;
        if row >= reach {
            row -= rows.len() as i64;
        }

        let x = 2_000_000. + column as f64 * 100_000. + parsed.easting;
        let y = 2_000_000. + row as f64 * 100_000. + parsed.northing;
        let latitude = self.polar(north, Inv, Coor2D::raw(x, y))?.latitude();
        if north && latitude < 84. {
            return Err(Error::OutOfRange(latitude, "84..90".to_string()));
        }
        if !north && latitude > -80. {
            return Err(Error::OutOfRange(latitude, "-90..-80".to_string()));
        }

        Ok(UpsPoint {
            grid_zone,
            x,
            y,
            precision: parsed.precision,
        })
    }
}

// ----- C A N D I D A T E S -------------------------------------------------------

// The grid zones and grid squares to try for a truncated grid reference.
// Whatever is given in the reference restricts the search.
fn candidates(parsed: &ParsedUsng, reference: &Coor2D) -> Vec<(GridZone, [char; 2])> {
    let latitude = reference.latitude();
    let longitude = angular::normalize_longitude_degrees(reference.longitude());
    let north = latitude > 0.;
    let reference_zone = zone_of(longitude) as i64;
    let reference_band = ((latitude + 80.) / 8.).floor() as i64;

    let polar_given = matches!(parsed.band, Some('A' | 'B' | 'Y' | 'Z'));
    let utm_given = parsed.band.map_or(false, |b| band_index(b).is_some());

    let zones: Vec<usize> = match parsed.zone {
        Some(zone) => vec![zone],
        None => (-1..=1).map(|dz| wrap_zone(reference_zone + dz)).collect(),
    };

    let mut candidates = Vec::new();

    // The UTM part of the grid
    if !polar_given {
        let bands: Vec<char> = match (parsed.band, parsed.square) {
            (Some(band), _) => vec![band],
            (None, Some(_)) => BANDS.to_vec(),
            (None, None) => (-1..=1)
                .map(|db| reference_band + db)
                .filter(|b| (0..20).contains(b))
                .map(|b| BANDS[b as usize])
                .collect(),
        };
        for &zone in &zones {
            let (ew, ns) = letter_sets(zone);
            for &band in &bands {
                let grid_zone = GridZone::Utm { zone, band };
                if let Some(square) = parsed.square {
                    candidates.push((grid_zone, square));
                    continue;
                }
                for &n in ns {
                    for &e in ew {
                        candidates.push((grid_zone, [e, n]));
                    }
                }
            }
        }
    }

    // The polar area of the hemisphere of the reference
    if !utm_given {
        let letters = match parsed.band {
            Some(letter) => vec![letter],
            None if north => vec!['Y', 'Z'],
            None => vec!['A', 'B'],
        };
        for letter in letters {
            let east = matches!(letter, 'B' | 'Z');
            let (grid_zone, rows) = match letter {
                'A' | 'B' => (GridZone::PolarSouth { east }, &UPS_Y_SOUTH[..]),
                _ => (GridZone::PolarNorth { east }, &UPS_Y_NORTH[..]),
            };
            if let Some(square) = parsed.square {
                candidates.push((grid_zone, square));
                continue;
            }
            for &n in rows {
                for &e in &UPS_X {
                    candidates.push((grid_zone, [e, n]));
                }
            }
        }
    }
    candidates
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete() -> Result<(), Error> {
        let usng = Usng::new()?;

        let GridPoint::Utm(p) = usng.to_grid("15t vk 1234 5678", None, true)? else {
            panic!("Expected a UTM point");
        };
        assert_eq!((p.zone, p.band, p.precision), (15, 'T', 4));
        assert_eq!((p.easting, p.northing), (412_340., 4_956_780.));

        let location = usng.to_lonlat("15t vk 1234 5678", None, false)?;
        assert_float_eq!(location.latitude(), 44.759_040_19, abs <= 1e-7);
        assert_float_eq!(location.longitude(), -94.107_587_46, abs <= 1e-7);
        assert_eq!(location.usng, "15T VK 1234 5678");

        // Southern hemisphere northings are negative
        let GridPoint::Utm(p) = usng.to_grid("37D EC 3816 3381", None, true)? else {
            panic!("Expected a UTM point");
        };
        assert!(p.northing < -7_000_000.);
        Ok(())
    }

    #[test]
    fn polar() -> Result<(), Error> {
        let usng = Usng::new()?;

        let location = usng.to_lonlat("B AN", None, false)?;
        assert_float_eq!(location.latitude(), -90., abs <= 1e-9);
        assert_eq!(location.usng, "B AN");

        let location = usng.to_lonlat("Y ZP 12345 12345", None, true)?;
        let GridPoint::Ups(p) = usng.to_grid("Y ZP 12345 12345", None, true)? else {
            panic!("Expected a UPS point");
        };
        assert_eq!((p.x, p.y), (1_912_345., 2_612_345.));
        assert_float_eq!(location.latitude(), 84.432_547_85, abs <= 1e-7);
        assert_float_eq!(location.longitude(), -171.853_654_93, abs <= 1e-7);

        // A column too far from the pole
        assert!(matches!(
            usng.to_grid("Z SN", None, false),
            Err(Error::InvalidGridDesignator(_, _))
        ));

        // A square equatorward of 84N
        assert!(matches!(
            usng.to_grid("Z GB 2140 0000", None, false),
            Err(Error::OutOfRange(_, _))
        ));
        Ok(())
    }

    #[test]
    fn validation() -> Result<(), Error> {
        let usng = Usng::new()?;

        // Letters not belonging to the zone
        assert!(matches!(
            usng.to_grid("15T AK 1234 5678", None, false),
            Err(Error::InvalidGridDesignator(_, _))
        ));
        assert!(matches!(
            usng.to_grid("A VK 0 0", None, false),
            Err(Error::InvalidGridDesignator(_, _))
        ));

        // A 15T grid square claimed for the neighbouring band: Accepted
        // when lenient, rejected when strict
        assert!(usng.to_grid("15U VK 1234 5678", None, false).is_ok());
        assert!(matches!(
            usng.to_grid("15U VK 1234 5678", None, true),
            Err(Error::ZoneMismatch { .. })
        ));

        // Truncated references need a reference location
        for truncated in ["vk 1234 5678", "1234 5678", "15T 1234 5678", "Z 12 34"] {
            assert!(matches!(
                usng.to_grid(truncated, None, false),
                Err(Error::InsufficientInformation(_))
            ));
        }
        Ok(())
    }

    #[test]
    fn search() -> Result<(), Error> {
        let usng = Usng::new()?;
        let reference = Some(Coor2D::geo(44., -93.));

        let location = usng.to_lonlat("vk 1234 5678", reference, false)?;
        assert_eq!(location.usng, "15T VK 1234 5678");

        let location = usng.to_lonlat("1234 5678", reference, false)?;
        assert_eq!(location.usng, "15T WJ 1234 5678");
        assert_float_eq!(location.latitude(), 43.864_006_81, abs <= 1e-7);

        // Given a zone and band, the search is restricted to them
        let location = usng.to_lonlat("15T 1234 5678", reference, false)?;
        assert_eq!(location.usng, "15T WJ 1234 5678");
        let location = usng.to_lonlat("14T 1234 5678", reference, false)?;
        assert!(location.usng.starts_with("14T"));

        // Precision 0
        let location = usng.to_lonlat("vk", reference, false)?;
        assert_eq!(location.precision, 0);
        assert_eq!(location.usng, "15T VK");

        // Across the antimeridian
        let reference = Some(Coor2D::geo(-17., 179.9));
        let location = usng.to_lonlat("AB 12 34", reference, false)?;
        assert!(location.usng.starts_with("1K "));

        // Grid squares in neither the UTM zones nor the polar areas nearby
        let reference = Some(Coor2D::geo(44., -93.));
        assert!(matches!(
            usng.to_grid("IO 1234 5678", reference, false),
            Err(Error::NoMatch(_))
        ));
        assert!(matches!(
            usng.to_grid("vk 1234", Some(Coor2D::geo(91., 0.)), false),
            Err(Error::OutOfRange(_, _))
        ));
        Ok(())
    }

    #[test]
    fn candidate_lists() -> Result<(), Error> {
        let reference = Coor2D::geo(44., -93.);

        // Three zones times twenty bands, plus the two northern polar halves
        let parsed = ParsedUsng::new("vk 1234 5678")?;
        assert_eq!(candidates(&parsed, &reference).len(), 3 * 20 + 2);

        // Three zones times three bands times 160 squares, plus the
        // northern polar grid
        let parsed = ParsedUsng::new("1234 5678")?;
        assert_eq!(candidates(&parsed, &reference).len(), 3 * 3 * 160 + 2 * 18 * 14);

        let parsed = ParsedUsng::new("15T 1234 5678")?;
        assert_eq!(candidates(&parsed, &reference).len(), 160);

        let parsed = ParsedUsng::new("Y 1234 5678")?;
        assert_eq!(candidates(&parsed, &reference).len(), 18 * 14);

        // The southernmost band has no southern neighbour
        let parsed = ParsedUsng::new("1234 5678")?;
        let reference = Coor2D::geo(-79., 10.);
        assert_eq!(candidates(&parsed, &reference).len(), 3 * 2 * 160 + 2 * 18 * 24);
        Ok(())
    }
}
