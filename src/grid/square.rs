//! The extent of the grid cell identified by a grid reference
use super::*;
use crate::inner_op::utm;

impl<C: Context> Usng<C> {
    /// The corners and center of the grid cell identified by `usng`.
    /// Only supported for the UTM part of the grid.
    pub fn to_square(&self, usng: &str, reference: Option<Coor2D>) -> Result<Square, Error> {
        let GridPoint::Utm(sw) = self.to_grid(usng, reference, false)? else {
            return Err(Error::Unsupported("grid cells in the polar areas"));
        };

        let size = 10_f64.powi(5 - sw.precision as i32);
        let corner = |de: f64, dn: f64| {
            let en = Coor2D::raw(sw.easting + de, sw.northing + dn);
            utm::unproject(&self.ellps, sw.zone, en)
        };

        Ok(Square {
            precision: label(sw.precision),
            sw: corner(0., 0.),
            nw: corner(0., size),
            ne: corner(size, size),
            se: corner(size, 0.),
            center: corner(size / 2., size / 2.),
        })
    }
}

/// The size of a grid cell, in a human readable form
fn label(precision: usize) -> String {
    match precision {
        0 => "100 km".to_string(),
        1 => "10 km".to_string(),
        2 => "1 km".to_string(),
        3..=5 => format!("{} m", 10_u32.pow(5 - precision as u32)),
        _ => format!("0.{}1 m", "0".repeat(precision - 6)),
    }
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        let labels: Vec<String> = (0..=8).map(label).collect();
        assert_eq!(
            labels,
            ["100 km", "10 km", "1 km", "100 m", "10 m", "1 m", "0.1 m", "0.01 m", "0.001 m"]
        );
    }

    #[test]
    fn squares() -> Result<(), Error> {
        let usng = Usng::new()?;
        let reference = Some(Coor2D::geo(44., -93.));

        // The south west corner of a square is the location of its reference
        let square = usng.to_square("vk", reference)?;
        let location = usng.to_lonlat("vk", reference, false)?;
        assert_eq!(square.precision, "100 km");
        assert_eq!(square.sw, location.lonlat);
        assert_float_eq!(square.sw.latitude(), 44.246_371_06, abs <= 1e-7);

        // The corners are where they should be
        assert!(square.nw.latitude() > square.sw.latitude());
        assert!(square.ne.longitude() > square.nw.longitude());
        assert!(square.se.longitude() > square.sw.longitude());
        assert!(square.center.latitude() > square.se.latitude());
        assert!(square.center.latitude() < square.ne.latitude());

        let square = usng.to_square("15T VK 1234 5678", None)?;
        assert_eq!(square.precision, "10 m");
        assert_eq!(usng.from_lonlat(square.center, 4)?, "15T VK 1234 5678");

        // Not supported in the polar areas
        assert!(matches!(
            usng.to_square("B AN", None),
            Err(Error::Unsupported(_))
        ));
        Ok(())
    }
}
