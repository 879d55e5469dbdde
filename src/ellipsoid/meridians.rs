use super::*;
use crate::math::horner;
use crate::Direction;

// ----- Meridian geometry -----------------------------------------------------
impl Ellipsoid {
    /// The normalized rectifying factor, i.e. the length of one radian of the
    /// meridian, in units of the semimajor axis, truncated after the e⁶ term.
    ///
    /// USGS Professional Paper 1395 (Snyder, 1987), eq. (3-21)
    #[must_use]
    pub fn meridian_arc_factor(&self) -> f64 {
        let es = self.eccentricity_squared();
        horner(es, &[1., -1. / 4., -3. / 64., -5. / 256.])
    }

    /// The meridional distance, *M*, from the equator to the latitude given
    /// (Fwd), or the footpoint latitude corresponding to a given meridional
    /// distance (Inv).
    ///
    /// The forward direction follows eq. (3-21) of USGS Professional Paper
    /// 1395. The inverse direction follows eqs. (3-24) and (3-26), i.e. the
    /// rectifying latitude, 𝜇, followed by a series in
    /// e₁ = (1 - √(1 - e²)) / (1 + √(1 - e²)).
    ///
    /// Both series are truncated, for an accuracy at the millimeter level.
    #[must_use]
    pub fn meridional_distance(&self, latitude_or_distance: f64, direction: Direction) -> f64 {
        let a = self.semimajor_axis();
        let es = self.eccentricity_squared();
        let factor = self.meridian_arc_factor();

        if direction == Direction::Fwd {
            let lat = latitude_or_distance;
            let c2 = -horner(es, &[0., 3. / 8., 3. / 32., 45. / 1024.]);
            let c4 = horner(es, &[0., 0., 15. / 256., 45. / 1024.]);
            let c6 = -horner(es, &[0., 0., 0., 35. / 3072.]);
            return a
                * (factor * lat
                    + c2 * (2. * lat).sin()
                    + c4 * (4. * lat).sin()
                    + c6 * (6. * lat).sin());
        }

        // The rectifying latitude
        let mu = latitude_or_distance / (a * factor);

        let root = (1.0 - es).sqrt();
        let e1 = (1.0 - root) / (1.0 + root);
        let c2 = horner(e1, &[0., 3. / 2., 0., -27. / 32.]);
        let c4 = horner(e1, &[0., 0., 21. / 16., 0., -55. / 32.]);
        let c6 = horner(e1, &[0., 0., 0., 151. / 96.]);
        mu + c2 * (2. * mu).sin() + c4 * (4. * mu).sin() + c6 * (6. * mu).sin()
    }
}
