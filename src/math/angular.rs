use std::f64::consts::PI;

/// normalize arbitrary angles to [-π, π):
pub fn normalize_symmetric(angle: f64) -> f64 {
    let angle = (angle + PI) % (2.0 * PI);
    angle - PI * angle.signum()
}

/// Normalize a longitude, given in degrees, to the half open
/// interval (-180, 180]. This is the convention of the grid zone
/// numbering: 180°W belongs to the easternmost zone 60.
pub fn normalize_longitude_degrees(longitude: f64) -> f64 {
    let mut lon = longitude % 360.;
    if lon <= -180. {
        lon += 360.;
    }
    if lon > 180. {
        lon -= 360.;
    }
    lon
}

// ----- Tests ---------------------------------------------------------------------
