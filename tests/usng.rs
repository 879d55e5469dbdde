use float_eq::assert_float_eq;
use usng::prelude::*;

#[rustfmt::skip]
const FORWARD: [(f64, f64, usize, &str); 17] = [
    ( 44.999995,  -93.0,        4, "15T WK 0000 8294"),
    ( 45.,        267.11,       4, "15T WK 0866 8295"),
    ( 70.,         40.,         4, "37W ET 3816 6618"),
    (-70.,         40.,         4, "37D EC 3816 3381"),
    ( 70.,        -40.,         4, "24W VC 6183 6618"),
    (-70.,        -40.,         4, "24D VH 6183 3381"),
    ( 84.1,        40.,         4, "Z GB 2140 9778"),
    (-80.1,        40.,         4, "B KW 0820 4400"),
    ( 84.1,       -40.,         4, "Y TB 7859 9778"),
    (-80.1,       -40.,         4, "A QW 9179 4400"),
    ( 88.,         40.,         4, "Z BF 4274 2988"),
    (-88.,         40.,         4, "B BP 4274 7011"),
    ( 88.,        -40.,         4, "Y YF 5725 2988"),
    (-88.,        -40.,         4, "A YP 5725 7011"),
    (  0.,          0.,         4, "31N AA 6602 0000"),
    ( 44.876,     -93.12456789, 4, "15T VK 9016 6918"),
    ( 38.894,     -77.043,      5, "18S UJ 22821 06997"),
];

#[test]
fn forward() -> Result<(), Error> {
    let usng = Usng::new()?;
    for (lat, lon, precision, expected) in FORWARD {
        let result = usng.from_lonlat(Coor2D::geo(lat, lon), precision)?;
        assert_eq!(result, expected, "({lat}, {lon})");
    }
    Ok(())
}

#[test]
fn inverse() -> Result<(), Error> {
    let usng = Usng::new()?;
    let minnesota = Some(Coor2D::geo(44., -93.));
    let washington = Some(Coor2D::geo(38.894, -77.043));

    #[rustfmt::skip]
    let cases = [
        ("15t vk 1234 5678", None,       44.759_040_19, -94.107_587_46, 4),
        ("vk 1234 5678",     minnesota,  44.759_040_19, -94.107_587_46, 4),
        ("1234 5678",        minnesota,  43.864_006_81, -92.846_435_31, 4),
        ("vk",               minnesota,  44.246_371_06, -94.252_477_05, 0),
        ("15t vk",           None,       44.246_371_06, -94.252_477_05, 0),
        ("18S UJ 228 070",   None,       38.894_017_44, -77.043_246_84, 3),
        ("UJ 228 070",       washington, 38.894_017_44, -77.043_246_84, 3),
        ("228 070",          washington, 38.894_017_44, -77.043_246_84, 3),
        ("B AN",             None,      -90.,             0.,           0),
        ("Y ZP 12345 12345", None,       84.432_547_85, -171.853_654_93, 5),
    ];

    for (input, reference, lat, lon, precision) in cases {
        let location = usng.to_lonlat(input, reference, false)?;
        assert_float_eq!(location.latitude(), lat, abs <= 1e-7);
        assert_float_eq!(location.longitude(), lon, abs <= 1e-7);
        assert_eq!(location.precision, precision, "{input}");
    }

    assert!(matches!(
        usng.to_lonlat("A VK 0 0", None, false),
        Err(Error::InvalidGridDesignator(_, _))
    ));
    Ok(())
}

#[test]
fn roundtrip() -> Result<(), Error> {
    let usng = Usng::new()?;

    // Decoding gives the south west corner of the grid cell containing the
    // point, so at meter resolution we are within a meter of the point.
    // Lenient, since (0, 0) is on a zone border, and the corner is not
    for (lat, lon, _, _) in FORWARD {
        if !(-80. ..84.).contains(&lat) {
            continue;
        }
        let point = Coor2D::geo(lat, lon);
        let reference = usng.from_lonlat(point, 5)?;
        let location = usng.to_lonlat(&reference, None, false)?;
        assert_eq!(location.precision, 5);
        assert_eq!(location.usng, reference);
        assert_float_eq!(location.latitude(), lat, abs <= 1e-5);
        let wrapped = (lon + 180.).rem_euclid(360.) - 180.;
        assert_float_eq!(location.longitude(), wrapped, abs <= 5e-5);
    }

    // In the polar areas, we just check that we end up where we belong
    for (lat, lon) in [(88., 40.), (84.1, -40.), (-80.1, -40.), (-88., 40.)] {
        let reference = usng.from_lonlat(Coor2D::geo(lat, lon), 4)?;
        let location = usng.to_lonlat(&reference, None, true)?;
        assert_eq!(location.usng, reference);
        assert_float_eq!(location.latitude(), lat, abs <= 1e-3);
        if lat > 0. {
            assert!(location.latitude() >= 84.);
        } else {
            assert!(location.latitude() <= -80.);
        }
    }
    Ok(())
}

#[test]
fn truncation() -> Result<(), Error> {
    let usng = Usng::new()?;
    let reference = Some(Coor2D::geo(44., -93.));
    let full = usng.to_lonlat("15t vk 1234 5678", None, false)?;
    let truncated = usng.to_lonlat("vk 1234 5678", reference, false)?;
    assert_eq!(full, truncated);

    // Whitespace and case do not matter
    let squeezed = usng.to_lonlat("VK12345678", reference, false)?;
    assert_eq!(full, squeezed);

    // Precision 0 gives the corner of the 100 km square
    let location = usng.to_lonlat("vk", reference, false)?;
    let square = usng.to_square("vk", reference)?;
    assert_eq!(location.lonlat, square.sw);
    assert_eq!(square.precision, "100 km");
    Ok(())
}

#[test]
fn wraparound() -> Result<(), Error> {
    let usng = Usng::new()?;
    let east = usng.from_lonlat(Coor2D::geo(45., 267.11), 4)?;
    let west = usng.from_lonlat(Coor2D::geo(45., -92.89), 4)?;
    assert_eq!(east, west);
    assert_eq!(west, "15T WK 0866 8295");

    // The antimeridian belongs to zone 60, and 180W is 180E
    let a = usng.from_lonlat(Coor2D::geo(10., 180.), 3)?;
    let b = usng.from_lonlat(Coor2D::geo(10., -180.), 3)?;
    assert_eq!(a, b);
    assert!(a.starts_with("60P "));
    Ok(())
}

#[test]
fn errors() -> Result<(), Error> {
    let usng = Usng::new()?;
    let reference = Some(Coor2D::geo(44., -93.));

    assert!(matches!(
        usng.to_lonlat("vk 1234 5678", None, false),
        Err(Error::InsufficientInformation(_))
    ));
    assert!(matches!(
        usng.to_lonlat("15T VK 123 5678", None, false),
        Err(Error::MalformedUsng(_, _))
    ));
    assert!(matches!(
        usng.to_lonlat("15T VO 1234 5678", None, false),
        Err(Error::InvalidGridDesignator(_, _))
    ));
    assert!(matches!(
        usng.to_lonlat("IO 1234 5678", reference, false),
        Err(Error::NoMatch(_))
    ));
    assert!(matches!(
        usng.to_lonlat("15U VK 1234 5678", None, true),
        Err(Error::ZoneMismatch { .. })
    ));
    assert!(matches!(
        usng.to_square("Z BF 4274 2988", None),
        Err(Error::Unsupported(_))
    ));
    assert!(matches!(
        usng.from_lonlat(Coor2D::geo(45., 12.), 12),
        Err(Error::MalformedUsng(_, _))
    ));

    // The error messages are informative
    let e = usng.to_lonlat("", None, false).unwrap_err();
    assert!(e.to_string().contains("malformed"));
    Ok(())
}

#[test]
fn planar() -> Result<(), Error> {
    let usng = Usng::new()?;
    let GridPoint::Utm(point) = usng.to_grid("18S UJ 228 070", None, true)? else {
        panic!("Expected a UTM point");
    };
    assert_eq!(point.easting, 322_800.);
    assert_eq!(point.northing, 4_307_000.);
    assert_eq!(usng.from_utm(&point)?, "18S UJ 228 070");

    let more = UtmPoint {
        precision: 5,
        ..point
    };
    assert_eq!(usng.from_utm(&more)?, "18S UJ 22800 07000");

    let grid = usng.from_lonlat_to_grid(Coor2D::geo(88., 40.), 4)?;
    assert_eq!(grid.grid_zone(), Some(GridZone::PolarNorth { east: true }));
    assert_eq!(usng.from_grid(&grid)?, "Z BF 4274 2988");
    let GridPoint::Ups(ups) = grid else {
        panic!("Expected a UPS point");
    };
    assert_float_eq!(ups.x, 2_142_743.374_559_593, abs <= 1e-6);
    assert_eq!(usng.from_ups(&ups)?, "Z BF 4274 2988");
    Ok(())
}

#[test]
fn distances() {
    let minneapolis = Coor2D::geo(44.98, -93.27);
    let washington = Coor2D::geo(38.894, -77.043);
    let d = usng::distance(&minneapolis, &washington);
    // Roughly 1500 km on a sphere of radius 6371 km
    assert!((d * 6371. - 1500.).abs() < 50.);
    assert_float_eq!(d, usng::distance(&washington, &minneapolis), abs <= 1e-15);
}
