use super::*;

#[derive(Debug)]
pub struct ParsedParameters {
    pub name: String,

    // Commonly used options have hard-coded slots
    pub ellps: [Ellipsoid; 2],
    pub lat: [f64; 4],
    pub lon: [f64; 4],
    pub x: [f64; 4],
    pub y: [f64; 4],
    pub k: [f64; 4],

    // Op-specific options are stored in B-Trees
    pub boolean: BTreeSet<&'static str>,
    pub natural: BTreeMap<&'static str, usize>,
    pub real: BTreeMap<&'static str, f64>,
    pub text: BTreeMap<&'static str, String>,
    pub ignored: Vec<String>,
    pub given: BTreeMap<String, String>,
}

// Accessors
impl ParsedParameters {
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean.contains(key)
    }
    pub fn natural(&self, key: &str) -> Result<usize, Error> {
        if let Some(value) = self.natural.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn real(&self, key: &str) -> Result<f64, Error> {
        if let Some(value) = self.real.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn text(&self, key: &str) -> Result<String, Error> {
        if let Some(value) = self.text.get(key) {
            return Ok(value.to_string());
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn ignored(&self) -> Vec<String> {
        self.ignored.clone()
    }
    pub fn ellps(&self, index: usize) -> &Ellipsoid {
        &self.ellps[index]
    }
    pub fn x(&self, index: usize) -> f64 {
        self.x[index]
    }
    pub fn y(&self, index: usize) -> f64 {
        self.y[index]
    }
    /// Latitude slot, in radians
    pub fn lat(&self, index: usize) -> f64 {
        self.lat[index]
    }
    /// Longitude slot, in radians
    pub fn lon(&self, index: usize) -> f64 {
        self.lon[index]
    }
    pub fn k(&self, index: usize) -> f64 {
        self.k[index]
    }
}

impl ParsedParameters {
    pub fn new(
        parameters: &RawParameters,
        gamut: &[OpParameter],
    ) -> Result<ParsedParameters, Error> {
        let locals = super::split_into_parameters(&parameters.definition);
        let globals = &parameters.globals;
        let mut boolean = BTreeSet::<&'static str>::new();
        let mut natural = BTreeMap::<&'static str, usize>::new();
        let mut real = BTreeMap::<&'static str, f64>::new();
        let mut text = BTreeMap::<&'static str, String>::new();

        // Try to locate all accepted parameters, type check, and place them into
        // their proper bins
        for p in gamut {
            match *p {
                OpParameter::Flag { key } => {
                    if let Some(value) = lookup(globals, &locals, key) {
                        if value.is_empty() || value.to_lowercase() == "true" {
                            boolean.insert(key);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a boolean constant!");
                        return Err(Error::BadParam(key.to_string(), value));
                    }
                    // Flags are always optional (i.e. implicitly false when not given)
                    continue;
                }

                OpParameter::Natural { key, default } => {
                    if let Some(value) = lookup(globals, &locals, key) {
                        if let Ok(v) = value.parse::<usize>() {
                            natural.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a natural number!");
                        return Err(Error::BadParam(key.to_string(), value));
                    }

                    if let Some(value) = default {
                        natural.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Real { key, default } => {
                    if let Some(value) = lookup(globals, &locals, key) {
                        if let Ok(v) = value.parse::<f64>() {
                            real.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a real number");
                        return Err(Error::BadParam(key.to_string(), value));
                    }

                    if let Some(value) = default {
                        real.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Text { key, default } => {
                    if let Some(value) = lookup(globals, &locals, key) {
                        text.insert(key, value);
                        continue;
                    }

                    if let Some(value) = default {
                        text.insert(key, value.to_string());
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }
            };
        }

        // Now handle the commonly used options with the hard-coded slots

        let mut ellps = [Ellipsoid::default(), Ellipsoid::default()];
        for (i, e) in ellps.iter_mut().enumerate() {
            if let Some(definition) = text.get(&format!("ellps_{i}")[..]) {
                *e = ellipsoid(definition)?;
            }
        }
        // But `ellps` trumps `ellps_0`
        if let Some(definition) = text.get("ellps") {
            ellps[0] = ellipsoid(definition)?;
        }

        let slot = |prefix: &str| {
            let mut values = [0.; 4];
            for (i, v) in values.iter_mut().enumerate() {
                *v = *real.get(&format!("{prefix}_{i}")[..]).unwrap_or(&0.);
            }
            values
        };
        let lat = slot("lat").map(f64::to_radians);
        let lon = slot("lon").map(f64::to_radians);
        let x = slot("x");
        let y = slot("y");
        let k = slot("k");

        let name = locals
            .get("name")
            .map_or_else(|| "unknown".to_string(), |name| name.to_string());

        // Params specified, but not in the gamut
        let ignored: Vec<String> = locals
            .keys()
            .filter(|key| *key != "name" && !gamut.iter().any(|p| p.key() == *key))
            .cloned()
            .collect();
        for key in &ignored {
            warn!("{name}: ignoring unknown parameter '{key}'");
        }
        let given = locals;

        Ok(ParsedParameters {
            name,
            ellps,
            lat,
            lon,
            x,
            y,
            k,
            boolean,
            natural,
            real,
            text,
            ignored,
            given,
        })
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

/// Look up `key`, letting the locals (the operator definition) override the
/// globals (the context wide defaults)
pub fn lookup(
    globals: &BTreeMap<String, String>,
    locals: &BTreeMap<String, String>,
    key: &str,
) -> Option<String> {
    locals
        .get(key)
        .or_else(|| globals.get(key))
        .map(|value| value.trim().to_string())
}

/// An ellipsoid given either by name, or as "a,rf": semimajor axis and
/// reciprocal flattening
fn ellipsoid(definition: &str) -> Result<Ellipsoid, Error> {
    let Some((a, rf)) = definition.split_once(',') else {
        return Ellipsoid::named(definition);
    };
    let bad = || Error::BadParam("ellps".to_string(), definition.to_string());
    let a = a.trim().parse::<f64>().map_err(|_| bad())?;
    let rf = rf.trim().parse::<f64>().map_err(|_| bad())?;
    let f = if rf == 0. { 0. } else { 1. / rf };
    Ok(Ellipsoid::new(a, f))
}

// ----- T E S T S ------------------------------------------------------------------
