/// The parameters an operator accepts, with their types and defaults.
/// The set of them is called the *gamut* of the operator, e.g. for `utm`:
/// the `inv` and `south` flags, the `ellps` text, and the `zone` natural.
///
/// A `default` of `None` makes the parameter required. Flags are never
/// required: they are true when given, false otherwise.
#[derive(Debug)]
pub enum OpParameter {
    /// Boolean, true when present
    Flag { key: &'static str },
    /// Non-negative integer, e.g. a UTM zone number
    Natural {
        key: &'static str,
        default: Option<usize>,
    },
    /// Floating point number, e.g. a scale factor, or an angle in degrees
    Real {
        key: &'static str,
        default: Option<f64>,
    },
    /// Text, e.g. an ellipsoid name
    Text {
        key: &'static str,
        default: Option<&'static str>,
    },
}

impl OpParameter {
    /// The name of the parameter, as given in operator definitions
    #[must_use]
    pub fn key(&self) -> &'static str {
        match *self {
            OpParameter::Flag { key } => key,
            OpParameter::Natural { key, .. } => key,
            OpParameter::Real { key, .. } => key,
            OpParameter::Text { key, .. } => key,
        }
    }
}
