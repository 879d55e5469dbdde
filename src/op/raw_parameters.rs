use super::*;

/// Interface between the high level [Op::op()](crate::op::Op) and the low level
/// functionality in the [InnerOp](crate::inner_op::InnerOp)s
///
/// `RawParameters` is the vehicle used by the `Op`erator factory in `Op::op(...)`,
/// to ferry args around from the invocator into the constructor of the individual
/// `InnerOp`s.
///
/// The `InnerOp`constructor typically interprets the contents of
/// `RawParameters`, and converts it into a more runtime friendly instance of
/// `ParsedParameters`.
#[derive(Debug, Default, Clone)]
pub struct RawParameters {
    pub definition: String,
    pub globals: BTreeMap<String, String>,
}

impl RawParameters {
    pub fn new(definition: &str, globals: &BTreeMap<String, String>) -> RawParameters {
        // Strip comments, and normalize whitespace
        let definition = definition
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ");
        let definition = definition.split_whitespace().collect::<Vec<_>>().join(" ");

        RawParameters {
            definition,
            globals: globals.clone(),
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------
