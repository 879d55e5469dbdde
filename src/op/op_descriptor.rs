use super::*;

/// Everything about an operator, except its parameters
#[derive(Debug, Default)]
pub struct OpDescriptor {
    pub definition: String,
    pub invertible: bool,
    pub inverted: bool,
    pub fwd: InnerOp,
    pub inv: InnerOp,
}

impl OpDescriptor {
    /// A descriptor for an operator running in its natural direction.
    /// Operators without an inverse get the no-op placeholder as `inv`
    pub fn new(definition: &str, fwd: InnerOp, inv: Option<InnerOp>) -> OpDescriptor {
        OpDescriptor {
            definition: definition.to_string(),
            invertible: inv.is_some(),
            inverted: false,
            fwd,
            inv: inv.unwrap_or_default(),
        }
    }
}
