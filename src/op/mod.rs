use crate::authoring::*;

mod op_descriptor;
mod parameter;
mod parsed_parameters;
mod raw_parameters;

pub use op_descriptor::OpDescriptor;
pub use parameter::OpParameter;
pub use parsed_parameters::ParsedParameters;
pub use raw_parameters::RawParameters;

/// Identifies an operator instantiated by a `Context`
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct OpHandle(uuid::Uuid);

impl OpHandle {
    pub fn new() -> Self {
        OpHandle(uuid::Uuid::new_v4())
    }
}

impl Default for OpHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// An instantiated operator: What it is, how it was parameterized, and
/// the handle its context knows it by
#[derive(Debug)]
pub struct Op {
    pub descriptor: OpDescriptor,
    pub params: ParsedParameters,
    pub id: OpHandle,
}

impl Op {
    /// Run the operator in the given direction, swapping the roles of the
    /// forward and inverse functions if it was instantiated with `inv`.
    /// Returns the number of operands successfully converted.
    pub fn apply(
        &self,
        ctx: &dyn Context,
        operands: &mut dyn CoordinateSet,
        direction: Direction,
    ) -> usize {
        let run_forward = (direction == Fwd) != self.descriptor.inverted;
        let inner = if run_forward {
            &self.descriptor.fwd
        } else {
            &self.descriptor.inv
        };
        inner.0(self, ctx, operands)
    }

    /// Instantiate from a definition like `utm zone=32`, with the context
    /// globals filling in unspecified parameters
    pub fn new(definition: &str, ctx: &dyn Context) -> Result<Op, Error> {
        let parameters = RawParameters::new(definition, &ctx.globals());
        Self::op(parameters, ctx)
    }

    /// The constructor used by operators needing nothing more than what is
    /// given by their parameters, i.e. all of the built in ones
    pub fn plain(
        parameters: &RawParameters,
        fwd: InnerOp,
        inv: Option<InnerOp>,
        gamut: &[OpParameter],
        _ctx: &dyn Context,
    ) -> Result<Op, Error> {
        let params = ParsedParameters::new(parameters, gamut)?;
        let descriptor = OpDescriptor::new(&parameters.definition, fwd, inv);
        Ok(Op {
            descriptor,
            params,
            id: OpHandle::new(),
        })
    }

    /// Look up the constructor by name, user defined ones first, then
    /// build the operator
    #[allow(clippy::self_named_constructors)]
    pub fn op(parameters: RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
        let name = operator_name(&parameters.definition, "");
        let not_found = || Error::NotFound(name.clone(), ": ".to_string() + &parameters.definition);
        let constructor = ctx
            .get_op(&name)
            .or_else(|_| crate::inner_op::builtin(&name))
            .map_err(|_| not_found())?;
        constructor.0(&parameters, ctx)?.invert_if_asked()
    }

    // Honor the `inv` flag, if the operator can
    fn invert_if_asked(mut self) -> Result<Op, Error> {
        if !self.params.boolean("inv") {
            return Ok(self);
        }
        if !self.descriptor.invertible {
            return Err(Error::NonInvertible(self.descriptor.definition));
        }
        self.descriptor.inverted = !self.descriptor.inverted;
        Ok(self)
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

/// The first bare word of a definition, or `default` if there is none
pub fn operator_name(definition: &str, default: &str) -> String {
    split_into_parameters(definition)
        .get("name")
        .map_or_else(|| default.to_string(), |name| name.to_string())
}

/// Split a definition into `key=value` pairs. Flags get the value "true",
/// and a leading bare word is the `name` of the operator
pub fn split_into_parameters(definition: &str) -> BTreeMap<String, String> {
    let words: Vec<_> = definition.split_whitespace().collect();
    let definition = words.join(" ").replace("= ", "=").replace(" =", "=");

    let mut params = BTreeMap::new();
    for (i, word) in definition.split_whitespace().enumerate() {
        match word.split_once('=') {
            Some((key, value)) => params.insert(key.to_string(), value.to_string()),
            None if i == 0 => params.insert("name".to_string(), word.to_string()),
            None => params.insert(word.to_string(), "true".to_string()),
        };
    }
    params
}

// ----- T E S T S ------------------------------------------------------------------
