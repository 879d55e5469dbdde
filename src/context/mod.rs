use crate::authoring::*;
mod minimal;
pub use minimal::Minimal;

// ----- T H E   C O N T E X T   T R A I T ---------------------------------------------

/// The `Context` trait defines the mode of communication between the grid
/// computations and the projection provider: The grid needs polar
/// stereographic projections for the UPS zones, and instantiates them from
/// textual operator definitions (e.g. `stere lat_0=90 k_0=0.994`) through the
/// context, rather than by calling a fixed implementation.
pub trait Context {
    /// An empty context: No operators instantiated, none registered
    fn new() -> Self
    where
        Self: Sized;

    /// Instantiate the operator defined by `definition`, e.g. `utm zone=15`,
    /// and return the handle it will be known by
    fn op(&mut self, definition: &str) -> Result<OpHandle, Error>;

    /// Run the operator known as `op` over `operands`. Returns the number of
    /// operands converted: Failing ones are set to NaN
    fn apply(
        &self,
        op: OpHandle,
        direction: Direction,
        operands: &mut dyn CoordinateSet,
    ) -> Result<usize, Error>;

    /// Defaults for parameters not given in operator definitions
    fn globals(&self) -> BTreeMap<String, String>;

    /// Make a user defined operator available under `name`, taking
    /// precedence over any built in operator of the same name
    fn register_op(&mut self, name: &str, constructor: OpConstructor);

    /// The constructor of a user defined operator, for use by `Op::op`
    fn get_op(&self, name: &str) -> Result<OpConstructor, Error>;
}
