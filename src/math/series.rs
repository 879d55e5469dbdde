/// Evaluate Σ cᵢ · xⁱ using Horner's scheme
pub fn horner(arg: f64, coefficients: &[f64]) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0., |value, c| value.mul_add(arg, *c))
}

// ----- Tests ---------------------------------------------------------------------
