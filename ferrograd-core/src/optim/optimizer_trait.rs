use crate::error::FerrogradError;

/// Common interface for gradient-based optimizers.
///
/// An optimizer holds handles to the parameters it updates. `step` consumes
/// the gradients accumulated by the last backward pass; `zero_grad` clears
/// them before the next one.
pub trait Optimizer {
    /// Applies one update to every managed parameter.
    ///
    /// # Errors
    /// `MissingGradient` if a managed parameter has no gradient, which
    /// usually means `backward` was not called or `zero_grad` ran in the
    /// wrong place.
    fn step(&mut self) -> Result<(), FerrogradError>;

    /// Clears the gradients of every managed parameter.
    fn zero_grad(&mut self);
}
