use std::error::Error;

use futures::future::{self, Ready};

/// A set of parameters whose values have not been checked for validity. The checked
/// hyperparameters can only be obtained after checking has completed. If the `Fit` trait has
/// been implemented on the checked hyperparameters, it will also be implemented on the unchecked
/// hyperparameters with the checking step done automatically.
///
/// The validation done in `verify()` and `check()` should be identical.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;
    /// Error type resulting from failed hyperparameter checking
    type Error: Error;

    /// Checks the hyperparameters without consuming them
    fn verify(&self) -> Result<(), Self::Error>;

    /// Checks the hyperparameters and returns the checked hyperparameters if successful
    fn check(self) -> Result<Self::Checked, Self::Error>;
}

/// Fittable algorithms
///
/// A fittable algorithm takes a set of records and creates a fitted object from it. `fit` does
/// all the work before returning, `run` wraps the same result into an already resolved future
/// so that it composes with asynchronous callers.
pub trait Fit<R, E: Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, records: &R) -> Result<Self::Object, E>;

    fn run(&self, records: &R) -> Ready<Result<Self::Object, E>> {
        future::ready(self.fit(records))
    }
}

/// Performs the checking step and calls `fit` on the checked hyperparameters. If checking
/// failed, the checking error is converted to the original error type of `Fit` and returned.
impl<R, E, P> Fit<R, E> for P
where
    P: ParamGuard + Clone,
    P::Checked: Fit<R, E>,
    E: Error + From<crate::error::Error> + From<P::Error>,
{
    type Object = <<P as ParamGuard>::Checked as Fit<R, E>>::Object;

    fn fit(&self, records: &R) -> Result<Self::Object, E> {
        let checked = self.clone().check()?;
        checked.fit(records)
    }
}
