use crate::domain::{SignificanceLevel, TestResult};
use crate::error::Result;

/// A hypothesis test over already-extracted numeric input.
///
/// Implementations are stateless apart from their own parameters, so
/// running the same test twice on the same input yields the same result.
pub trait StatisticalTest {
    type Input<'a>;

    fn name(&self) -> &'static str;

    fn run(&self, input: Self::Input<'_>, alpha: SignificanceLevel) -> Result<TestResult>;
}
