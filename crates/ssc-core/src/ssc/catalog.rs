use crate::song::StepsType;

/// Lookup of step-style metadata.
pub trait StepsTypeCatalog {
    /// Name written to `#STEPSTYPE` and the chart separator comment.
    fn name(&self, steps_type: StepsType) -> &str;
}

/// Catalog using the built-in `StepsType` names.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStepsTypes;

impl StepsTypeCatalog for BuiltinStepsTypes {
    fn name(&self, steps_type: StepsType) -> &str {
        steps_type.name()
    }
}
