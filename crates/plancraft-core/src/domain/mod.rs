//! Planning domain schema: solutions, descriptors, value ranges.

mod descriptor;
mod traits;
mod value_range;
mod variable;

pub use descriptor::{
    EntityDescriptor, SolutionDescriptor, SolutionDescriptorBuilder, VariableDescriptor,
};
pub use traits::PlanningSolution;
pub use value_range::{
    CompositeValueRange, ComputedValueRangeProvider, FieldValueRangeProvider, IntRange,
    StaticValueRange, ValueRangeProvider,
};
pub use variable::{VariableKind, VariableListener};
