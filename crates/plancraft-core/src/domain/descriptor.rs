//! Solution, entity, and variable descriptors.
//!
//! Descriptors are plain structs built by an explicit builder at
//! configuration time; there is no runtime type introspection. Invalid
//! schemas are rejected when the solution descriptor is built, never
//! during solving.

use crate::error::{PlancraftError, Result};

use super::variable::VariableKind;

/// Describes a planning variable.
#[derive(Debug, Clone)]
pub struct VariableDescriptor {
    /// Name of the variable (field name).
    pub name: &'static str,
    /// The kind of variable.
    pub kind: VariableKind,
    /// Whether the variable can stay unassigned (null) in a valid solution.
    pub allows_unassigned: bool,
    /// Names of the value range providers feeding this variable.
    /// A variable with more than one provider draws from their union.
    pub value_ranges: Vec<&'static str>,
    /// For chained variables: the type name of the value, which must be
    /// the owning entity type.
    pub value_type: Option<&'static str>,
    /// For shadow variables: names of the listeners maintaining them,
    /// in invocation order.
    pub listeners: Vec<&'static str>,
}

impl VariableDescriptor {
    /// Creates a genuine variable descriptor.
    pub fn genuine(name: &'static str) -> Self {
        VariableDescriptor {
            name,
            kind: VariableKind::Genuine,
            allows_unassigned: false,
            value_ranges: Vec::new(),
            value_type: None,
            listeners: Vec::new(),
        }
    }

    /// Creates a chained variable descriptor.
    ///
    /// Chained variables form chains rooted at anchor facts, e.g. in
    /// vehicle routing: Vehicle ← Customer1 ← Customer2. The value type
    /// must be the owning entity type.
    pub fn chained(name: &'static str, value_type: &'static str) -> Self {
        VariableDescriptor {
            name,
            kind: VariableKind::Chained,
            allows_unassigned: false,
            value_ranges: Vec::new(),
            value_type: Some(value_type),
            listeners: Vec::new(),
        }
    }

    /// Creates a shadow variable descriptor.
    pub fn shadow(name: &'static str) -> Self {
        VariableDescriptor {
            name,
            kind: VariableKind::Shadow,
            allows_unassigned: true,
            value_ranges: Vec::new(),
            value_type: None,
            listeners: Vec::new(),
        }
    }

    /// Adds a value range provider reference.
    pub fn with_value_range(mut self, provider: &'static str) -> Self {
        self.value_ranges.push(provider);
        self
    }

    /// Sets whether unassigned values are allowed.
    pub fn with_allows_unassigned(mut self, allows: bool) -> Self {
        self.allows_unassigned = allows;
        self
    }

    /// Adds a shadow listener reference.
    pub fn with_listener(mut self, listener: &'static str) -> Self {
        self.listeners.push(listener);
        self
    }
}

/// Describes one planning entity collection of a solution.
pub struct EntityDescriptor<S> {
    /// Type name of the entity.
    pub name: &'static str,
    /// Returns the number of entities in the working solution.
    pub count: fn(&S) -> usize,
    /// The entity's planning variables.
    pub variables: Vec<VariableDescriptor>,
}

impl<S> EntityDescriptor<S> {
    /// Creates a new entity descriptor.
    pub fn new(name: &'static str, count: fn(&S) -> usize) -> Self {
        Self {
            name,
            count,
            variables: Vec::new(),
        }
    }

    /// Adds a variable descriptor.
    pub fn with_variable(mut self, variable: VariableDescriptor) -> Self {
        self.variables.push(variable);
        self
    }

    /// Looks up a variable descriptor by name.
    pub fn variable(&self, name: &str) -> Option<&VariableDescriptor> {
        self.variables.iter().find(|v| v.name == name)
    }

    fn validate(&self) -> Result<()> {
        let mut seen: Vec<&str> = Vec::new();
        for variable in &self.variables {
            if seen.contains(&variable.name) {
                return Err(PlancraftError::Config(format!(
                    "Entity '{}' declares variable '{}' more than once",
                    self.name, variable.name
                )));
            }
            seen.push(variable.name);

            if variable.kind == VariableKind::Chained && variable.allows_unassigned {
                return Err(PlancraftError::Config(format!(
                    "Variable '{}.{}' is chained and nullable; chaining and \
                     nullability are mutually exclusive",
                    self.name, variable.name
                )));
            }
            if variable.kind == VariableKind::Chained
                && variable.value_type != Some(self.name)
            {
                return Err(PlancraftError::Config(format!(
                    "Chained variable '{}.{}' has value type {:?}, which must \
                     be the owning entity type '{}'",
                    self.name, variable.name, variable.value_type, self.name
                )));
            }
            if variable.kind != VariableKind::Shadow
                && !variable.allows_unassigned
                && variable.value_ranges.is_empty()
            {
                return Err(PlancraftError::Config(format!(
                    "Non-nullable variable '{}.{}' must resolve to at least \
                     one value range provider",
                    self.name, variable.name
                )));
            }
        }
        Ok(())
    }
}

impl<S> Clone for EntityDescriptor<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            count: self.count,
            variables: self.variables.clone(),
        }
    }
}

impl<S> std::fmt::Debug for EntityDescriptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("name", &self.name)
            .field("variables", &self.variables)
            .finish()
    }
}

/// Describes a planning solution's entity collections.
///
/// # Example
///
/// ```
/// use plancraft_core::domain::{
///     EntityDescriptor, SolutionDescriptor, VariableDescriptor,
/// };
///
/// #[derive(Clone)]
/// struct NQueens {
///     rows: Vec<Option<i32>>,
/// }
///
/// fn queen_count(s: &NQueens) -> usize {
///     s.rows.len()
/// }
///
/// let descriptor = SolutionDescriptor::<NQueens>::builder("NQueens")
///     .entity(
///         EntityDescriptor::new("Queen", queen_count)
///             .with_variable(VariableDescriptor::genuine("row").with_value_range("rows")),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(descriptor.entities().len(), 1);
/// ```
pub struct SolutionDescriptor<S> {
    name: &'static str,
    entities: Vec<EntityDescriptor<S>>,
}

impl<S> SolutionDescriptor<S> {
    /// Starts building a solution descriptor.
    pub fn builder(name: &'static str) -> SolutionDescriptorBuilder<S> {
        SolutionDescriptorBuilder {
            name,
            entities: Vec::new(),
        }
    }

    /// Returns the solution type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the entity descriptors.
    pub fn entities(&self) -> &[EntityDescriptor<S>] {
        &self.entities
    }

    /// Returns the entity descriptor at the given index.
    pub fn entity(&self, descriptor_index: usize) -> Option<&EntityDescriptor<S>> {
        self.entities.get(descriptor_index)
    }

    /// Returns the number of entities of the given descriptor in `solution`.
    pub fn entity_count(&self, descriptor_index: usize, solution: &S) -> usize {
        self.entities
            .get(descriptor_index)
            .map(|e| (e.count)(solution))
            .unwrap_or(0)
    }
}

impl<S> Clone for SolutionDescriptor<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            entities: self.entities.clone(),
        }
    }
}

impl<S> std::fmt::Debug for SolutionDescriptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolutionDescriptor")
            .field("name", &self.name)
            .field("entities", &self.entities)
            .finish()
    }
}

/// Builder producing validated [`SolutionDescriptor`]s.
pub struct SolutionDescriptorBuilder<S> {
    name: &'static str,
    entities: Vec<EntityDescriptor<S>>,
}

impl<S> SolutionDescriptorBuilder<S> {
    /// Adds an entity descriptor.
    pub fn entity(mut self, entity: EntityDescriptor<S>) -> Self {
        self.entities.push(entity);
        self
    }

    /// Validates the schema and produces the descriptor.
    ///
    /// # Errors
    /// Returns a configuration error for: a solution without entities, a
    /// chained+nullable variable, a chained variable whose value type is
    /// not its owning entity type, a non-nullable variable without a value
    /// range provider, or duplicate variable names.
    pub fn build(self) -> Result<SolutionDescriptor<S>> {
        if self.entities.is_empty() {
            return Err(PlancraftError::Config(format!(
                "Solution '{}' declares no planning entities",
                self.name
            )));
        }
        for entity in &self.entities {
            entity.validate()?;
        }
        Ok(SolutionDescriptor {
            name: self.name,
            entities: self.entities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Sol {
        rows: Vec<Option<i32>>,
    }

    fn count(s: &Sol) -> usize {
        s.rows.len()
    }

    fn queen_entity() -> EntityDescriptor<Sol> {
        EntityDescriptor::new("Queen", count)
            .with_variable(VariableDescriptor::genuine("row").with_value_range("rows"))
    }

    #[test]
    fn valid_schema_builds() {
        let descriptor = SolutionDescriptor::<Sol>::builder("Sol")
            .entity(queen_entity())
            .build()
            .unwrap();
        assert_eq!(descriptor.name(), "Sol");
        assert_eq!(descriptor.entities()[0].variable("row").unwrap().name, "row");

        let solution = Sol {
            rows: vec![None, None],
        };
        assert_eq!(descriptor.entity_count(0, &solution), 2);
    }

    #[test]
    fn chained_nullable_conflict_is_rejected() {
        let result = SolutionDescriptor::<Sol>::builder("Sol")
            .entity(
                EntityDescriptor::new("Customer", count).with_variable(
                    VariableDescriptor::chained("previous", "Customer")
                        .with_value_range("customers")
                        .with_allows_unassigned(true),
                ),
            )
            .build();
        assert!(matches!(result, Err(PlancraftError::Config(_))));
    }

    #[test]
    fn chained_value_type_must_be_owning_entity() {
        let result = SolutionDescriptor::<Sol>::builder("Sol")
            .entity(
                EntityDescriptor::new("Customer", count).with_variable(
                    VariableDescriptor::chained("previous", "Depot")
                        .with_value_range("customers"),
                ),
            )
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn non_nullable_variable_requires_value_range() {
        let result = SolutionDescriptor::<Sol>::builder("Sol")
            .entity(
                EntityDescriptor::new("Queen", count)
                    .with_variable(VariableDescriptor::genuine("row")),
            )
            .build();
        assert!(result.is_err());

        // A nullable variable may omit the range: unassigned stays legal.
        let result = SolutionDescriptor::<Sol>::builder("Sol")
            .entity(EntityDescriptor::new("Queen", count).with_variable(
                VariableDescriptor::genuine("row").with_allows_unassigned(true),
            ))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn duplicate_variable_names_are_rejected() {
        let result = SolutionDescriptor::<Sol>::builder("Sol")
            .entity(
                EntityDescriptor::new("Queen", count)
                    .with_variable(VariableDescriptor::genuine("row").with_value_range("rows"))
                    .with_variable(VariableDescriptor::genuine("row").with_value_range("rows")),
            )
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn empty_solution_is_rejected() {
        let result = SolutionDescriptor::<Sol>::builder("Sol").build();
        assert!(result.is_err());
    }
}
