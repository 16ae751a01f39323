use crate::{
    CallError, Entity, FunctionFlags, IntoStaticCallable, Signature, StaticCallable, Value,
    callable_signature,
};

use super::method::rename_parameters;
use super::{EntityKind, Reflected};

/// A namespace-level function.
#[derive(Debug, Clone)]
pub struct Function {
    pub entity: Entity,
    pub signature: Signature,
    pub flags: FunctionFlags,
    pub callable: StaticCallable,
}

impl Function {
    pub fn new<M, F: IntoStaticCallable<M>>(name: impl Into<String>, flags: FunctionFlags, f: F) -> Self {
        Self::from_parts(name, flags, F::signature(), f.into_callable())
    }

    pub fn from_parts(
        name: impl Into<String>,
        flags: FunctionFlags,
        signature: Signature,
        callable: StaticCallable,
    ) -> Self {
        Self {
            entity: Entity::new(name),
            signature,
            flags,
            callable,
        }
    }

    pub fn with_parameter_names(mut self, names: &[&str]) -> Self {
        rename_parameters(&mut self.signature, names);
        self
    }

    pub fn parameter_count(&self) -> usize {
        self.signature.parameter_count()
    }

    pub fn has_flags(&self, min_flags: FunctionFlags) -> bool {
        self.flags.contains(min_flags)
    }

    pub fn invoke(&self, args: Vec<Value>) -> Result<Value, CallError> {
        self.signature.check_args(&args)?;
        self.callable.call(args)
    }
}

impl Reflected for Function {
    const KIND: EntityKind = EntityKind::Function;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn identity_key(&self, qualified_name: &str) -> String {
        callable_signature(qualified_name, &self.signature.parameter_type_names())
    }
}
