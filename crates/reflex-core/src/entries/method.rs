use std::any::Any;

use crate::{
    AccessSpecifier, CallError, Entity, EntityId, IntoMethodCallable, IntoStaticCallable,
    MethodCallable, MethodFlags, Signature, StaticCallable, Value, callable_signature,
};

use super::{EntityKind, Reflected};

/// An instance method: invoked with a receiver and an argument list.
#[derive(Debug, Clone)]
pub struct Method {
    pub entity: Entity,
    pub signature: Signature,
    pub flags: MethodFlags,
    /// Struct that declares the method. Filled in on registration when empty.
    pub owner: EntityId,
    pub callable: MethodCallable,
}

impl Method {
    /// Create a method from a typed closure whose first parameter is the receiver.
    ///
    /// ```
    /// use reflex_core::{Method, MethodFlags};
    ///
    /// struct Counter(i32);
    /// let m = Method::new("add", MethodFlags::PUBLIC, |c: &mut Counter, by: i32| c.0 += by);
    /// assert_eq!(m.parameter_count(), 1);
    /// ```
    pub fn new<M, F: IntoMethodCallable<M>>(name: impl Into<String>, flags: MethodFlags, f: F) -> Self {
        Self::from_parts(name, flags, F::signature(), f.into_callable())
    }

    /// Create a method from an explicit signature and a raw callable.
    pub fn from_parts(
        name: impl Into<String>,
        flags: MethodFlags,
        signature: Signature,
        callable: MethodCallable,
    ) -> Self {
        Self {
            entity: Entity::new(name),
            signature,
            flags,
            owner: EntityId::EMPTY,
            callable,
        }
    }

    /// Name the parameters in declaration order.
    pub fn with_parameter_names(mut self, names: &[&str]) -> Self {
        rename_parameters(&mut self.signature, names);
        self
    }

    pub fn declared_in(mut self, owner: EntityId) -> Self {
        self.owner = owner;
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    pub fn access(&self) -> AccessSpecifier {
        self.flags.access()
    }

    pub fn parameter_count(&self) -> usize {
        self.signature.parameter_count()
    }

    /// Check if the method carries at least `min_flags`.
    pub fn has_flags(&self, min_flags: MethodFlags) -> bool {
        self.flags.contains(min_flags)
    }

    /// Call the method on `instance` after checking the arguments.
    pub fn invoke(&self, instance: &mut dyn Any, args: Vec<Value>) -> Result<Value, CallError> {
        self.signature.check_args(&args)?;
        self.callable.call(instance, args)
    }
}

impl Reflected for Method {
    const KIND: EntityKind = EntityKind::Method;

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

/// A static method: invoked with an argument list only. Instantiators are
/// static methods returning the struct.
#[derive(Debug, Clone)]
pub struct StaticMethod {
    pub entity: Entity,
    pub signature: Signature,
    pub flags: MethodFlags,
    pub owner: EntityId,
    pub callable: StaticCallable,
}

impl StaticMethod {
    /// Create a static method from a typed closure.
    ///
    /// The `STATIC` flag is added automatically.
    pub fn new<M, F: IntoStaticCallable<M>>(name: impl Into<String>, flags: MethodFlags, f: F) -> Self {
        Self::from_parts(name, flags | MethodFlags::STATIC, F::signature(), f.into_callable())
    }

    /// Create a static method from an explicit signature and a raw callable.
    pub fn from_parts(
        name: impl Into<String>,
        flags: MethodFlags,
        signature: Signature,
        callable: StaticCallable,
    ) -> Self {
        Self {
            entity: Entity::new(name),
            signature,
            flags,
            owner: EntityId::EMPTY,
            callable,
        }
    }

    pub fn with_parameter_names(mut self, names: &[&str]) -> Self {
        rename_parameters(&mut self.signature, names);
        self
    }

    pub fn declared_in(mut self, owner: EntityId) -> Self {
        self.owner = owner;
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    pub fn access(&self) -> AccessSpecifier {
        self.flags.access()
    }

    pub fn parameter_count(&self) -> usize {
        self.signature.parameter_count()
    }

    pub fn has_flags(&self, min_flags: MethodFlags) -> bool {
        self.flags.contains(min_flags)
    }

    pub fn invoke(&self, args: Vec<Value>) -> Result<Value, CallError> {
        self.signature.check_args(&args)?;
        self.callable.call(args)
    }
}

impl Reflected for StaticMethod {
    const KIND: EntityKind = EntityKind::StaticMethod;

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

pub(super) fn rename_parameters(signature: &mut Signature, names: &[&str]) {
    for (param, name) in signature.parameters.iter_mut().zip(names) {
        param.name = (*name).to_string();
    }
}
