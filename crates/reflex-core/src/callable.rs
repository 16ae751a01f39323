//! Type-erased callables behind reflected methods and functions.
//!
//! Arguments and results travel as [`Value`]s (boxed `Any`). A callable is
//! built either from a raw closure over `Vec<Value>` or, more commonly, from a
//! typed Rust closure through [`IntoStaticCallable`] / [`IntoMethodCallable`],
//! which also derive the parameter list used for signatures and ids.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::{CallError, TypeDesc};

/// A type-erased argument or return value.
pub type Value = Box<dyn Any + Send>;

/// Build a `Vec<Value>` argument list.
///
/// ```
/// let args = reflex_core::args![1i32, 2.5f32];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        vec![$(Box::new($value) as $crate::Value),*]
    };
}

/// A named, typed parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeDesc,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Return type and parameters of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub return_type: TypeDesc,
    pub parameters: Vec<Parameter>,
}

impl Signature {
    pub fn new(return_type: TypeDesc, parameters: Vec<Parameter>) -> Self {
        Self {
            return_type,
            parameters,
        }
    }

    /// Signature with unnamed parameters (`arg0`, `arg1`, ...).
    pub fn from_types(return_type: TypeDesc, parameter_types: Vec<TypeDesc>) -> Self {
        let parameters = parameter_types
            .into_iter()
            .enumerate()
            .map(|(i, ty)| Parameter::new(format!("arg{i}"), ty))
            .collect();
        Self::new(return_type, parameters)
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Parameter type names, as folded into callable ids.
    pub fn parameter_type_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.ty.name.as_str()).collect()
    }

    /// Check that an argument list fits this signature.
    pub fn check_args(&self, args: &[Value]) -> Result<(), CallError> {
        if args.len() != self.parameters.len() {
            return Err(CallError::ArgumentCount {
                expected: self.parameters.len(),
                got: args.len(),
            });
        }
        for (index, (param, arg)) in self.parameters.iter().zip(args).enumerate() {
            if !param.ty.accepts_id((**arg).type_id()) {
                return Err(CallError::ArgumentType {
                    index,
                    expected: param.ty.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Check if an argument list would be accepted, without building an error.
    pub fn accepts(&self, args: &[Value]) -> bool {
        self.check_args(args).is_ok()
    }
}

type StaticFn = dyn Fn(Vec<Value>) -> Result<Value, CallError> + Send + Sync;
type MethodFn = dyn Fn(&mut dyn Any, Vec<Value>) -> Result<Value, CallError> + Send + Sync;

/// Callable behind a static method or free function.
#[derive(Clone)]
pub struct StaticCallable(Arc<StaticFn>);

impl StaticCallable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: Vec<Value>) -> Result<Value, CallError> {
        (self.0)(args)
    }
}

impl fmt::Debug for StaticCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StaticCallable({:p})", Arc::as_ptr(&self.0))
    }
}

/// Callable behind an instance method.
#[derive(Clone)]
pub struct MethodCallable(Arc<MethodFn>);

impl MethodCallable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Any, Vec<Value>) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, instance: &mut dyn Any, args: Vec<Value>) -> Result<Value, CallError> {
        (self.0)(instance, args)
    }
}

impl fmt::Debug for MethodCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodCallable({:p})", Arc::as_ptr(&self.0))
    }
}

/// Describe a Rust type for a signature; `()` maps to `void`.
fn describe<T: 'static>() -> TypeDesc {
    if TypeId::of::<T>() == TypeId::of::<()>() {
        TypeDesc::void()
    } else {
        TypeDesc::opaque::<T>()
    }
}

fn take_arg<T: 'static>(index: usize, value: Value) -> Result<T, CallError> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| CallError::ArgumentType {
            index,
            expected: std::any::type_name::<T>().to_string(),
        })
}

fn check_count(expected: usize, got: usize) -> Result<(), CallError> {
    if expected == got {
        Ok(())
    } else {
        Err(CallError::ArgumentCount { expected, got })
    }
}

/// Conversion of a typed closure into a [`StaticCallable`] plus its signature.
pub trait IntoStaticCallable<Marker> {
    fn signature() -> Signature;
    fn into_callable(self) -> StaticCallable;
}

/// Conversion of a typed closure taking `&mut S` first into a [`MethodCallable`].
pub trait IntoMethodCallable<Marker> {
    fn signature() -> Signature;
    fn into_callable(self) -> MethodCallable;
}

macro_rules! impl_callables {
    ($($arg:ident),*) => {
        impl<F, R, $($arg,)*> IntoStaticCallable<fn($($arg,)*) -> R> for F
        where
            F: Fn($($arg),*) -> R + Send + Sync + 'static,
            R: Send + 'static,
            $($arg: Send + 'static,)*
        {
            fn signature() -> Signature {
                Signature::from_types(describe::<R>(), vec![$(describe::<$arg>()),*])
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_callable(self) -> StaticCallable {
                StaticCallable::new(move |args: Vec<Value>| {
                    let expected = <[&str]>::len(&[$(stringify!($arg)),*]);
                    check_count(expected, args.len())?;
                    let mut args = args.into_iter().enumerate();
                    $(
                        let (index, value) = args.next().ok_or(CallError::ArgumentCount { expected, got: 0 })?;
                        let $arg = take_arg::<$arg>(index, value)?;
                    )*
                    Ok(Box::new((self)($($arg),*)) as Value)
                })
            }
        }

        impl<F, S, R, $($arg,)*> IntoMethodCallable<fn(&mut S, $($arg,)*) -> R> for F
        where
            F: Fn(&mut S, $($arg),*) -> R + Send + Sync + 'static,
            S: 'static,
            R: Send + 'static,
            $($arg: Send + 'static,)*
        {
            fn signature() -> Signature {
                Signature::from_types(describe::<R>(), vec![$(describe::<$arg>()),*])
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_callable(self) -> MethodCallable {
                MethodCallable::new(move |instance: &mut dyn Any, args: Vec<Value>| {
                    let expected = <[&str]>::len(&[$(stringify!($arg)),*]);
                    check_count(expected, args.len())?;
                    let receiver = instance.downcast_mut::<S>().ok_or(CallError::Receiver {
                        expected: std::any::type_name::<S>(),
                    })?;
                    let mut args = args.into_iter().enumerate();
                    $(
                        let (index, value) = args.next().ok_or(CallError::ArgumentCount { expected, got: 0 })?;
                        let $arg = take_arg::<$arg>(index, value)?;
                    )*
                    Ok(Box::new((self)(receiver, $($arg),*)) as Value)
                })
            }
        }
    };
}

impl_callables!();
impl_callables!(A0);
impl_callables!(A0, A1);
impl_callables!(A0, A1, A2);
impl_callables!(A0, A1, A2, A3);
