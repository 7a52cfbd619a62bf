//=========================================================================
// Event Listeners
//=========================================================================
//
// Parameter-aware wrappers around plain callbacks.
//
// A broadcast either carries no parameter (`invoke`) or carries one
// type-erased parameter (`invoke_with`). Each listener decides whether
// the parameter fits and whether to fire without one.
//
//   CallbackListener    : fires on every broadcast, ignores parameters
//   TypedListener<T>    : fires with `Some(&T)` when the parameter is a T
//   DynamicListener     : same, checked against a runtime `TypeId`
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, Any, TypeId};
use std::fmt;

use log::trace;

//=== EventListener Trait =================================================

/// Receiver side of a named event.
pub trait EventListener {
    /// Called for a broadcast without a parameter.
    fn invoke(&mut self);

    /// Called for a broadcast carrying `parameter`.
    fn invoke_with(&mut self, parameter: &dyn Any);
}

//=== CallbackListener ====================================================

/// Listener that fires on every broadcast and ignores any parameter.
pub struct CallbackListener {
    callback: Box<dyn FnMut()>,
}

impl CallbackListener {
    pub fn new<C>(callback: C) -> Self
    where
        C: FnMut() + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl EventListener for CallbackListener {
    fn invoke(&mut self) {
        (self.callback)();
    }

    fn invoke_with(&mut self, _parameter: &dyn Any) {
        (self.callback)();
    }
}

impl fmt::Debug for CallbackListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackListener").finish_non_exhaustive()
    }
}

//=== TypedListener =======================================================

/// Listener that requires a parameter of type `T`.
///
/// The callback receives `Some(&T)` when the broadcast parameter is a `T`.
/// With [`TypedListener::fire_without_parameter`] enabled it also receives
/// `None` for parameterless broadcasts and for parameters of another type.
///
/// ```rust
/// # use aetheric_ui::prelude::*;
/// let mut listener = TypedListener::new(|score: Option<&u32>| {
///     assert_eq!(score, Some(&10));
/// });
/// listener.invoke_with(&10u32);
/// listener.invoke(); // ignored: no parameter
/// ```
pub struct TypedListener<T> {
    callback: Box<dyn FnMut(Option<&T>)>,
    fire_without_parameter: bool,
}

impl<T: 'static> TypedListener<T> {
    pub fn new<C>(callback: C) -> Self
    where
        C: FnMut(Option<&T>) + 'static,
    {
        Self {
            callback: Box::new(callback),
            fire_without_parameter: false,
        }
    }

    /// Whether the callback also fires (with `None`) when no matching
    /// parameter is available. Default: `false`.
    pub fn fire_without_parameter(mut self, enabled: bool) -> Self {
        self.fire_without_parameter = enabled;
        self
    }
}

impl<T: 'static> EventListener for TypedListener<T> {
    fn invoke(&mut self) {
        if self.fire_without_parameter {
            (self.callback)(None);
        }
    }

    fn invoke_with(&mut self, parameter: &dyn Any) {
        match parameter.downcast_ref::<T>() {
            Some(value) => (self.callback)(Some(value)),
            None if self.fire_without_parameter => (self.callback)(None),
            None => trace!("Listener for {} skipped a mismatched parameter", type_name::<T>()),
        }
    }
}

impl<T> fmt::Debug for TypedListener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedListener")
            .field("parameter", &type_name::<T>())
            .field("fire_without_parameter", &self.fire_without_parameter)
            .finish()
    }
}

//=== DynamicListener =====================================================

/// Listener whose required parameter type is only known at runtime.
///
/// Same firing rules as [`TypedListener`], with the parameter compared
/// against a stored [`TypeId`].
pub struct DynamicListener {
    expected: TypeId,
    expected_name: &'static str,
    callback: Box<dyn FnMut(Option<&dyn Any>)>,
    fire_without_parameter: bool,
}

impl DynamicListener {
    /// Creates a listener expecting parameters with the given type id.
    pub fn new<C>(expected: TypeId, callback: C) -> Self
    where
        C: FnMut(Option<&dyn Any>) + 'static,
    {
        Self {
            expected,
            expected_name: "<dynamic>",
            callback: Box::new(callback),
            fire_without_parameter: false,
        }
    }

    /// Creates a listener expecting parameters of type `T`.
    pub fn of<T: Any, C>(callback: C) -> Self
    where
        C: FnMut(Option<&dyn Any>) + 'static,
    {
        Self {
            expected_name: type_name::<T>(),
            ..Self::new(TypeId::of::<T>(), callback)
        }
    }

    /// See [`TypedListener::fire_without_parameter`].
    ///
    /// When enabled, parameterless broadcasts also call back, with `None`.
    pub fn fire_without_parameter(mut self, enabled: bool) -> Self {
        self.fire_without_parameter = enabled;
        self
    }

    /// The parameter type this listener accepts.
    pub fn expected_type(&self) -> TypeId {
        self.expected
    }
}

impl EventListener for DynamicListener {
    /// Calls back with `None` when `fire_without_parameter` is set, and
    /// does nothing otherwise.
    fn invoke(&mut self) {
        if self.fire_without_parameter {
            (self.callback)(None);
        }
    }

    fn invoke_with(&mut self, parameter: &dyn Any) {
        if Any::type_id(parameter) == self.expected {
            (self.callback)(Some(parameter));
        } else if self.fire_without_parameter {
            (self.callback)(None);
        } else {
            trace!("Listener for {} skipped a mismatched parameter", self.expected_name);
        }
    }
}

impl fmt::Debug for DynamicListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicListener")
            .field("expected", &self.expected_name)
            .field("fire_without_parameter", &self.fire_without_parameter)
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
