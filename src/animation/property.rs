use crate::animation::value::{Keyframes, Value, ValueKind};

/// Getter/setter pair binding an animated value onto some target attribute (a widget width, an
/// alpha, a color...).
///
/// All property flavours share this one shape; what differs is only the pair of functions.
pub trait Property {
    /// Read the current attribute value.
    fn get(&self) -> Value;
    /// Write a new attribute value.
    fn set(&mut self, value: Value);
}

/// [`Property`] built from two closures.
pub struct FnProperty<G, S> {
    get: G,
    set: S,
}

impl<G, S> std::fmt::Debug for FnProperty<G, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProperty").finish_non_exhaustive()
    }
}

impl<G, S> Property for FnProperty<G, S>
where
    G: Fn() -> Value,
    S: FnMut(Value),
{
    fn get(&self) -> Value {
        (self.get)()
    }

    fn set(&mut self, value: Value) {
        (self.set)(value)
    }
}

/// Bind a getter and a setter into a [`Property`].
pub fn property<G, S>(get: G, set: S) -> FnProperty<G, S>
where
    G: Fn() -> Value,
    S: FnMut(Value),
{
    FnProperty { get, set }
}

/// Keyframes running from the property's current value to `to`.
///
/// The value kind follows whatever the property currently reports.
pub fn keyframes_to(prop: &impl Property, to: f64) -> Keyframes {
    let current = prop.get();
    let kind = match current {
        Value::Float(_) => ValueKind::Float,
        Value::Int(_) => ValueKind::Int,
        Value::Argb(_) => ValueKind::Argb,
    };
    Keyframes {
        values: vec![current.as_f64(), to],
        kind,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/property.rs"]
mod tests;
