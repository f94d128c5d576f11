use crate::foundation::error::{AnimateError, AnimateResult};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` by `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for i64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + (*b as f64 - *a as f64) * t).round() as i64
    }
}

/// A packed `0xAARRGGBB` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Argb(pub u32);

impl Argb {
    fn channel(self, shift: u32) -> u8 {
        ((self.0 >> shift) & 0xff) as u8
    }
}

impl Lerp for Argb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u32 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u32
        }

        let mut out = 0u32;
        for shift in [24, 16, 8, 0] {
            out |= lerp_u8(a.channel(shift), b.channel(shift), t) << shift;
        }
        Self(out)
    }
}

/// How keyframe numbers are interpreted when interpolated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Plain floating point values.
    #[default]
    Float,
    /// Integer values, rounded to the nearest integer.
    Int,
    /// Packed `0xAARRGGBB` colors interpolated per channel.
    Argb,
}

/// The current value of an animated node.
///
/// Leaf nodes report their interpolated keyframe value; container nodes carry no value of their
/// own and report progress through their window as [`Value::Float`] in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// Floating point value.
    Float(f64),
    /// Integer value.
    Int(i64),
    /// Packed color.
    Argb(Argb),
}

impl Value {
    /// Numeric view of the value (colors are returned as their packed integer).
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Float(v) => v,
            Self::Int(v) => v as f64,
            Self::Argb(c) => f64::from(c.0),
        }
    }
}

/// Evenly spaced keyframe values over one animation cycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes {
    /// Keyframe values, first at progress 0, last at progress 1.
    pub values: Vec<f64>,
    /// Interpretation of the values.
    pub kind: ValueKind,
}

impl Keyframes {
    /// Float keyframes.
    pub fn floats(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            kind: ValueKind::Float,
        }
    }

    /// Integer keyframes.
    pub fn ints(values: &[i64]) -> Self {
        Self {
            values: values.iter().map(|v| *v as f64).collect(),
            kind: ValueKind::Int,
        }
    }

    /// Color keyframes.
    pub fn argb(values: &[u32]) -> Self {
        Self {
            values: values.iter().map(|v| f64::from(*v)).collect(),
            kind: ValueKind::Argb,
        }
    }

    /// Reject empty, non-finite, or (for colors) non-packed keyframes.
    pub fn validate(&self) -> AnimateResult<()> {
        if self.values.is_empty() {
            return Err(AnimateError::validation(
                "keyframes must contain at least one value",
            ));
        }
        if self.values.iter().any(|v| !v.is_finite()) {
            return Err(AnimateError::validation("keyframe values must be finite"));
        }
        if self.kind == ValueKind::Argb
            && self
                .values
                .iter()
                .any(|v| *v < 0.0 || *v > f64::from(u32::MAX) || v.fract() != 0.0)
        {
            return Err(AnimateError::validation(
                "argb keyframes must be packed 32-bit colors",
            ));
        }
        Ok(())
    }

    /// Sample at eased cycle progress `fraction`.
    ///
    /// Values outside `[0, 1]` are clamped. With a single keyframe the value is constant.
    pub fn sample(&self, fraction: f64) -> Value {
        let n = self.values.len();
        if n == 0 {
            return self.wrap(0.0, 0.0, 0.0);
        }
        if n == 1 {
            return self.wrap(self.values[0], self.values[0], 0.0);
        }
        let f = fraction.clamp(0.0, 1.0);
        let segments = (n - 1) as f64;
        let pos = f * segments;
        let idx = (pos.floor() as usize).min(n - 2);
        let t = pos - idx as f64;
        self.wrap(self.values[idx], self.values[idx + 1], t)
    }

    fn wrap(&self, a: f64, b: f64, t: f64) -> Value {
        match self.kind {
            ValueKind::Float => Value::Float(f64::lerp(&a, &b, t)),
            ValueKind::Int => Value::Int(i64::lerp(&(a as i64), &(b as i64), t)),
            ValueKind::Argb => Value::Argb(Argb::lerp(&Argb(a as u32), &Argb(b as u32), t)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
