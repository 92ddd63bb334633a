//! Projection of out-of-range coordinates back into their bounds.

/// Rule for bringing a coordinate that left `[lower, upper]` back inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum BoundaryPolicy {
    /// Project onto the nearest edge.
    #[default]
    Clip,

    /// Mirror across the violated edge, then clip any residual overflow.
    Reflect,

    /// Map modulo the interval width, preserving periodicity.
    ///
    /// The interval is treated as half-open: `upper` maps to `lower`.
    Wrap,
}

impl BoundaryPolicy {
    /// Projects a single coordinate.
    pub fn project(self, value: f64, lower: f64, upper: f64) -> f64 {
        match self {
            BoundaryPolicy::Clip => value.clamp(lower, upper),
            BoundaryPolicy::Reflect => {
                let mut v = value;
                if v < lower {
                    v = lower + (lower - v);
                }
                if v > upper {
                    v = upper - (v - upper);
                }
                v.clamp(lower, upper)
            }
            BoundaryPolicy::Wrap => lower + (value - lower).rem_euclid(upper - lower),
        }
    }

    /// Projects every coordinate of `x` in place.
    ///
    /// `bounds` must have the same length as `x`.
    pub fn apply(self, x: &mut [f64], bounds: &[(f64, f64)]) {
        debug_assert_eq!(x.len(), bounds.len());
        for (v, &(lo, hi)) in x.iter_mut().zip(bounds) {
            *v = self.project(*v, lo, hi);
        }
    }
}
