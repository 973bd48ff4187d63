//! Boundary volumes for stock, model, and job working areas.
//!
//! A [`Bounds`] turns three margin values per side into an absolute box.
//! How the margins are read depends on the [`BoundsType`]:
//!
//! - `RelativeMargin`: margins are fractions of the reference object's
//!   current width on each axis
//! - `FixedMargin`: margins are absolute distances added around the
//!   reference object
//! - `Custom`: margins are the box corners themselves
//!
//! The reference object is described by six [`Resolver`]s (lower and upper
//! extent per axis). Resolvers are called again on every computation, so a
//! `Bounds` bound to a live model follows its edits without any explicit
//! refresh.

use millkit_core::types::{Shared, ThreadSafe};
use millkit_core::{Axis, BoundsError, BoundsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Name given to bounds that were never named explicitly
pub const DEFAULT_BOUNDS_NAME: &str = "No name";

/// Strategy used to derive the absolute box from the margin values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsType {
    /// Margins are fractions of the reference width
    #[default]
    RelativeMargin,
    /// Margins are absolute distances around the reference
    FixedMargin,
    /// Margins are the absolute limits
    Custom,
}

impl BoundsType {
    /// All bounds types in tag order
    pub const ALL: [BoundsType; 3] = [
        BoundsType::RelativeMargin,
        BoundsType::FixedMargin,
        BoundsType::Custom,
    ];

    /// Numeric tag used in persisted settings
    pub fn tag(self) -> u8 {
        match self {
            BoundsType::RelativeMargin => 0,
            BoundsType::FixedMargin => 1,
            BoundsType::Custom => 2,
        }
    }

    /// Look up a bounds type by its numeric tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Whether this type reads the reference object
    pub fn uses_reference(self) -> bool {
        !matches!(self, BoundsType::Custom)
    }
}

impl fmt::Display for BoundsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RelativeMargin => write!(f, "relative_margin"),
            Self::FixedMargin => write!(f, "fixed_margin"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for BoundsType {
    type Err = BoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relative_margin" | "relative" => Ok(Self::RelativeMargin),
            "fixed_margin" | "fixed" => Ok(Self::FixedMargin),
            "custom" => Ok(Self::Custom),
            _ => Err(BoundsError::invalid_argument(format!(
                "unknown bounds type: {:?}",
                s
            ))),
        }
    }
}

/// Decide the type a new `Bounds` ends up with.
///
/// Only `Custom` works without a reference object, so a missing reference
/// side overrides whatever was requested. Without a request the type is
/// `RelativeMargin`.
pub fn effective_bounds_type(requested: Option<BoundsType>, has_references: bool) -> BoundsType {
    if !has_references {
        return BoundsType::Custom;
    }
    requested.unwrap_or_default()
}

/// A source of one reference value, read again on every call
pub trait Resolver {
    /// Current value
    fn resolve(&self) -> f64;
}

impl<F> Resolver for F
where
    F: Fn() -> f64,
{
    fn resolve(&self) -> f64 {
        self()
    }
}

/// A reference value that never changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f64);

impl Resolver for Constant {
    fn resolve(&self) -> f64 {
        self.0
    }
}

/// Reads a value out of a single-threaded shared object
pub struct Binding<T> {
    target: Shared<T>,
    accessor: Box<dyn Fn(&T) -> f64>,
}

impl<T> Binding<T> {
    /// Bind `accessor` to the object behind `target`
    pub fn new(target: &Shared<T>, accessor: impl Fn(&T) -> f64 + 'static) -> Self {
        Self {
            target: Rc::clone(target),
            accessor: Box::new(accessor),
        }
    }
}

impl<T> Resolver for Binding<T> {
    fn resolve(&self) -> f64 {
        (self.accessor)(&*self.target.borrow())
    }
}

/// Reads a value out of a mutex-protected shared object
pub struct SyncBinding<T> {
    target: ThreadSafe<T>,
    accessor: Box<dyn Fn(&T) -> f64 + Send + Sync>,
}

impl<T> SyncBinding<T> {
    /// Bind `accessor` to the object behind `target`
    pub fn new(
        target: &ThreadSafe<T>,
        accessor: impl Fn(&T) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            target: Arc::clone(target),
            accessor: Box::new(accessor),
        }
    }
}

impl<T> Resolver for SyncBinding<T> {
    fn resolve(&self) -> f64 {
        (self.accessor)(&*self.target.lock())
    }
}

/// One reference entry as handed to [`Bounds::new`]: a literal value or a
/// live resolver
pub enum Reference {
    /// A fixed value
    Value(f64),
    /// A value read on demand
    Dynamic(Box<dyn Resolver>),
}

impl Reference {
    /// Wrap a resolver
    pub fn dynamic(resolver: impl Resolver + 'static) -> Self {
        Reference::Dynamic(Box::new(resolver))
    }

    /// Turn the entry into a resolver, wrapping literal values
    pub fn into_resolver(self) -> Box<dyn Resolver> {
        match self {
            Reference::Value(value) => Box::new(Constant(value)),
            Reference::Dynamic(resolver) => resolver,
        }
    }
}

impl From<f64> for Reference {
    fn from(value: f64) -> Self {
        Reference::Value(value)
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Reference::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Reference entries for the x, y and z axes of one side
pub type ReferenceAxes = [Reference; 3];

/// Build reference entries from literal values
pub fn fixed_reference(values: [f64; 3]) -> ReferenceAxes {
    values.map(Reference::Value)
}

/// An object with a lower and upper extent per axis, such as a model
pub trait ReferenceExtent {
    /// Lower corner of the extent
    fn extent_low(&self) -> [f64; 3];
    /// Upper corner of the extent
    fn extent_high(&self) -> [f64; 3];
}

/// Bind the six reference resolvers of a bounds to a shared object
pub fn bind_extent<T>(target: &Shared<T>) -> (ReferenceAxes, ReferenceAxes)
where
    T: ReferenceExtent + 'static,
{
    let low = Axis::ALL.map(|axis| {
        Reference::dynamic(Binding::new(target, move |t: &T| {
            t.extent_low()[axis.index()]
        }))
    });
    let high = Axis::ALL.map(|axis| {
        Reference::dynamic(Binding::new(target, move |t: &T| {
            t.extent_high()[axis.index()]
        }))
    });
    (low, high)
}

fn zero_resolvers() -> [Box<dyn Resolver>; 3] {
    [(); 3].map(|_| Box::new(Constant(0.0)) as Box<dyn Resolver>)
}

fn vector3(values: &[f64], side: &str) -> BoundsResult<[f64; 3]> {
    <[f64; 3]>::try_from(values).map_err(|_| {
        BoundsError::invalid_argument(format!(
            "{} bounds should be supplied as 3 items - but {} were given",
            side,
            values.len()
        ))
    })
}

/// A boundary volume relative to an optional reference object
pub struct Bounds {
    name: String,
    bounds_type: BoundsType,
    bounds_low: [f64; 3],
    bounds_high: [f64; 3],
    ref_low: [Box<dyn Resolver>; 3],
    ref_high: [Box<dyn Resolver>; 3],
}

impl Bounds {
    /// Create a new bounds instance
    ///
    /// * `bounds_type` - requested strategy, `RelativeMargin` if omitted
    /// * `bounds_low`/`bounds_high` - margins (or limits for `Custom`), 3
    ///   values each, zero if omitted
    /// * `ref_low`/`ref_high` - reference object extent; if either side is
    ///   omitted the type is forced to `Custom`
    pub fn new(
        bounds_type: Option<BoundsType>,
        bounds_low: Option<&[f64]>,
        bounds_high: Option<&[f64]>,
        ref_low: Option<ReferenceAxes>,
        ref_high: Option<ReferenceAxes>,
    ) -> BoundsResult<Self> {
        let has_references = ref_low.is_some() && ref_high.is_some();
        let determined = effective_bounds_type(bounds_type, has_references);
        if let Some(requested) = bounds_type {
            if requested != determined {
                warn!(
                    "No reference object given, using {} bounds instead of {}",
                    determined, requested
                );
            }
        }

        let bounds_low = bounds_low.map_or(Ok([0.0; 3]), |v| vector3(v, "lower"))?;
        let bounds_high = bounds_high.map_or(Ok([0.0; 3]), |v| vector3(v, "upper"))?;

        let ref_low =
            ref_low.map_or_else(zero_resolvers, |refs| refs.map(Reference::into_resolver));
        let ref_high =
            ref_high.map_or_else(zero_resolvers, |refs| refs.map(Reference::into_resolver));

        Ok(Self {
            name: DEFAULT_BOUNDS_NAME.to_string(),
            bounds_type: determined,
            bounds_low,
            bounds_high,
            ref_low,
            ref_high,
        })
    }

    /// Bounds given directly as absolute limits
    pub fn custom(low: [f64; 3], high: [f64; 3]) -> Self {
        Self {
            name: DEFAULT_BOUNDS_NAME.to_string(),
            bounds_type: BoundsType::Custom,
            bounds_low: low,
            bounds_high: high,
            ref_low: zero_resolvers(),
            ref_high: zero_resolvers(),
        }
    }

    /// Bounds with margins relative to a reference object
    pub fn with_reference(
        bounds_type: BoundsType,
        margin_low: [f64; 3],
        margin_high: [f64; 3],
        ref_low: ReferenceAxes,
        ref_high: ReferenceAxes,
    ) -> Self {
        Self {
            name: DEFAULT_BOUNDS_NAME.to_string(),
            bounds_type,
            bounds_low: margin_low,
            bounds_high: margin_high,
            ref_low: ref_low.map(Reference::into_resolver),
            ref_high: ref_high.map(Reference::into_resolver),
        }
    }

    /// Set the display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current bounds type
    pub fn bounds_type(&self) -> BoundsType {
        self.bounds_type
    }

    /// Change the bounds type without touching the margin values
    pub fn set_type(&mut self, bounds_type: BoundsType) {
        self.bounds_type = bounds_type;
    }

    /// Change the bounds type from its numeric tag
    pub fn set_type_tag(&mut self, tag: u8) -> BoundsResult<()> {
        let bounds_type = BoundsType::from_tag(tag).ok_or_else(|| {
            BoundsError::invalid_argument(format!("invalid value of 'bounds_type': {}", tag))
        })?;
        self.set_type(bounds_type);
        Ok(())
    }

    /// Change the bounds type from its name
    pub fn set_type_name(&mut self, name: &str) -> BoundsResult<()> {
        let bounds_type = name.parse()?;
        self.set_type(bounds_type);
        Ok(())
    }

    /// The raw margin (or limit) values of both sides
    pub fn bounds(&self) -> ([f64; 3], [f64; 3]) {
        (self.bounds_low, self.bounds_high)
    }

    /// Replace the raw margin values; an omitted side stays as it is
    ///
    /// Nothing changes unless every given side has exactly 3 entries.
    pub fn set_bounds(&mut self, low: Option<&[f64]>, high: Option<&[f64]>) -> BoundsResult<()> {
        let low = low.map(|v| vector3(v, "lower")).transpose()?;
        let high = high.map(|v| vector3(v, "upper")).transpose()?;
        if let Some(low) = low {
            self.bounds_low = low;
        }
        if let Some(high) = high {
            self.bounds_high = high;
        }
        Ok(())
    }

    /// Current extent of the reference object
    pub fn reference_limits(&self) -> ([f64; 3], [f64; 3]) {
        (
            std::array::from_fn(|i| self.ref_low[i].resolve()),
            std::array::from_fn(|i| self.ref_high[i].resolve()),
        )
    }

    /// Calculate the current absolute limits
    ///
    /// Reference resolvers are evaluated on each call.
    pub fn absolute_limits(&self) -> ([f64; 3], [f64; 3]) {
        let mut low = [0.0; 3];
        let mut high = [0.0; 3];
        match self.bounds_type {
            BoundsType::RelativeMargin => {
                for i in 0..3 {
                    let ref_low = self.ref_low[i].resolve();
                    let ref_high = self.ref_high[i].resolve();
                    let dim_width = ref_high - ref_low;
                    low[i] = ref_low - self.bounds_low[i] * dim_width;
                    high[i] = ref_high + self.bounds_high[i] * dim_width;
                }
            }
            BoundsType::FixedMargin => {
                for i in 0..3 {
                    low[i] = self.ref_low[i].resolve() - self.bounds_low[i];
                    high[i] = self.ref_high[i].resolve() + self.bounds_high[i];
                }
            }
            BoundsType::Custom => {
                low = self.bounds_low;
                high = self.bounds_high;
            }
        }
        (low, high)
    }

    /// Change the margin values so that the current references produce the
    /// given absolute limits. The bounds type is kept.
    ///
    /// For `RelativeMargin` a zero-width reference on any axis fails with
    /// [`BoundsError::DegenerateReference`] and leaves the margins untouched.
    pub fn adjust_bounds_to_absolute_limits(
        &mut self,
        limits_low: &[f64],
        limits_high: &[f64],
    ) -> BoundsResult<()> {
        let limits_low = vector3(limits_low, "lower")?;
        let limits_high = vector3(limits_high, "upper")?;

        let (new_low, new_high) = match self.bounds_type {
            BoundsType::RelativeMargin => {
                let mut new_low = [0.0; 3];
                let mut new_high = [0.0; 3];
                for axis in Axis::ALL {
                    let i = axis.index();
                    let ref_low = self.ref_low[i].resolve();
                    let ref_high = self.ref_high[i].resolve();
                    let dim_width = ref_high - ref_low;
                    if dim_width == 0.0 {
                        warn!(
                            "Cannot derive relative margins for '{}': zero-width {} reference",
                            self.name, axis
                        );
                        return Err(BoundsError::DegenerateReference {
                            axis,
                            low: ref_low,
                            high: ref_high,
                        });
                    }
                    new_low[i] = (ref_low - limits_low[i]) / dim_width;
                    new_high[i] = (limits_high[i] - ref_high) / dim_width;
                }
                (new_low, new_high)
            }
            BoundsType::FixedMargin => {
                let (ref_low, ref_high) = self.reference_limits();
                (
                    std::array::from_fn(|i| ref_low[i] - limits_low[i]),
                    std::array::from_fn(|i| limits_high[i] - ref_high[i]),
                )
            }
            BoundsType::Custom => (limits_low, limits_high),
        };

        debug!(
            "Adjusted {} bounds '{}': low={:?} high={:?}",
            self.bounds_type, self.name, new_low, new_high
        );
        self.bounds_low = new_low;
        self.bounds_high = new_high;
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::custom([0.0; 3], [0.0; 3])
    }
}

impl fmt::Debug for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bounds")
            .field("name", &self.name)
            .field("bounds_type", &self.bounds_type)
            .field("bounds_low", &self.bounds_low)
            .field("bounds_high", &self.bounds_high)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use millkit_core::types::shared;

    #[test]
    fn test_effective_type() {
        assert_eq!(effective_bounds_type(None, true), BoundsType::RelativeMargin);
        assert_eq!(
            effective_bounds_type(Some(BoundsType::FixedMargin), true),
            BoundsType::FixedMargin
        );
        assert_eq!(
            effective_bounds_type(Some(BoundsType::FixedMargin), false),
            BoundsType::Custom
        );
        assert_eq!(effective_bounds_type(None, false), BoundsType::Custom);
    }

    #[test]
    fn test_missing_reference_forces_custom() {
        let bounds = Bounds::new(
            Some(BoundsType::RelativeMargin),
            None,
            None,
            Some(fixed_reference([0.0; 3])),
            None,
        )
        .unwrap();
        assert_eq!(bounds.bounds_type(), BoundsType::Custom);
        assert_eq!(bounds.name(), DEFAULT_BOUNDS_NAME);
    }

    #[test]
    fn test_type_tags() {
        for t in BoundsType::ALL {
            assert_eq!(BoundsType::from_tag(t.tag()), Some(t));
        }
        assert_eq!(BoundsType::from_tag(3), None);
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("fixed".parse::<BoundsType>(), Ok(BoundsType::FixedMargin));
        assert_eq!(
            "relative_margin".parse::<BoundsType>(),
            Ok(BoundsType::RelativeMargin)
        );
        assert!(matches!(
            "bogus".parse::<BoundsType>(),
            Err(BoundsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_closure_and_binding_resolvers() {
        let cell = shared(2.0);
        let binding = Binding::new(&cell, |v: &f64| *v * 2.0);
        let closure = || 7.5;
        assert_eq!(binding.resolve(), 4.0);
        *cell.borrow_mut() = 3.0;
        assert_eq!(binding.resolve(), 6.0);
        assert_eq!(closure.resolve(), 7.5);
        assert_eq!(Constant(1.5).resolve(), 1.5);
    }

    #[test]
    fn test_reference_debug() {
        assert_eq!(format!("{:?}", Reference::from(1.0)), "Value(1.0)");
        assert_eq!(format!("{:?}", Reference::dynamic(|| 1.0)), "Dynamic(..)");
    }

    #[test]
    fn test_set_bounds_keeps_values_on_error() {
        let mut bounds = Bounds::custom([1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
        let result = bounds.set_bounds(Some(&[0.0, 0.0, 0.0]), Some(&[5.0]));
        assert!(result.is_err());
        assert_eq!(bounds.bounds(), ([1.0, 1.0, 1.0], [2.0, 2.0, 2.0]));
    }

    #[test]
    fn test_debug_omits_resolvers() {
        let bounds = Bounds::default();
        let text = format!("{:?}", bounds);
        assert!(text.starts_with("Bounds { name: \"No name\", bounds_type: Custom"));
        assert!(text.ends_with(".. }"));
    }
}
