/// Spacing calculator: turns a spacing rule into a concrete gap.
use crate::core::choice::choose_among;
use crate::core::layout::LayoutError;
use crate::core::random::{random_between, RandomSource};
use crate::schema::possibility::{Spacing, SpacingRange};

/// Resolve `spacing` into a gap, drawing through `random`.
///
/// Constant spacing never draws. A weighted list whose weights miss the
/// draw resolves to no gap at all.
pub fn resolve_spacing(spacing: &Spacing, random: &mut dyn RandomSource) -> Result<f64, LayoutError> {
    match spacing {
        Spacing::None => Ok(0.0),
        Spacing::Constant(gap) => Ok(*gap),
        Spacing::Range(min, max) => {
            check_range(*min, *max)?;
            Ok(random_between(random, *min, *max))
        }
        Spacing::Weighted(options) => match choose_among(options, random) {
            Some(option) => resolve_range(&option.value, random),
            None => {
                tracing::trace!("weighted spacing matched no option, using no gap");
                Ok(0.0)
            }
        },
        Spacing::Units(range) => resolve_range(range, random),
    }
}

fn resolve_range(range: &SpacingRange, random: &mut dyn RandomSource) -> Result<f64, LayoutError> {
    check_range(range.min, range.max)?;
    let units = match range.units {
        Some(units) if units > 0.0 => units,
        Some(units) => {
            return Err(LayoutError::Config(format!(
                "spacing units must be positive, got {}",
                units
            )))
        }
        None => 1.0,
    };
    Ok(random_between(random, range.min / units, range.max / units) * units)
}

fn check_range(min: f64, max: f64) -> Result<(), LayoutError> {
    if min > max {
        return Err(LayoutError::Config(format!(
            "spacing range [{}, {}] has min above max",
            min, max
        )));
    }
    Ok(())
}
