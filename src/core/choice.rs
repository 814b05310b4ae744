/// Weighted selection among choices, spacings and argument sets.
use crate::core::catalog::PossibilityCatalog;
use crate::core::layout::LayoutError;
use crate::core::random::{random_percentage, RandomSource};
use crate::schema::position::Position;
use crate::schema::possibility::{Choice, WeightedArguments, WeightedSpacing};

/// Anything carrying a relative `percent` weight.
pub trait Weighted {
    fn percent(&self) -> u32;
}

impl Weighted for Choice {
    fn percent(&self) -> u32 {
        self.percent
    }
}

impl Weighted for WeightedSpacing {
    fn percent(&self) -> u32 {
        self.percent
    }
}

impl Weighted for WeightedArguments {
    fn percent(&self) -> u32 {
        self.percent
    }
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn percent(&self) -> u32 {
        (**self).percent()
    }
}

/// Weighted roulette over `choices`.
///
/// An empty list yields `None` and a single entry is returned without
/// drawing. Otherwise a percentage in `[1, 100]` is drawn and the running
/// sum of weights walked until it reaches the draw. Weights summing below
/// the draw yield `None`.
pub fn choose_among<'a, T: Weighted>(
    choices: &'a [T],
    random: &mut dyn RandomSource,
) -> Option<&'a T> {
    match choices {
        [] => None,
        [only] => Some(only),
        _ => {
            let draw = random_percentage(random);
            let mut sum = 0u32;
            choices.iter().find(|choice| {
                sum = sum.saturating_add(choice.percent());
                sum >= draw
            })
        }
    }
}

/// [`choose_among`] restricted to choices whose target fits `position`.
///
/// Fit is measured by the target possibility's nominal size (the `source`
/// for Final choices).
pub fn choose_among_position<'a>(
    choices: &'a [Choice],
    position: &Position,
    catalog: &PossibilityCatalog,
    random: &mut dyn RandomSource,
) -> Result<Option<&'a Choice>, LayoutError> {
    let mut fitting = Vec::with_capacity(choices.len());
    for choice in choices {
        let target = catalog.require(choice.target())?;
        if position.fits(target.width, target.height) {
            fitting.push(choice);
        }
    }
    tracing::trace!(
        candidates = choices.len(),
        fitting = fitting.len(),
        "filtered choices by remaining space"
    );
    Ok(choose_among(&fitting, random).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SequenceSource;
    use crate::schema::possibility::Possibility;

    fn weighted(percents: &[u32]) -> Vec<Choice> {
        percents
            .iter()
            .enumerate()
            .map(|(i, p)| Choice::known(&format!("c{}", i)).with_percent(*p))
            .collect()
    }

    #[test]
    fn empty_yields_none() {
        let mut random = SequenceSource::constant(0.5);
        let empty: Vec<Choice> = Vec::new();
        assert!(choose_among(&empty, &mut random).is_none());
    }

    #[test]
    fn singleton_skips_the_draw() {
        let mut random = SequenceSource::constant(0.5);
        let only = weighted(&[0]);
        let picked = choose_among(&only, &mut random).unwrap();
        assert_eq!(picked.title, "c0");
        assert_eq!(random.draws(), 0);
    }

    #[test]
    fn roulette_walks_running_sum() {
        let choices = weighted(&[30, 30, 40]);
        // draw 1 -> first
        let mut r = SequenceSource::constant(0.0);
        assert_eq!(choose_among(&choices, &mut r).unwrap().title, "c0");
        // draw 30 -> still first (sum reaches draw)
        let mut r = SequenceSource::constant(0.295);
        assert_eq!(choose_among(&choices, &mut r).unwrap().title, "c0");
        // draw 31 -> second
        let mut r = SequenceSource::constant(0.30);
        assert_eq!(choose_among(&choices, &mut r).unwrap().title, "c1");
        // draw 100 -> last
        let mut r = SequenceSource::constant(0.999);
        assert_eq!(choose_among(&choices, &mut r).unwrap().title, "c2");
    }

    #[test]
    fn short_weights_can_miss() {
        let choices = weighted(&[10, 10]);
        let mut r = SequenceSource::constant(0.9);
        assert!(choose_among(&choices, &mut r).is_none());
        assert_eq!(r.draws(), 1);
    }

    #[test]
    fn position_filter_drops_oversized() {
        let mut catalog = PossibilityCatalog::default();
        catalog.insert(Possibility::leaf("Small", 2.0, 2.0));
        catalog.insert(Possibility::leaf("Wide", 9.0, 2.0));
        let choices = vec![
            Choice::known("Wide").with_percent(50),
            Choice::known("Small").with_percent(50),
        ];
        let area = Position::new(4.0, 4.0, 0.0, 0.0);
        let mut r = SequenceSource::constant(0.0);

        let picked = choose_among_position(&choices, &area, &catalog, &mut r)
            .unwrap()
            .unwrap();
        assert_eq!(picked.title, "Small");
        // One candidate left, so no draw was needed
        assert_eq!(r.draws(), 0);
    }

    #[test]
    fn position_filter_none_fit() {
        let mut catalog = PossibilityCatalog::default();
        catalog.insert(Possibility::leaf("Wide", 9.0, 2.0));
        let choices = vec![Choice::known("Wide")];
        let area = Position::new(4.0, 4.0, 0.0, 0.0);
        let mut r = SequenceSource::constant(0.0);
        assert!(choose_among_position(&choices, &area, &catalog, &mut r)
            .unwrap()
            .is_none());
    }

    #[test]
    fn position_filter_unknown_target() {
        let catalog = PossibilityCatalog::default();
        let choices = vec![Choice::known("Ghost")];
        let area = Position::new(4.0, 4.0, 0.0, 0.0);
        let mut r = SequenceSource::constant(0.0);
        let err = choose_among_position(&choices, &area, &catalog, &mut r).unwrap_err();
        assert!(matches!(err, LayoutError::Lookup(name) if name == "Ghost"));
    }
}
