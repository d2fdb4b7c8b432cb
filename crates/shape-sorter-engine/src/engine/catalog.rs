use crate::core::{
    BOARD_SIZE,
    shape::{Shape, ShapeColor, ShapeMask},
};

use super::rng::SeededRng;

/// One entry of a shape catalog: a mask, its selection weight and its palette.
#[derive(Debug, Clone, Copy)]
pub struct ShapeTemplate {
    name: &'static str,
    mask: ShapeMask,
    weight: u32,
    palette: &'static [ShapeColor],
}

impl ShapeTemplate {
    #[must_use]
    pub const fn new(
        name: &'static str,
        rows: &[&str],
        weight: u32,
        palette: &'static [ShapeColor],
    ) -> Self {
        let mask = ShapeMask::from_rows(rows);
        assert!(mask.width() <= BOARD_SIZE && mask.height() <= BOARD_SIZE);
        assert!(weight > 0, "template weight must be positive");
        assert!(!palette.is_empty(), "template palette must not be empty");
        Self {
            name,
            mask,
            weight,
            palette,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn mask(&self) -> &ShapeMask {
        &self.mask
    }

    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    #[must_use]
    pub const fn palette(&self) -> &'static [ShapeColor] {
        self.palette
    }

    fn pick_color(&self, value: f64) -> ShapeColor {
        self.palette[scale_index(value, self.palette.len())]
    }
}

/// Maps a value in `[0, 1)` onto `0..len`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scale_index(value: f64, len: usize) -> usize {
    let index = (value * len as f64) as usize;
    index.min(len - 1)
}

/// Fixed, ordered list of shape templates with a weighted draw.
///
/// The draw consumes exactly two values from the generator, template first and
/// color second, so the shape sequence is a pure function of the seed.
///
/// # Example
///
/// ```
/// use shape_sorter_engine::{GameSeed, ShapeCatalog};
///
/// let seed: GameSeed = "abc".parse().unwrap();
/// let (first, rng) = ShapeCatalog::STANDARD.draw(seed.rng());
/// let (second, _) = ShapeCatalog::STANDARD.draw(rng);
///
/// let (replayed, _) = ShapeCatalog::STANDARD.draw(seed.rng());
/// assert_eq!(first, replayed);
/// # let _ = second;
/// ```
#[derive(Debug)]
pub struct ShapeCatalog {
    templates: &'static [ShapeTemplate],
    total_weight: u32,
}

impl ShapeCatalog {
    pub const STANDARD: Self = Self::new(&STANDARD_TEMPLATES);

    #[must_use]
    pub const fn new(templates: &'static [ShapeTemplate]) -> Self {
        assert!(!templates.is_empty(), "catalog must not be empty");
        let mut total_weight = 0;
        let mut i = 0;
        while i < templates.len() {
            total_weight += templates[i].weight;
            i += 1;
        }
        Self {
            templates,
            total_weight,
        }
    }

    #[must_use]
    pub const fn templates(&self) -> &'static [ShapeTemplate] {
        self.templates
    }

    #[must_use]
    pub const fn total_weight(&self) -> u32 {
        self.total_weight
    }

    /// Draws the next shape and returns it with the successor generator state.
    #[must_use]
    pub fn draw(&self, rng: SeededRng) -> (Shape, SeededRng) {
        let (value, rng) = rng.next();
        let template = self.pick_template(value);
        let (value, rng) = rng.next();
        let color = template.pick_color(value);
        (Shape::new(template.mask, color), rng)
    }

    fn pick_template(&self, value: f64) -> &ShapeTemplate {
        let total = self.total_weight as usize;
        let mut target = u32::try_from(scale_index(value, total)).unwrap_or(u32::MAX);
        for template in self.templates {
            if target < template.weight {
                return template;
            }
            target -= template.weight;
        }
        &self.templates[self.templates.len() - 1]
    }
}

const STANDARD_TEMPLATES: [ShapeTemplate; 31] = {
    use ShapeColor::{Blue, Green, Indigo, Orange, Pink, Purple, Red, Teal, Yellow};

    const WARM: &[ShapeColor] = &[Yellow, Orange];
    const HOT: &[ShapeColor] = &[Red, Pink];
    const COOL: &[ShapeColor] = &[Teal, Blue];
    const FRESH: &[ShapeColor] = &[Green, Teal];
    const DEEP: &[ShapeColor] = &[Blue, Indigo];
    const ROYAL: &[ShapeColor] = &[Purple, Pink];
    const DUSK: &[ShapeColor] = &[Purple, Indigo];

    [
        ShapeTemplate::new("monomino", &["#"], 3, WARM),
        ShapeTemplate::new("domino-h", &["##"], 4, HOT),
        ShapeTemplate::new("domino-v", &["#", "#"], 4, HOT),
        ShapeTemplate::new("i3-h", &["###"], 4, COOL),
        ShapeTemplate::new("i3-v", &["#", "#", "#"], 4, COOL),
        ShapeTemplate::new("l3-ne", &["#.", "##"], 3, FRESH),
        ShapeTemplate::new("l3-nw", &[".#", "##"], 3, FRESH),
        ShapeTemplate::new("l3-se", &["##", "#."], 3, FRESH),
        ShapeTemplate::new("l3-sw", &["##", ".#"], 3, FRESH),
        ShapeTemplate::new("square-2", &["##", "##"], 4, WARM),
        ShapeTemplate::new("i4-h", &["####"], 2, DEEP),
        ShapeTemplate::new("i4-v", &["#", "#", "#", "#"], 2, DEEP),
        ShapeTemplate::new("t-down", &["###", ".#."], 2, ROYAL),
        ShapeTemplate::new("t-up", &[".#.", "###"], 2, ROYAL),
        ShapeTemplate::new("t-right", &["#.", "##", "#."], 2, ROYAL),
        ShapeTemplate::new("t-left", &[".#", "##", ".#"], 2, ROYAL),
        ShapeTemplate::new("s-h", &[".##", "##."], 1, &[Green]),
        ShapeTemplate::new("z-h", &["##.", ".##"], 1, &[Red]),
        ShapeTemplate::new("s-v", &["#.", "##", ".#"], 1, &[Green]),
        ShapeTemplate::new("z-v", &[".#", "##", "#."], 1, &[Red]),
        ShapeTemplate::new("l4-v", &["#.", "#.", "##"], 2, WARM),
        ShapeTemplate::new("j4-v", &[".#", ".#", "##"], 2, DEEP),
        ShapeTemplate::new("l4-h", &["###", "#.."], 2, WARM),
        ShapeTemplate::new("j4-h", &["###", "..#"], 2, DEEP),
        ShapeTemplate::new("rect-3x2", &["###", "###"], 1, DUSK),
        ShapeTemplate::new("rect-2x3", &["##", "##", "##"], 1, DUSK),
        ShapeTemplate::new("square-3", &["###", "###", "###"], 1, &[Purple]),
        ShapeTemplate::new("i5-h", &["#####"], 1, &[Teal]),
        ShapeTemplate::new("i5-v", &["#", "#", "#", "#", "#"], 1, &[Teal]),
        ShapeTemplate::new("v5-sw", &["#..", "#..", "###"], 1, ROYAL),
        ShapeTemplate::new("v5-se", &["..#", "..#", "###"], 1, ROYAL),
    ]
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_standard_catalog_invariants() {
        let catalog = &ShapeCatalog::STANDARD;
        assert_eq!(catalog.templates().len(), 31);
        assert_eq!(catalog.total_weight(), 66);

        let mut names = HashSet::new();
        let mut masks = HashSet::new();
        for template in catalog.templates() {
            assert!(names.insert(template.name()), "{}", template.name());
            assert!(masks.insert(*template.mask()), "{}", template.name());
            assert!(template.mask().width() <= BOARD_SIZE);
            assert!(template.mask().height() <= BOARD_SIZE);
            assert!(template.weight() > 0);
            assert!(!template.palette().is_empty());
        }
    }

    #[test]
    fn test_pick_template_boundaries() {
        let catalog = &ShapeCatalog::STANDARD;
        assert_eq!(catalog.pick_template(0.0).name(), "monomino");
        // The monomino covers the first 3 of 66 weight units.
        assert_eq!(catalog.pick_template(2.5 / 66.0).name(), "monomino");
        assert_eq!(catalog.pick_template(3.5 / 66.0).name(), "domino-h");
        assert_eq!(catalog.pick_template(0.999_999).name(), "v5-se");
    }

    #[test]
    fn test_pick_color_covers_palette() {
        let template = &STANDARD_TEMPLATES[1];
        assert_eq!(template.pick_color(0.0), ShapeColor::Red);
        assert_eq!(template.pick_color(0.49), ShapeColor::Red);
        assert_eq!(template.pick_color(0.5), ShapeColor::Pink);
        assert_eq!(template.pick_color(0.999), ShapeColor::Pink);
    }

    #[test]
    fn test_scale_index_clamps() {
        assert_eq!(scale_index(0.0, 5), 0);
        assert_eq!(scale_index(0.999_999_999, 5), 4);
        assert_eq!(scale_index(1.0, 5), 4);
    }

    #[test]
    fn test_draw_consumes_two_values() {
        let rng = SeededRng::from_seed_str("abc");
        let (_, after_draw) = ShapeCatalog::STANDARD.draw(rng.clone());
        let (_, rng) = rng.next();
        let (_, rng) = rng.next();
        assert_eq!(after_draw, rng);
    }

    #[test]
    fn test_draw_is_deterministic() {
        let mut a = SeededRng::from_seed_str("catalog");
        let mut b = SeededRng::from_seed_str("catalog");
        for _ in 0..50 {
            let (shape_a, next_a) = ShapeCatalog::STANDARD.draw(a);
            let (shape_b, next_b) = ShapeCatalog::STANDARD.draw(b);
            assert_eq!(shape_a, shape_b);
            a = next_a;
            b = next_b;
        }
    }

    #[test]
    fn test_draw_uses_every_template_eventually() {
        let catalog = &ShapeCatalog::STANDARD;
        let mut seen = HashSet::new();
        let mut rng = SeededRng::from_u64(2024);
        for _ in 0..5000 {
            let (shape, next) = catalog.draw(rng);
            seen.insert(*shape.mask());
            rng = next;
        }
        assert_eq!(seen.len(), catalog.templates().len());
    }

    #[test]
    fn test_drawn_color_belongs_to_palette() {
        let catalog = &ShapeCatalog::STANDARD;
        let mut rng = SeededRng::from_u64(99);
        for _ in 0..500 {
            let (shape, next) = catalog.draw(rng);
            let template = catalog
                .templates()
                .iter()
                .find(|t| t.mask() == shape.mask())
                .unwrap();
            assert!(template.palette().contains(&shape.color()));
            rng = next;
        }
    }
}
