use std::cmp::Reverse;

use log::{debug, info};

use super::tree::{GrowDirection, PlacementTree};
use super::{Layout, PackingConstraints, PlacementEntry, Rect};
use crate::error::SheetError;

/// Anything the engine can place: a named rectangle
pub trait Packable {
    fn name(&self) -> &str;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

impl<S: AsRef<str>> Packable for (S, u32, u32) {
    fn name(&self) -> &str {
        self.0.as_ref()
    }

    fn width(&self) -> u32 {
        self.1
    }

    fn height(&self) -> u32 {
        self.2
    }
}

/// Compute a placement for every item under the given constraints.
///
/// Items are placed largest first (by longer side, then shorter side, then
/// input order). Each item occupies `width + padding` x `height + padding`
/// on the canvas, so neighbours and the sheet's right/bottom edges are kept
/// `padding` pixels apart. The returned entries are in input order and carry
/// the unpadded size.
pub fn pack<P: Packable>(
    items: &[P],
    constraints: &PackingConstraints,
) -> Result<Layout, SheetError> {
    if items.is_empty() {
        return Err(SheetError::NoImages);
    }

    for item in items {
        validate(item, constraints)?;
    }

    let mut packer = GrowingPacker::new(*constraints);
    let mut placed = Vec::with_capacity(items.len());

    for i in packing_order(items) {
        let item = &items[i];
        let spot = packer.place(item.name(), footprint(item, constraints))?;
        debug!(
            "Placed '{}' ({}x{}) at ({}, {})",
            item.name(),
            item.width(),
            item.height(),
            spot.x,
            spot.y
        );
        placed.push((i, spot));
    }

    let (width, height) = packer.finish()?;

    placed.sort_by_key(|&(i, _)| i);
    let entries = placed
        .into_iter()
        .map(|(i, spot)| PlacementEntry {
            name: items[i].name().to_string(),
            x: spot.x,
            y: spot.y,
            width: items[i].width(),
            height: items[i].height(),
        })
        .collect();

    let layout = Layout {
        width,
        height,
        entries,
    };

    info!(
        "Sheet {}x{} with {} sprites ({:.1}% efficiency)",
        layout.width,
        layout.height,
        layout.entries.len(),
        layout.occupancy() * 100.0
    );

    Ok(layout)
}

/// Indices of `items` in placement order: longer side descending, shorter side
/// descending, then input order.
pub fn packing_order<P: Packable>(items: &[P]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    indices.sort_by_key(|&i| {
        let (w, h) = (items[i].width(), items[i].height());
        (Reverse(w.max(h)), Reverse(w.min(h)), i)
    });
    indices
}

fn footprint<P: Packable>(item: &P, constraints: &PackingConstraints) -> (u32, u32) {
    (
        item.width().saturating_add(constraints.padding),
        item.height().saturating_add(constraints.padding),
    )
}

fn validate<P: Packable>(item: &P, constraints: &PackingConstraints) -> Result<(), SheetError> {
    if item.width() == 0 || item.height() == 0 {
        return Err(SheetError::EmptySprite {
            name: item.name().to_string(),
            width: item.width(),
            height: item.height(),
        });
    }

    let (w, h) = footprint(item, constraints);
    if !constraints.within_limits(w, h) {
        return Err(SheetError::SpriteTooLarge {
            name: item.name().to_string(),
            width: item.width(),
            height: item.height(),
            max_width: constraints.max_width,
            max_height: constraints.max_height,
        });
    }

    Ok(())
}

/// Placement tree plus the policy for growing it within the constraints
struct GrowingPacker {
    constraints: PackingConstraints,
    tree: Option<PlacementTree>,
}

impl GrowingPacker {
    fn new(constraints: PackingConstraints) -> Self {
        Self {
            constraints,
            tree: None,
        }
    }

    /// Place a footprint, growing the canvas if no free region fits it
    fn place(&mut self, name: &str, (w, h): (u32, u32)) -> Result<Rect, SheetError> {
        let tree = match self.tree.take() {
            Some(tree) => tree,
            None => self.initial_tree(name, w, h)?,
        };
        let tree = self.tree.insert(tree);

        if let Some(spot) = tree.insert(w, h) {
            return Ok(spot);
        }

        let (direction, (new_w, new_h)) = grow_target(&self.constraints, tree, name, w, h)?;
        debug!(
            "Growing canvas {:?} from {}x{} to {}x{} for '{}'",
            direction,
            tree.width(),
            tree.height(),
            new_w,
            new_h,
            name
        );
        tree.grow(new_w, new_h, direction);

        tree.insert(w, h).ok_or_else(|| SheetError::SheetOverflow {
            name: name.to_string(),
            required_width: new_w,
            required_height: new_h,
            max_width: self.constraints.max_width,
            max_height: self.constraints.max_height,
        })
    }

    /// The canvas starts as the first (largest) footprint, rounded to the constraints
    fn initial_tree(&self, name: &str, w: u32, h: u32) -> Result<PlacementTree, SheetError> {
        let (cw, ch) = self.constraints.round_up(w, h);
        if !self.constraints.within_limits(cw, ch) {
            return Err(self.overflow(name, cw, ch));
        }
        Ok(PlacementTree::new(cw, ch))
    }

    /// Final sheet size: the canvas, rounded up (never down) to the constraints
    fn finish(&self) -> Result<(u32, u32), SheetError> {
        let (w, h) = self
            .tree
            .as_ref()
            .map_or((0, 0), |t| (t.width(), t.height()));
        let (w, h) = self.constraints.round_up(w, h);
        if !self.constraints.within_limits(w, h) {
            return Err(self.overflow("", w, h));
        }
        Ok((w, h))
    }

    fn overflow(&self, name: &str, w: u32, h: u32) -> SheetError {
        SheetError::SheetOverflow {
            name: name.to_string(),
            required_width: w,
            required_height: h,
            max_width: self.constraints.max_width,
            max_height: self.constraints.max_height,
        }
    }
}

/// Pick how to grow a canvas that has no room for a `w` x `h` footprint.
///
/// The smaller dimension grows first (width on a tie). Growing right adds
/// `w` to the width, growing down adds `h` to the height; the other dimension
/// only grows if the footprint would not fit otherwise. Power-of-two and
/// square rounding is applied to the candidate, so power-of-two canvases grow
/// by doubling. Square canvases take whichever direction yields the smaller
/// side. If the preferred direction exceeds the maximum the other one is tried.
fn grow_target(
    constraints: &PackingConstraints,
    tree: &PlacementTree,
    name: &str,
    w: u32,
    h: u32,
) -> Result<(GrowDirection, (u32, u32)), SheetError> {
    let (cw, ch) = (tree.width(), tree.height());
    let right = constraints.round_up(cw.saturating_add(w), ch.max(h));
    let down = constraints.round_up(cw.max(w), ch.saturating_add(h));

    let prefer_right = if constraints.square {
        right.0 <= down.0
    } else {
        cw <= ch
    };

    let candidates = if prefer_right {
        [(GrowDirection::Right, right), (GrowDirection::Down, down)]
    } else {
        [(GrowDirection::Down, down), (GrowDirection::Right, right)]
    };

    if let Some(&found) = candidates
        .iter()
        .find(|(_, (gw, gh))| constraints.within_limits(*gw, *gh))
    {
        return Ok(found);
    }

    let (_, (required_width, required_height)) = candidates[0];
    Err(SheetError::SheetOverflow {
        name: name.to_string(),
        required_width,
        required_height,
        max_width: constraints.max_width,
        max_height: constraints.max_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    fn constraints(padding: u32) -> PackingConstraints {
        PackingConstraints::new(4096, 4096).padding(padding)
    }

    #[test]
    fn test_trivial_pack() {
        let layout = pack(&[("a", 10, 10)], &constraints(0)).unwrap();

        assert_eq!((layout.width, layout.height), (10, 10));
        assert_eq!(layout.entries.len(), 1);
        assert_eq!(layout.entries[0].rect(), Rect::new(0, 0, 10, 10));
    }

    #[test]
    fn test_padding_enforced() {
        let layout = pack(&[("a", 10, 10), ("b", 10, 10)], &constraints(2)).unwrap();

        let a = layout.entries[0].rect();
        let b = layout.entries[1].rect();
        assert_eq!(a, Rect::new(0, 0, 10, 10));
        assert_eq!(b, Rect::new(12, 0, 10, 10));
        assert_eq!((layout.width, layout.height), (24, 12));
        assert!(!a.padded(2).intersects(&b.padded(2)));
    }

    #[test]
    fn test_power_of_two_growth() {
        // Tightest packing is 130x90
        let items = [("tall", 66, 90), ("a", 64, 45), ("b", 64, 45)];
        let c = constraints(0).power_of_two(true);
        let layout = pack(&items, &c).unwrap();

        assert_eq!((layout.width, layout.height), (256, 128));
        assert_eq!(layout.entries[0].rect(), Rect::new(0, 0, 66, 90));
        assert_eq!(layout.entries[1].rect(), Rect::new(128, 0, 64, 45));
    }

    #[test]
    fn test_overflow_single_image() {
        let err = pack(&[("huge", 5000, 5000)], &constraints(0)).unwrap_err();

        assert_eq!(err.kind(), FailureKind::Pack);
        assert!(matches!(err, SheetError::SpriteTooLarge { ref name, .. } if name == "huge"));
    }

    #[test]
    fn test_overflow_during_growth() {
        let items = [("a", 60, 60), ("b", 60, 60), ("c", 60, 60), ("d", 60, 60)];
        let err = pack(&items, &PackingConstraints::new(100, 100).padding(0)).unwrap_err();

        assert!(matches!(err, SheetError::SheetOverflow { ref name, .. } if name == "b"));
        assert_eq!(err.kind(), FailureKind::Pack);
    }

    #[test]
    fn test_padding_counts_against_maximum() {
        // 4096 + 1 px padding no longer fits a 4096 sheet
        let err = pack(&[("edge", 4096, 10)], &constraints(1)).unwrap_err();
        assert!(matches!(err, SheetError::SpriteTooLarge { .. }));

        assert!(pack(&[("edge", 4096, 10)], &constraints(0)).is_ok());
    }

    #[test]
    fn test_growth_falls_back_to_other_axis() {
        let items = [("a", 60, 60), ("b", 60, 60)];
        let layout = pack(&items, &PackingConstraints::new(100, 200).padding(0)).unwrap();

        assert_eq!((layout.width, layout.height), (60, 120));
        assert_eq!(layout.entries[1].rect(), Rect::new(0, 60, 60, 60));
    }

    #[test]
    fn test_pow2_initial_canvas_over_non_pow2_max() {
        // 260 rounds to 512, which exceeds a 300 px limit
        let c = PackingConstraints::new(300, 300).padding(0).power_of_two(true);
        let err = pack(&[("a", 260, 10)], &c).unwrap_err();
        assert!(matches!(err, SheetError::SheetOverflow { .. }));
    }

    #[test]
    fn test_square_constraint() {
        let items = [("wide", 120, 16), ("box", 40, 40)];
        let layout = pack(&items, &constraints(2).square(true)).unwrap();

        assert_eq!(layout.width, layout.height);
        for e in &layout.entries {
            assert!(e.x + e.width <= layout.width);
            assert!(e.y + e.height <= layout.height);
        }
    }

    #[test]
    fn test_ordering_policy() {
        let items = [
            ("small", 5, 5),
            ("wide", 30, 10),
            ("tall", 10, 30),
            ("big", 30, 20),
            ("wide2", 30, 10),
        ];
        let order = packing_order(&items);

        // big (30/20) before wide/tall (30/10); ties keep input order
        assert_eq!(order, vec![3, 1, 2, 4, 0]);
    }

    #[test]
    fn test_entries_in_input_order() {
        let items = [("small", 4, 4), ("big", 32, 32), ("mid", 16, 16)];
        let layout = pack(&items, &constraints(1)).unwrap();

        let names: Vec<_> = layout.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["small", "big", "mid"]);
        assert_eq!(layout.get("big").unwrap().rect(), Rect::new(0, 0, 32, 32));
    }

    #[test]
    fn test_empty_input() {
        let items: [(&str, u32, u32); 0] = [];
        assert!(matches!(
            pack(&items, &constraints(1)),
            Err(SheetError::NoImages)
        ));
    }

    #[test]
    fn test_zero_sized_sprite() {
        let err = pack(&[("flat", 10, 0)], &constraints(0)).unwrap_err();
        assert!(matches!(err, SheetError::EmptySprite { .. }));
    }

    #[test]
    fn test_deterministic() {
        let items: Vec<_> = (0..40u32)
            .map(|i| (format!("s{}", i), 5 + (i * 7) % 23, 3 + (i * 11) % 19))
            .collect();
        let c = constraints(1);

        assert_eq!(pack(&items, &c).unwrap(), pack(&items, &c).unwrap());
    }
}
