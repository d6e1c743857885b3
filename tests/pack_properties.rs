use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sheetpack::packing::{Layout, PackingConstraints, Rect, pack};
use sheetpack::{FailureKind, SheetError};

fn is_pow2(v: u32) -> bool {
    v != 0 && (v & (v - 1)) == 0
}

fn random_items(seed: u64, count: usize, max_side: u32) -> Vec<(String, u32, u32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            (
                format!("sprite_{}", i),
                rng.gen_range(1..=max_side),
                rng.gen_range(1..=max_side),
            )
        })
        .collect()
}

fn assert_valid(layout: &Layout, items: &[(String, u32, u32)], c: &PackingConstraints) {
    assert_eq!(layout.entries.len(), items.len());

    let sheet = Rect::new(0, 0, layout.width, layout.height);
    for (entry, (name, w, h)) in layout.entries.iter().zip(items) {
        assert_eq!(&entry.name, name);
        assert_eq!((entry.width, entry.height), (*w, *h));
        // The trailing padding margin stays inside the sheet too
        assert!(
            sheet.contains(&entry.rect().padded(c.padding)),
            "{:?} out of sheet",
            entry
        );
    }

    // No overlap, with at least `padding` pixels between neighbours
    for (i, a) in layout.entries.iter().enumerate() {
        for b in &layout.entries[i + 1..] {
            let (pa, pb) = (a.rect().padded(c.padding), b.rect().padded(c.padding));
            assert!(!pa.intersects(&pb), "{:?} and {:?} violate padding", a, b);
        }
    }

    assert!(layout.width <= c.max_width && layout.height <= c.max_height);
    if c.power_of_two {
        assert!(is_pow2(layout.width) && is_pow2(layout.height));
    }
    if c.square {
        assert_eq!(layout.width, layout.height);
    }
}

#[test]
fn random_layouts_hold_invariants() {
    let variants = [
        PackingConstraints::new(4096, 4096).padding(0),
        PackingConstraints::new(4096, 4096).padding(1),
        PackingConstraints::new(4096, 4096).padding(3).power_of_two(true),
        PackingConstraints::new(4096, 4096).padding(2).square(true),
        PackingConstraints::new(4096, 4096)
            .padding(1)
            .power_of_two(true)
            .square(true),
        PackingConstraints::new(2048, 1024).padding(1),
    ];

    for seed in 0..8u64 {
        let items = random_items(seed, 60, 96);
        for c in &variants {
            let layout = pack(&items, c).unwrap();
            assert_valid(&layout, &items, c);
        }
    }
}

#[test]
fn packing_is_deterministic() {
    let items = random_items(42, 120, 64);
    let c = PackingConstraints::new(4096, 4096).padding(2).power_of_two(true);

    let first = pack(&items, &c).unwrap();
    let second = pack(&items, &c).unwrap();

    assert_eq!(first, second);
}

#[test]
fn identical_sizes_keep_input_order() {
    let items: Vec<_> = (0..4).map(|i| (format!("tile_{}", i), 16, 16)).collect();
    let layout = pack(&items, &PackingConstraints::new(4096, 4096).padding(0)).unwrap();

    // First tile seeds the canvas at the origin
    assert_eq!((layout.entries[0].x, layout.entries[0].y), (0, 0));
    assert_valid(
        &layout,
        &items,
        &PackingConstraints::new(4096, 4096).padding(0),
    );
}

#[test]
fn too_many_sprites_fail_as_pack_failure() {
    let items = random_items(7, 200, 64);
    let err = pack(&items, &PackingConstraints::new(128, 128).padding(1)).unwrap_err();

    assert_eq!(err.kind(), FailureKind::Pack);
    assert!(matches!(err, SheetError::SheetOverflow { .. }));
}

#[test]
fn oversized_sprite_fails_before_packing() {
    let items = vec![("ok".to_string(), 10, 10), ("huge".to_string(), 5000, 5000)];
    let err = pack(&items, &PackingConstraints::new(4096, 4096).padding(0)).unwrap_err();

    match err {
        SheetError::SpriteTooLarge { name, .. } => assert_eq!(name, "huge"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sheet_is_reasonably_dense() {
    // 64 equal squares fit an 8x8 grid exactly
    let items: Vec<_> = (0..64).map(|i| (format!("s{}", i), 32, 32)).collect();
    let c = PackingConstraints::new(4096, 4096).padding(0).power_of_two(true);
    let layout = pack(&items, &c).unwrap();

    assert_valid(&layout, &items, &c);
    assert_eq!((layout.width, layout.height), (256, 256));
    assert!((layout.occupancy() - 1.0).abs() < 1e-9);
}
