use pokeseal_core::{
    Catalog, GachaError, GachaPool, GachaType, Rarity, RngState, StickerMaster, StickerType,
};

fn master(id: &str, rarity: u8, weight: u32, limited: bool) -> StickerMaster {
    StickerMaster {
        id: id.to_string(),
        name: id.to_string(),
        character: id.to_string(),
        variant: 1,
        rarity: Rarity::new(rarity),
        kind: StickerType::Normal,
        series: "test".to_string(),
        image: format!("/images/{id}.png"),
        base_rate: 100,
        gacha_weight: weight,
        limited,
    }
}

#[test]
fn draw_frequencies_track_weights() {
    let catalog = Catalog::new(vec![
        master("rare", 5, 1, false),
        master("mid", 3, 5, false),
        master("common", 1, 50, false),
    ]);
    let pool = GachaPool::build(&catalog, GachaType::Normal);
    assert_eq!(pool.total_weight(), 56);

    let mut rng = RngState::from_seed(0xBEEF);
    let mut hits = [0u32; 3];
    for _ in 0..100_000 {
        match pool.pull(&mut rng).unwrap().id.as_str() {
            "rare" => hits[0] += 1,
            "mid" => hits[1] += 1,
            _ => hits[2] += 1,
        }
    }

    // Expected shares: 1/56, 5/56, 50/56. Allow +-1% absolute.
    let share = |count: u32| count as f64 / 100_000.0;
    assert!((share(hits[0]) - 1.0 / 56.0).abs() < 0.01);
    assert!((share(hits[1]) - 5.0 / 56.0).abs() < 0.01);
    assert!((share(hits[2]) - 50.0 / 56.0).abs() < 0.01);
}

#[test]
fn same_seed_same_draws() {
    let catalog = Catalog::new(vec![
        master("a", 1, 10, false),
        master("b", 2, 10, false),
        master("c", 3, 10, false),
    ]);
    let pool = GachaPool::build(&catalog, GachaType::Normal);

    let mut first = RngState::from_seed(42);
    let mut second = RngState::from_seed(42);
    let lhs: Vec<&str> = pool
        .pull_many(32, &mut first)
        .unwrap()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    let rhs: Vec<&str> = pool
        .pull_many(32, &mut second)
        .unwrap()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(lhs, rhs);
}

#[test]
fn pool_filters_by_type_and_weight() {
    let catalog = Catalog::new(vec![
        master("plain", 1, 50, false),
        master("event_only", 4, 5, true),
        master("retired", 3, 0, false),
    ]);

    let normal = GachaPool::build(&catalog, GachaType::Normal);
    assert_eq!(normal.len(), 1);

    let event = GachaPool::build(&catalog, GachaType::Event);
    assert_eq!(event.len(), 1);
    assert_eq!(event.total_weight(), 5);

    // Premium spans everything still carrying weight.
    let premium = GachaPool::build(&catalog, GachaType::Premium);
    assert_eq!(premium.len(), 2);
}

#[test]
fn empty_pool_is_an_error() {
    let catalog = Catalog::new(vec![master("plain", 1, 50, false)]);
    let event = GachaPool::build(&catalog, GachaType::Event);
    let mut rng = RngState::from_seed(1);
    assert_eq!(event.pull(&mut rng), Err(GachaError::EmptyPool));

    let zero_catalog = Catalog::new(vec![master("off", 1, 0, false)]);
    let zero = GachaPool::build(&zero_catalog, GachaType::Normal);
    assert_eq!(zero.pull(&mut rng), Err(GachaError::EmptyPool));
}

#[test]
fn single_entry_pool_always_returns_it() {
    let catalog = Catalog::new(vec![master("only", 2, 7, false)]);
    let pool = GachaPool::build(&catalog, GachaType::Normal);
    let mut rng = RngState::from_seed(9);
    for _ in 0..100 {
        assert_eq!(pool.pull(&mut rng).unwrap().id, "only");
    }
}

#[test]
fn seeded_shuffle_is_a_reproducible_permutation() {
    let mut first = RngState::from_seed(5);
    let mut second = RngState::from_seed(5);
    let mut lhs: Vec<u32> = (0..20).collect();
    let mut rhs = lhs.clone();
    first.shuffle(&mut lhs);
    second.shuffle(&mut rhs);
    assert_eq!(lhs, rhs);

    let mut sorted = lhs.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..20).collect::<Vec<u32>>());
}

#[test]
fn rates_report_weight_shares_by_rarity() {
    let catalog = Catalog::new(vec![
        master("r5a", 5, 1, false),
        master("r5b", 5, 1, false),
        master("r1", 1, 98, false),
    ]);
    let pool = GachaPool::build(&catalog, GachaType::Normal);
    let rates = pool.rates();
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0].rarity, Rarity::new(5));
    assert_eq!(rates[0].count, 2);
    assert!((rates[0].rate - 2.0).abs() < 1e-9);
    assert_eq!(rates[1].rarity, Rarity::new(1));
    assert!((rates[1].rate - 98.0).abs() < 1e-9);
}

#[test]
fn tutorial_pull_prefers_good_stickers() {
    let catalog = Catalog::new(vec![
        master("common", 1, 50, false),
        master("good", 3, 15, false),
        master("limited_good", 5, 1, true),
    ]);
    let mut rng = RngState::from_seed(7);
    for _ in 0..50 {
        let picked = GachaPool::tutorial_pull(&catalog, &mut rng).unwrap();
        assert_eq!(picked.id, "good");
    }

    // Without any rarity>=3 non-limited sticker it falls back to the
    // normal pool.
    let sparse = Catalog::new(vec![master("common", 1, 50, false)]);
    let picked = GachaPool::tutorial_pull(&sparse, &mut rng).unwrap();
    assert_eq!(picked.id, "common");
}
