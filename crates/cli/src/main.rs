use pokeseal_core::{
    format_name_with_rank, format_points, next_rank_requirement, rank_progress, Catalog,
    GachaPool, GachaType, OwnedSticker, PeelCounter, RankCounts, RngState, ScoutList,
    ScoutSettings, ScoutSticker, StarPointLedger, StickerMaster, TransactionKind, UpgradeRank,
};
use pokeseal_data::{builtin_catalog, load_catalog};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone)]
struct CliOptions {
    seed: Option<u64>,
    roster: Option<PathBuf>,
}

#[derive(Debug)]
struct Holding {
    owned: OwnedSticker,
    counts: RankCounts,
}

impl Holding {
    fn new(sticker_id: &str) -> Self {
        let mut counts = RankCounts::new();
        counts.add(UpgradeRank::Normal, 1);
        Self {
            owned: OwnedSticker::first_acquired(sticker_id),
            counts,
        }
    }

    fn display_rank(&self) -> UpgradeRank {
        self.counts.best_rank().unwrap_or(UpgradeRank::Normal)
    }
}

struct Session {
    catalog: Catalog,
    rng: RngState,
    gacha_type: GachaType,
    collection: BTreeMap<String, Holding>,
    ledger: StarPointLedger,
    peels: PeelCounter,
    want: ScoutList,
    offer: ScoutList,
}

fn main() -> ExitCode {
    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let catalog = match &options.roster {
        Some(path) => match load_catalog(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                eprintln!("failed to load roster: {err:#}");
                return ExitCode::FAILURE;
            }
        },
        None => builtin_catalog(),
    };

    let rng = match options.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };

    let mut session = Session {
        catalog,
        rng,
        gacha_type: GachaType::Normal,
        collection: BTreeMap::new(),
        ledger: StarPointLedger::new(),
        peels: PeelCounter::new(),
        want: ScoutList::new(),
        offer: ScoutList::new(),
    };

    println!(
        "pokeseal: {} stickers loaded, seed {}. Type 'help' for commands.",
        session.catalog.len(),
        session.rng.seed()
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("read error: {err}");
                break;
            }
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            continue;
        };
        match command {
            "exit" | "quit" => break,
            "help" | "?" => print_help(),
            "seed" => println!("seed {}", session.rng.seed()),
            "pull" | "p" => cmd_pull(&mut session, args),
            "tutorial" => cmd_tutorial(&mut session),
            "gacha" => cmd_gacha(&mut session, args),
            "rates" => cmd_rates(&session),
            "collection" | "ls" => cmd_collection(&session),
            "convert" => cmd_convert(&mut session, args),
            "upgrade" => cmd_upgrade(&mut session, args),
            "balance" => cmd_balance(&session),
            "peel" => cmd_peel(&mut session, args),
            "scout" => cmd_scout(&mut session, args),
            "save" => cmd_save(&session, args),
            other => println!("unknown command '{other}', try 'help'"),
        }
    }
    ExitCode::SUCCESS
}

fn parse_args() -> Result<CliOptions, String> {
    let mut options = CliOptions {
        seed: None,
        roster: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value.parse().map_err(|_| format!("bad seed '{value}'"))?;
                options.seed = Some(seed);
            }
            "--roster" => {
                let value = args.next().ok_or("--roster needs a path")?;
                options.roster = Some(PathBuf::from(value));
            }
            other => return Err(format!("unknown flag '{other}'")),
        }
    }
    Ok(options)
}

fn print_help() {
    println!("commands:");
    println!("  pull [n]            draw from the current gacha");
    println!("  tutorial            guaranteed-good first draw");
    println!("  gacha <type>        switch gacha (normal/premium/event/collab)");
    println!("  rates               drop-rate table for the current gacha");
    println!("  collection          owned stickers with levels and progress");
    println!("  convert <id> [n]    turn copies into star points");
    println!("  upgrade <id> <rank> fuse copies (silver/gold/prism)");
    println!("  balance             star point ledger");
    println!("  peel <id>           peel a sticker off the book");
    println!("  scout want|offer <id> / scout match");
    println!("  save <path>         dump the session as JSON");
    println!("  seed / help / exit");
}

fn cmd_pull(session: &mut Session, args: &[&str]) {
    let count: usize = args.first().and_then(|a| a.parse().ok()).unwrap_or(1);
    let pool = GachaPool::build(&session.catalog, session.gacha_type);
    let mut drawn = Vec::with_capacity(count);
    for _ in 0..count {
        match pool.pull(&mut session.rng) {
            Ok(sticker) => drawn.push(sticker.clone()),
            Err(err) => {
                println!("{err}");
                return;
            }
        }
    }
    for sticker in &drawn {
        apply_pull(session, sticker);
    }
}

fn cmd_tutorial(session: &mut Session) {
    let pulled =
        GachaPool::tutorial_pull(&session.catalog, &mut session.rng).map(StickerMaster::clone);
    match pulled {
        Ok(sticker) => apply_pull(session, &sticker),
        Err(err) => println!("{err}"),
    }
}

fn apply_pull(session: &mut Session, sticker: &StickerMaster) {
    let holding = session.collection.get_mut(&sticker.id);
    match holding {
        Some(holding) => {
            let outcome = holding.owned.record_acquisition();
            holding.counts.add(UpgradeRank::Normal, 1);
            let marker = if outcome.rank_up {
                format!(
                    "  RANK UP R{} -> R{}",
                    outcome.previous_rank.number(),
                    outcome.new_rank.number()
                )
            } else {
                String::new()
            };
            println!("{} [*{}] x{}{}", sticker.name, sticker.rarity.get(), holding.owned.quantity, marker);
        }
        None => {
            session
                .collection
                .insert(sticker.id.clone(), Holding::new(&sticker.id));
            println!("{} [*{}]  NEW!", sticker.name, sticker.rarity.get());
        }
    }
}

fn cmd_gacha(session: &mut Session, args: &[&str]) {
    let Some(&name) = args.first() else {
        println!("gacha type is {:?}", session.gacha_type);
        return;
    };
    session.gacha_type = match name {
        "normal" => GachaType::Normal,
        "premium" => GachaType::Premium,
        "event" => GachaType::Event,
        "collab" => GachaType::Collab,
        other => {
            println!("unknown gacha type '{other}'");
            return;
        }
    };
    println!("switched to {:?}", session.gacha_type);
}

fn cmd_rates(session: &Session) {
    let pool = GachaPool::build(&session.catalog, session.gacha_type);
    if pool.is_empty() {
        println!("pool is empty");
        return;
    }
    for row in pool.rates() {
        println!(
            "  *{} {}: {:>6.2}%  ({} stickers)",
            row.rarity.get(),
            row.rarity.label(),
            row.rate,
            row.count
        );
    }
}

fn cmd_collection(session: &Session) {
    if session.collection.is_empty() {
        println!("no stickers yet, try 'pull'");
        return;
    }
    for (id, holding) in &session.collection {
        let Some(master) = session.catalog.by_id(id) else {
            continue;
        };
        let name = format_name_with_rank(&master.name, holding.display_rank());
        let next = match next_rank_requirement(holding.owned.total_acquired) {
            Some(needed) => format!("{needed} to next"),
            None => "MAX".to_string(),
        };
        println!(
            "  {}  x{}  R{} {:>3}% ({})",
            name,
            holding.owned.quantity,
            holding.owned.rank.number(),
            rank_progress(holding.owned.total_acquired),
            next
        );
    }
}

fn cmd_convert(session: &mut Session, args: &[&str]) {
    let Some(&id) = args.first() else {
        println!("usage: convert <id> [n]");
        return;
    };
    let quantity: u32 = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(1);
    let Some(master) = session.catalog.by_id(id).cloned() else {
        println!("unknown sticker '{id}'");
        return;
    };
    let Some(holding) = session.collection.get_mut(id) else {
        println!("you do not own '{id}'");
        return;
    };
    match holding.owned.convert_quantity(master.rarity, quantity) {
        Ok(points) => {
            // The Normal bucket tracks the same copies as the owned
            // quantity; spend both so fusion cannot reuse them.
            if let Err(err) = holding.counts.remove(UpgradeRank::Normal, quantity) {
                println!("{err}");
                return;
            }
            session
                .ledger
                .credit(points, TransactionKind::Convert, &master.name);
            println!("+{} for {} x{}", format_points(points), master.name, quantity);
        }
        Err(err) => println!("{err}"),
    }
}

fn cmd_upgrade(session: &mut Session, args: &[&str]) {
    let (Some(&id), Some(&rank_name)) = (args.first(), args.get(1)) else {
        println!("usage: upgrade <id> <silver|gold|prism>");
        return;
    };
    let target = match rank_name {
        "silver" => UpgradeRank::Silver,
        "gold" => UpgradeRank::Gold,
        "prism" => UpgradeRank::Prism,
        other => {
            println!("unknown rank '{other}'");
            return;
        }
    };
    let Some(holding) = session.collection.get_mut(id) else {
        println!("you do not own '{id}'");
        return;
    };
    match holding.counts.apply_upgrade(target) {
        Ok(()) => {
            // Normal copies double as the pull quantity; keep the
            // owned record in step after fusion consumed some.
            holding.owned.quantity = holding.counts.count(UpgradeRank::Normal);
            holding.owned.upgrade_rank = holding.display_rank();
            let master_name = session
                .catalog
                .by_id(id)
                .map(|master| master.name.clone())
                .unwrap_or_else(|| id.to_string());
            println!(
                "{} is now {}",
                master_name,
                format_name_with_rank(&master_name, target)
            );
        }
        Err(err) => println!("{err}"),
    }
}

fn cmd_balance(session: &Session) {
    println!(
        "balance {}  (earned {}, spent {})",
        format_points(session.ledger.balance()),
        format_points(session.ledger.total_earned()),
        format_points(session.ledger.total_spent())
    );
}

fn cmd_peel(session: &mut Session, args: &[&str]) {
    let Some(&id) = args.first() else {
        println!("usage: peel <id>");
        return;
    };
    let count = session.peels.peel(id);
    let flavor = match count {
        1 => "peels right off!",
        2..=4 => "still pretty sticky.",
        _ => "barely sticks anymore...",
    };
    println!("peel #{count}: {flavor}");
}

fn cmd_scout(session: &mut Session, args: &[&str]) {
    match args.first().copied() {
        Some("want") | Some("offer") => {
            let Some(&id) = args.get(1) else {
                println!("usage: scout want|offer <id>");
                return;
            };
            let Some(master) = session.catalog.by_id(id) else {
                println!("unknown sticker '{id}'");
                return;
            };
            let entry = ScoutSticker {
                sticker_id: master.id.clone(),
                name: master.name.clone(),
                image: master.image.clone(),
                rarity: master.rarity,
            };
            let list = if args[0] == "want" {
                &mut session.want
            } else {
                &mut session.offer
            };
            match list.push(entry) {
                Ok(()) => println!("registered {} ({}/5)", master.name, list.len()),
                Err(err) => println!("{err}"),
            }
        }
        Some("match") => {
            let mine = ScoutSettings {
                want: session.want.clone(),
                offer: session.offer.clone(),
                active: true,
            };
            let theirs = random_counterpart(&session.catalog, &mut session.rng);
            match pokeseal_core::match_settings(&mine, &theirs) {
                Some(matched) => {
                    println!("match! score {}", matched.score);
                    for sticker in &matched.my_offers_they_want {
                        println!("  they want your {}", sticker.name);
                    }
                    for sticker in &matched.their_offers_i_want {
                        println!("  they offer {}", sticker.name);
                    }
                }
                None => println!("no match this time"),
            }
        }
        _ => println!("usage: scout want|offer <id> / scout match"),
    }
}

/// A simulated counterpart with random want/offer lists, enough to
/// demo matching without a backend. A shuffled catalog order keeps
/// the two lists free of duplicates.
fn random_counterpart(catalog: &Catalog, rng: &mut RngState) -> ScoutSettings {
    let mut indices: Vec<usize> = (0..catalog.len()).collect();
    rng.shuffle(&mut indices);
    let scout = |idx: usize| {
        let master = &catalog.stickers()[idx];
        ScoutSticker {
            sticker_id: master.id.clone(),
            name: master.name.clone(),
            image: master.image.clone(),
            rarity: master.rarity,
        }
    };
    let mut want = ScoutList::new();
    let mut offer = ScoutList::new();
    for &idx in indices.iter().take(pokeseal_core::MAX_SCOUT_LIST) {
        let _ = want.push(scout(idx));
    }
    for &idx in indices
        .iter()
        .skip(pokeseal_core::MAX_SCOUT_LIST)
        .take(pokeseal_core::MAX_SCOUT_LIST)
    {
        let _ = offer.push(scout(idx));
    }
    ScoutSettings {
        want,
        offer,
        active: true,
    }
}

#[derive(Serialize)]
struct SessionDump<'a> {
    seed: u64,
    collection: Vec<&'a OwnedSticker>,
    ledger: &'a StarPointLedger,
}

fn cmd_save(session: &Session, args: &[&str]) {
    let Some(&path) = args.first() else {
        println!("usage: save <path>");
        return;
    };
    let dump = SessionDump {
        seed: session.rng.seed(),
        collection: session
            .collection
            .values()
            .map(|holding| &holding.owned)
            .collect(),
        ledger: &session.ledger,
    };
    match serde_json::to_string_pretty(&dump) {
        Ok(json) => match std::fs::write(path, json) {
            Ok(()) => println!("saved to {path}"),
            Err(err) => println!("write failed: {err}"),
        },
        Err(err) => println!("serialize failed: {err}"),
    }
}
