//! Soul Duel - Entry Point
//!
//! Interactive terminal duel against the computer. The player's character
//! is kept in `data/character.json` and gains experience after every match.

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use soul_duel::combat::{AttackKind, Combatant, CoreStats, DefenseKind};
use soul_duel::core::config::DuelConfig;
use soul_duel::core::error::Result;
use soul_duel::duel::{Duel, DuelPhase, Side};
use soul_duel::progression::{Character, CharacterStore, JsonCharacterStore, DEFAULT_CHARACTER_PATH};

const CONFIG_PATH: &str = "data/duel.toml";

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soul_duel=warn".into()),
        )
        .init();

    let config = if Path::new(CONFIG_PATH).exists() {
        DuelConfig::load(CONFIG_PATH)?
    } else {
        DuelConfig::default()
    };

    let mut characters = JsonCharacterStore::new(DEFAULT_CHARACTER_PATH);
    let mut duel: Option<Duel> = None;
    let mut printed = 0;
    let mut last_input = Instant::now();

    println!("\n=== SOUL DUEL ===");
    println!();
    println!("Commands:");
    println!("  create <name> [str agi end wis int] - Create your character");
    println!("  alloc <str> <agi> <end> <wis> <int> - Redistribute stat points");
    println!("  profile / p                         - Show your character");
    println!("  start                               - Start a match against the computer");
    println!("  attack / a <kind>                   - Toggle an attack (fire, lightning, weapon, acid, psycho)");
    println!("  defend / d <kind>                   - Toggle a defense");
    println!("  fight / f                           - Resolve the round");
    println!("  status / s                          - Show both combatants");
    println!("  summary                             - Show match statistics");
    println!("  quit / q                            - Exit");
    println!();

    match characters.load()? {
        Some(character) => println!("Welcome back, {} (level {}).", character.name, character.level),
        None => println!("No character found. Use `create <name>` to make one."),
    }

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        // Let the AI catch up on the time the player spent thinking
        if let Some(duel) = duel.as_mut() {
            duel.advance_clock(last_input.elapsed());
        }
        last_input = Instant::now();

        if input.is_empty() {
            continue;
        }

        let mut words = input.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match command {
            "quit" | "q" => break,
            "create" => create_character(&mut characters, &args)?,
            "alloc" => reallocate(&mut characters, &args)?,
            "profile" | "p" => show_profile(&characters)?,
            "start" => match characters.load()? {
                Some(character) => {
                    let player = Combatant::from_character(&character);
                    let mut next = Duel::vs_computer(config.clone(), player)?
                        .with_store(Box::new(characters.clone()));
                    next.start();
                    printed = 0;
                    duel = Some(next);
                }
                None => println!("Create a character first."),
            },
            "attack" | "a" | "defend" | "d" | "fight" | "f" | "status" | "s" | "summary" => {
                let Some(duel) = duel.as_mut() else {
                    println!("No match in progress. Use `start`.");
                    continue;
                };
                match command {
                    "attack" | "a" => match args.first().and_then(|n| AttackKind::from_name(n)) {
                        Some(kind) => {
                            duel.toggle_attack(Side::One, kind);
                        }
                        None => println!("Usage: attack <fire|lightning|weapon|acid|psycho>"),
                    },
                    "defend" | "d" => match args.first().and_then(|n| DefenseKind::from_name(n)) {
                        Some(kind) => {
                            duel.toggle_defense(Side::One, kind);
                        }
                        None => println!("Usage: defend <fire|lightning|weapon|acid|psycho>"),
                    },
                    "fight" | "f" => {
                        duel.execute_round();
                    }
                    "summary" => {
                        let summary = duel.summary();
                        println!("Rounds played: {}", summary.rounds_played);
                        println!(
                            "Damage dealt: {:.1} / {:.1}",
                            summary.side_one_damage, summary.side_two_damage
                        );
                        println!(
                            "Rounds won:   {} / {}",
                            summary.side_one_rounds_won, summary.side_two_rounds_won
                        );
                        println!("Dodges:       {} / {}", summary.side_one_dodges, summary.side_two_dodges);
                    }
                    _ => display_status(duel),
                }

                for event in duel.events().events().iter().skip(printed) {
                    println!("  {}", event.description);
                }
                printed = duel.events().len();

                if duel.phase() == DuelPhase::Selection && command != "status" && command != "s" {
                    display_selections(duel);
                }
            }
            _ => println!("Unknown command: {}", command),
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn parse_stats(args: &[&str]) -> Option<CoreStats> {
    let values: Vec<u32> = args.iter().map(|a| a.parse().ok()).collect::<Option<_>>()?;
    match values.as_slice() {
        [s, a, e, w, i] => Some(CoreStats::new(*s, *a, *e, *w, *i)),
        _ => None,
    }
}

fn create_character(store: &mut JsonCharacterStore, args: &[&str]) -> Result<()> {
    let Some((name, rest)) = args.split_first() else {
        println!("Usage: create <name> [str agi end wis int]");
        return Ok(());
    };

    let stats = if rest.is_empty() {
        CoreStats::default()
    } else {
        match parse_stats(rest) {
            Some(stats) => stats,
            None => {
                println!("Stats must be five whole numbers.");
                return Ok(());
            }
        }
    };

    match Character::new(*name, stats) {
        Ok(character) => {
            store.save(&character)?;
            println!(
                "Created {} with {} unspent points.",
                character.name,
                character.unspent_points()
            );
        }
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn reallocate(store: &mut JsonCharacterStore, args: &[&str]) -> Result<()> {
    let Some(mut character) = store.load()? else {
        println!("Create a character first.");
        return Ok(());
    };
    let Some(stats) = parse_stats(args) else {
        println!("Usage: alloc <str> <agi> <end> <wis> <int>");
        return Ok(());
    };

    match character.reallocate(stats) {
        Ok(()) => {
            store.save(&character)?;
            println!("Stats updated. {} points unspent.", character.unspent_points());
        }
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn show_profile(store: &JsonCharacterStore) -> Result<()> {
    let Some(character) = store.load()? else {
        println!("No character yet.");
        return Ok(());
    };

    let s = &character.stats;
    println!("{} - level {}", character.name, character.level);
    println!(
        "  STR {}  AGI {}  END {}  WIS {}  INT {}",
        s.strength, s.agility, s.endurance, s.wisdom, s.intellect
    );
    println!(
        "  Experience: {}/{}",
        character.experience,
        character.experience_to_next_level()
    );
    println!(
        "  Points: {} of {} used ({} unspent)",
        character.total_stats(),
        character.total_available_points(),
        character.unspent_points()
    );
    println!(
        "  Record: {}W {}L ({:.0}% win rate)",
        character.battles_won,
        character.battles_lost,
        character.win_rate()
    );
    println!(
        "  Lifetime damage: {:.1} dealt, {:.1} taken",
        character.total_damage_dealt, character.total_damage_taken
    );
    Ok(())
}

fn display_status(duel: &Duel) {
    println!("--- Round {} ({:?}) ---", duel.round(), duel.phase());
    for side in Side::BOTH {
        let c = duel.combatant(side);
        println!(
            "  {:<12} {:>5.1}/{:<5.1} HP  rounds won: {}",
            c.name,
            c.health(),
            c.max_health(),
            c.rounds_won()
        );
    }
    if duel.ai_pending() {
        println!("  (computer is still choosing)");
    }
    display_selections(duel);
}

fn display_selections(duel: &Duel) {
    let player = duel.combatant(Side::One);
    let attacks: Vec<String> = player.selected_attacks().iter().map(|k| k.to_string()).collect();
    let defenses: Vec<String> = player.selected_defenses().iter().map(|k| k.to_string()).collect();
    println!("  Attacks:  [{}]", attacks.join(", "));
    println!("  Defenses: [{}]", defenses.join(", "));
}
