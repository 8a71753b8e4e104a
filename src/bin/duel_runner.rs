//! Headless Duel Runner
//!
//! Runs AI vs AI matches in parallel and outputs JSON or text results for
//! balance tuning.

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;

use soul_duel::ai::{OpponentAi, Strategy, StrategySelector};
use soul_duel::combat::{CharacterPreset, Combatant};
use soul_duel::core::config::DuelConfig;
use soul_duel::core::error::Result;
use soul_duel::duel::{Duel, DuelOutcome, MatchSummary, Side};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Warrior,
    Mage,
    Rogue,
    Balanced,
}

impl From<PresetArg> for CharacterPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Warrior => CharacterPreset::Warrior,
            PresetArg::Mage => CharacterPreset::Mage,
            PresetArg::Rogue => CharacterPreset::Rogue,
            PresetArg::Balanced => CharacterPreset::Balanced,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Aggressive,
    Defensive,
    Balanced,
    Adaptive,
    Random,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Aggressive => Strategy::Aggressive,
            StrategyArg::Defensive => Strategy::Defensive,
            StrategyArg::Balanced => Strategy::Balanced,
            StrategyArg::Adaptive => Strategy::Adaptive,
            StrategyArg::Random => Strategy::Random,
        }
    }
}

/// Headless Duel Runner - AI vs AI matches for balance tuning
#[derive(Parser, Debug)]
#[command(name = "duel_runner")]
#[command(about = "Run AI vs AI duels and output match statistics")]
struct Args {
    /// Preset for side one
    #[arg(long, value_enum, default_value = "warrior")]
    one: PresetArg,

    /// Preset for side two
    #[arg(long, value_enum, default_value = "mage")]
    two: PresetArg,

    /// Pin side one's AI to a strategy instead of classifying each round
    #[arg(long, value_enum)]
    one_strategy: Option<StrategyArg>,

    /// Pin side two's AI to a strategy
    #[arg(long, value_enum)]
    two_strategy: Option<StrategyArg>,

    /// Number of independent matches
    #[arg(long, default_value_t = 1)]
    matches: u32,

    /// Maximum rounds before a match is abandoned
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    /// Random seed; match `i` uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,

    /// Optional TOML config (rules and AI tuning)
    #[arg(long)]
    config: Option<String>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Include the event log of every match
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// One match, flattened for output
#[derive(Debug, Serialize)]
struct MatchRecord {
    seed: u64,
    outcome: String,
    timed_out: bool,
    summary: MatchSummary,
    one_health: f64,
    two_health: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    log: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    one: String,
    two: String,
    matches: usize,
    one_wins: usize,
    two_wins: usize,
    draws: usize,
    timeouts: usize,
    average_rounds: f64,
    base_seed: u64,
    records: Vec<MatchRecord>,
}

fn selector(config: &DuelConfig, seed: u64, strategy: Option<StrategyArg>) -> StrategySelector {
    let selector = StrategySelector::with_seed(config.ai.clone(), seed);
    match strategy {
        Some(strategy) => selector.with_strategy(strategy.into()),
        None => selector,
    }
}

fn run_match(args: &Args, base: &DuelConfig, seed: u64) -> Result<MatchRecord> {
    let mut config = base.clone();
    config.seed = Some(seed);
    config.pacing.ai_turn_delay_ms = 0;

    let one = Combatant::from_preset(format!("{:?}", args.one), args.one.into());
    let two = Combatant::from_preset(format!("{:?}", args.two), args.two.into());

    let mut one_ai = selector(&config, seed.wrapping_add(2), args.one_strategy);
    let two_ai = selector(&config, seed.wrapping_add(1), args.two_strategy);

    let attacks = config.rules.attacks_per_round;
    let defenses = config.rules.defenses_per_round;

    let mut duel = Duel::new(config, one, two)?.with_ai(Box::new(two_ai));
    duel.start();

    while !duel.is_finished() && duel.round() <= args.max_rounds {
        let picks =
            one_ai.select_abilities(duel.combatant(Side::One), duel.combatant(Side::Two));
        duel.set_selections(Side::One, &picks.attacks[..attacks], &picks.defenses[..defenses]);
        if duel.execute_round().is_none() {
            break;
        }
    }

    let log = if args.verbose {
        duel.events().descriptions().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    Ok(MatchRecord {
        seed,
        outcome: format!("{:?}", duel.outcome()),
        timed_out: !duel.is_finished(),
        summary: duel.summary(),
        one_health: duel.combatant(Side::One).health(),
        two_health: duel.combatant(Side::Two).health(),
        log,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soul_duel=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DuelConfig::load(path)?,
        None => DuelConfig::default(),
    };

    // Determine seed
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let records = (0..args.matches)
        .into_par_iter()
        .map(|i| run_match(&args, &config, base_seed.wrapping_add(i as u64)))
        .collect::<Result<Vec<_>>>()?;

    let count_outcome = |outcome: DuelOutcome| {
        records
            .iter()
            .filter(|r| !r.timed_out && r.summary.outcome == outcome)
            .count()
    };

    let report = BatchReport {
        one: format!("{:?}", args.one),
        two: format!("{:?}", args.two),
        matches: records.len(),
        one_wins: count_outcome(DuelOutcome::Victory(Side::One)),
        two_wins: count_outcome(DuelOutcome::Victory(Side::Two)),
        draws: count_outcome(DuelOutcome::Draw),
        timeouts: records.iter().filter(|r| r.timed_out).count(),
        average_rounds: if records.is_empty() {
            0.0
        } else {
            records
                .iter()
                .map(|r| r.summary.rounds_played as f64)
                .sum::<f64>()
                / records.len() as f64
        },
        base_seed,
        records,
    };

    match args.format.as_str() {
        "text" => print_text(&report),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_text(report: &BatchReport) {
    println!("Duel Results");
    println!("============");
    println!("{} vs {}", report.one, report.two);
    println!("Matches: {}", report.matches);
    println!("{} wins: {}", report.one, report.one_wins);
    println!("{} wins: {}", report.two, report.two_wins);
    println!("Draws: {}", report.draws);
    println!("Timeouts: {}", report.timeouts);
    println!("Average rounds: {:.2}", report.average_rounds);
    println!("Base seed: {}", report.base_seed);

    for record in &report.records {
        if record.log.is_empty() {
            continue;
        }
        println!();
        println!("--- Seed {} ({}) ---", record.seed, record.outcome);
        for line in &record.log {
            println!("  {}", line);
        }
    }
}
