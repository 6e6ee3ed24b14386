//! Prints a Karnaugh map and its minimal expression.
//!
//! Run with:
//! ```bash
//! cargo run --example kmap -- --vars 4 0 2 5 7 8 10 13 15
//! ```

use clap::Parser;
use kmap_rs::kmap::KarnaughMap;
use kmap_rs::minimize::{MinimizeConfig, Minimizer};
use kmap_rs::pattern::{Negation, OVERLINE};

#[derive(Parser)]
#[command(name = "kmap")]
#[command(about = "Minimize a boolean function given by its minterms")]
struct Args {
    /// Number of variables
    #[arg(short, long, default_value = "4")]
    vars: usize,

    /// Write negations as A' instead of an overline
    #[arg(short, long)]
    prime: bool,

    /// Show debug log of the minimizer
    #[arg(short, long)]
    debug: bool,

    /// Minterms where the function is true
    minterms: Vec<u32>,
}

/// Terminal columns taken by a label; the combining overline takes none.
fn columns_of(label: &str) -> usize {
    label.chars().filter(|&c| c != OVERLINE).count()
}

fn pad(mut label: String, width: usize) -> String {
    let n = columns_of(&label);
    label.extend(std::iter::repeat(' ').take(width.saturating_sub(n)));
    label
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    simplelog::TermLogger::init(
        if args.debug {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let map = KarnaughMap::with_minterms(args.vars, args.minterms.iter().copied())?;
    let layout = map.layout();

    let column_labels = layout.column_labels()?;
    let row_labels = layout.row_labels()?;
    let cell = column_labels.iter().map(|l| columns_of(l)).max().unwrap_or(0).max(1) + 2;
    let margin = row_labels.iter().map(|l| columns_of(l)).max().unwrap_or(0);

    print!("{} ", pad(String::new(), margin));
    for label in &column_labels {
        print!("{}", pad(label.clone(), cell));
    }
    println!();
    for (r, label) in row_labels.iter().enumerate() {
        print!("{} ", pad(label.clone(), margin));
        for c in 0..layout.columns() {
            let bit = if map.is_set(r, c)? { "1" } else { "0" };
            print!("{}", pad(bit.to_string(), cell));
        }
        println!();
    }
    println!();

    let config = MinimizeConfig {
        negation: if args.prime { Negation::Prime } else { Negation::Overline },
        ..MinimizeConfig::default()
    };
    let minimizer = Minimizer::with_config(args.vars, config)?;
    let solution = minimizer.solve(map.minterms().iter().copied())?;
    for term in solution.terms() {
        log::info!("term {}", term);
    }
    println!("f = {}", minimizer.render(&solution)?);

    Ok(())
}
