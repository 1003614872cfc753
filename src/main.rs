//! Draws one sample of the operation duration factor and prints it.
//!
//! With no flags the query is for an operation on a day shift, ten days after the last interrupt.

use opfactor::{report, DurationConfig, DurationModel, EngineKind, ObservedInputs, Shift};

use clap::Parser;
use log::error;
use rand::{SeedableRng, StdRng};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Days since the last interrupt
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    days: f64,

    /// The shift the operation runs in (day or night)
    #[arg(long, default_value_t = Shift::Day)]
    shift: Shift,

    /// The inference engine used to compute the marginal
    #[arg(long, value_enum, default_value_t = EngineKind::Exact)]
    engine: EngineKind,

    /// Number of particles drawn by the monte-carlo engine
    #[arg(long, default_value_t = 20_000)]
    particles: usize,

    /// Seed for reproducible samples
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> opfactor::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    let inputs = ObservedInputs::new(args.days, args.shift);

    let engine = args.engine.build(args.particles, args.seed.map(|s| s.wrapping_add(1)));
    let mut model = DurationModel::with_engine(engine, &DurationConfig::default())?;

    let result = match args.seed {
        Some(seed) => {
            let mut rng = StdRng::from_seed(&[seed as usize][..]);
            model.infer_with(&mut rng, &inputs)
        },
        None => model.infer(inputs.days_since_last_interrupt, inputs.shift)
    };

    match result {
        Ok(duration) => {
            println!("{}", report(duration));
            Ok(())
        },
        Err(e) => {
            error!("inference failed: {}", e);
            Err(e)
        }
    }
}
