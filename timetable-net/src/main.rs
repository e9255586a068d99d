use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use timetable_net::generate::{
    GeneratorConfig, generate_stations, generate_timetable, generate_trains, write_stations_file,
};
use timetable_net::network::{SpaceKind, WeightMode, build_network, output_file_name, write_network_file};
use timetable_net::timetable::{read_timetable_file, write_timetable_file};

#[derive(Parser)]
#[command(name = "timetable-net")]
#[command(about = "Build transportation-space networks from train timetables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build Pajek networks from a timetable CSV
    Build {
        /// Path to the semicolon-delimited timetable CSV
        timetable: PathBuf,
        /// Directory the .net files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Build a single space (stations, stops or changes) instead of all three
        #[arg(long)]
        space: Option<String>,
    },
    /// Generate a random timetable and station coordinates
    Generate {
        /// Number of stations
        #[arg(long, default_value_t = 10)]
        stations: usize,
        /// Number of trains
        #[arg(long, default_value_t = 5)]
        trains: usize,
        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Directory the CSV files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            timetable,
            out_dir,
            space,
        } => cmd_build(&timetable, &out_dir, space.as_deref()),
        Commands::Generate {
            stations,
            trains,
            seed,
            out_dir,
        } => cmd_generate(stations, trains, seed, &out_dir),
    }
}

fn cmd_build(timetable_path: &Path, out_dir: &Path, space: Option<&str>) -> Result<(), Box<dyn Error>> {
    // Resolve the space selection before touching any input or output.
    let spaces: Vec<SpaceKind> = match space {
        Some(name) => vec![SpaceKind::parse(name)?],
        None => SpaceKind::ALL.to_vec(),
    };

    let timetable = read_timetable_file(timetable_path)?;
    println!(
        "Loaded {} trains ({} rows) from {}",
        timetable.train_count(),
        timetable.row_count(),
        timetable_path.display()
    );

    std::fs::create_dir_all(out_dir)?;
    for space in spaces {
        let network = build_network(&timetable, space);
        for mode in WeightMode::ALL {
            let path = out_dir.join(output_file_name(space, mode));
            write_network_file(&network, mode, &path)?;
            println!(
                "{} network for the space of {space} saved to {}",
                mode.label(),
                path.display()
            );
        }
    }
    Ok(())
}

fn cmd_generate(
    stations: usize,
    trains: usize,
    seed: Option<u64>,
    out_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    let config = GeneratorConfig {
        num_stations: stations,
        num_trains: trains,
        ..GeneratorConfig::default()
    };

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let station_records = generate_stations(&mut rng, &config);
    let train_plans = generate_trains(&mut rng, &config);
    let timetable = generate_timetable(&mut rng, &station_records, &train_plans, &config);

    std::fs::create_dir_all(out_dir)?;

    let stations_path = out_dir.join("RandomStationCoordinates.csv");
    write_stations_file(&station_records, &stations_path)?;
    println!(
        "Generated {} station coordinates saved to {}",
        station_records.len(),
        stations_path.display()
    );

    let timetable_path = out_dir.join("RandomTimetable.csv");
    write_timetable_file(&timetable, &timetable_path)?;
    println!(
        "Generated timetable ({} trains, {} rows) saved to {}",
        timetable.train_count(),
        timetable.row_count(),
        timetable_path.display()
    );

    Ok(())
}
