use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use dotenv::dotenv;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

use shinpaku_server::{filter_by_tempo, generate_ranges, logger, BpmRange, Library, SongSummary};

/// Report which dataset tracks fall into each band of a BPM sweep.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV dataset to scan
    #[arg(long, env = "DATASET_PATH", default_value = "./spotify_data.csv")]
    dataset: PathBuf,

    /// First band's lower bound
    #[arg(long, default_value_t = 50)]
    min: i64,

    /// Bands start below this value
    #[arg(long, default_value_t = 200)]
    max: i64,

    /// Band width
    #[arg(long, default_value_t = 10)]
    step: i64,

    /// Print only the number of songs per band
    #[arg(long)]
    counts_only: bool,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();
    logger::init(LevelFilter::Warn).map_err(anyhow::Error::msg)?;

    let library = Library::load(&args.dataset);
    if let Library::Unavailable { reason } = &library {
        bail!("cannot load {}: {}", args.dataset.display(), reason);
    }

    let ranges = generate_ranges(args.min, args.max, args.step);
    let progress = ProgressBar::new(ranges.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{percent}%] {pos}/{len} {wide_bar} ({eta})")?,
    );

    let mut report: Vec<((i64, i64), Vec<SongSummary>)> = Vec::new();
    for (lo, hi) in ranges {
        let range = BpmRange::new(lo as f64, hi as f64);
        if let Some(songs) = filter_by_tempo(&library, range).into_songs() {
            if !songs.is_empty() {
                report.push(((lo, hi), songs));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if report.is_empty() {
        println!("No songs found for any BPM range.");
        return Ok(());
    }

    if args.counts_only {
        for ((lo, hi), songs) in &report {
            println!("{}-{}: {} songs", lo, hi, songs.len());
        }
    } else {
        println!("Filtered Songs by BPM Range:");
        for ((lo, hi), songs) in &report {
            println!("BPM Range: ({}, {})", lo, hi);
            for song in songs {
                println!("  {} - {} ({:.3} BPM)", song.artist_name, song.track_name, song.tempo);
            }
        }
    }

    Ok(())
}
