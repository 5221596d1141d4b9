use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::route::NetworkType;

/// Barrier-effect pipeline over transit-card swipes (one subcommand per stage)
#[derive(Parser, Debug)]
#[command(name = "transit-barrier", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate raw transactions and keep primary-student swipes
    Clean(CleanArgs),

    /// Build one origin-destination pair per card
    Od(OdArgs),

    /// Rewire OD destinations into a distance-matched null model
    Null(NullArgs),

    /// Route OD pairs over a road network and flag barrier crossings
    Route(RouteArgs),

    /// Compute global and directional barrier scores
    Score(ScoreArgs),
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Raw transactions file (comma separated, no header, 13 fields per row)
    #[arg(long = "in", default_value = "data/raw/transacciones.txt", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Cleaned swipe table (.parquet or .csv)
    #[arg(short, long, default_value = "data/interim/cleaned.parquet", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Optional CSV mirror of the cleaned table
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// Fare category kept by the cleaner (11 = primary student)
    #[arg(long, default_value_t = 11)]
    pub fare_code: i64,
}

#[derive(Args, Debug)]
pub struct OdArgs {
    /// Cleaned swipe table
    #[arg(long = "in", default_value = "data/interim/cleaned.parquet", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Real OD table
    #[arg(short, long, default_value = "data/processed/od_pairs.parquet", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Optional CSV mirror of the OD table
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// Minimum separation (hours) between origin and destination
    #[arg(long = "min-gap-horas", default_value_t = 3.0)]
    pub min_gap_hours: f64,
}

#[derive(Args, Debug)]
pub struct NullArgs {
    /// Real OD table
    #[arg(long = "in", default_value = "data/processed/od_pairs.parquet", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Null OD table
    #[arg(short, long, default_value = "data/processed/od_pairs_null.parquet", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Per-bin distance distribution, real vs null
    #[arg(long, default_value = "data/processed/null_model_summary.csv", value_hint = ValueHint::FilePath)]
    pub summary: PathBuf,

    /// Distance bin width in km
    #[arg(long, default_value_t = 1.0)]
    pub bin_km: f64,

    /// Allowed bin difference between donor and real trip
    #[arg(long, default_value_t = 1)]
    pub tol_bins: usize,

    /// Random seed
    #[arg(long, default_value_t = 123)]
    pub seed: u64,

    /// Let an origin keep its own destination when it falls within tolerance
    #[arg(long)]
    pub allow_keep: bool,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// OD table to route (real or null)
    #[arg(long = "in", default_value = "data/processed/od_pairs.parquet", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Road network line features (.shp or .geojson)
    #[arg(long, default_value = "data/external/calles.geojson", value_hint = ValueHint::FilePath)]
    pub roads: PathBuf,

    /// Rail lines used to flag crossings (.shp or .geojson)
    #[arg(long, default_value = "data/external/trenes_caba.geojson", value_hint = ValueHint::FilePath)]
    pub barriers: PathBuf,

    /// Attribute holding the line name
    #[arg(long, default_value = "Linea")]
    pub name_field: String,

    /// Case-insensitive pattern selecting barrier lines, e.g. "sarmiento"
    #[arg(long)]
    pub barrier_filter: Option<String>,

    /// Route collection table
    #[arg(short, long, default_value = "data/processed/routes_osmnx.parquet", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Optional GeoJSON export of the routes
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub geojson: Option<PathBuf>,

    /// Partial-progress file (defaults to <output stem>.partial.parquet)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub checkpoint: Option<PathBuf>,

    /// Routes between checkpoint writes
    #[arg(long, default_value_t = 100)]
    pub checkpoint_every: usize,

    /// Continue from an existing checkpoint
    #[arg(long)]
    pub resume: bool,

    /// Network radius around the OD centroid (m)
    #[arg(long, default_value_t = 12000.0)]
    pub dist_m: f64,

    /// Road classes admitted into the network
    #[arg(long = "network", value_enum, default_value_t = NetworkType::Drive)]
    pub network_type: NetworkType,

    /// Maximum distance from a point to its nearest network node (m)
    #[arg(long, default_value_t = 500.0)]
    pub snap_m: f64,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Observed route collection
    #[arg(long, default_value = "data/processed/routes_osmnx.parquet", value_hint = ValueHint::FilePath)]
    pub obs: PathBuf,

    /// Null route collections (repeatable); run id is the file stem
    #[arg(long = "null", value_hint = ValueHint::FilePath)]
    pub nulls: Vec<PathBuf>,

    /// Directory scanned for null route collections
    #[arg(long, default_value = "data/processed", value_hint = ValueHint::DirPath)]
    pub null_dir: PathBuf,

    /// File-name pattern for null route collections inside --null-dir
    #[arg(long, default_value = r"^routes_null[^.]*\.parquet$")]
    pub null_pattern: String,

    /// Rail lines (.shp or .geojson)
    #[arg(long, default_value = "data/external/trenes_caba.geojson", value_hint = ValueHint::FilePath)]
    pub barriers: PathBuf,

    /// Attribute holding the line name
    #[arg(long, default_value = "Linea")]
    pub name_field: String,

    /// Case-insensitive pattern selecting barrier lines
    #[arg(long)]
    pub barrier_filter: Option<String>,

    /// Global report (JSON)
    #[arg(long, default_value = "data/processed/barrier_scores_global.json", value_hint = ValueHint::FilePath)]
    pub out_global: PathBuf,

    /// Directional report (JSON)
    #[arg(long = "out-dir", default_value = "data/processed/barrier_scores_directional.json", value_hint = ValueHint::FilePath)]
    pub out_directional: PathBuf,
}
