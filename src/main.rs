use agri_geo::location::{MatchConfig, RawLocation, Resolver, Vocabulary};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// agri-geo: map reverse-geocoded place names onto the crop-model vocabulary
///
/// Resolves a noisy state/district pair (as returned by a reverse geocoder)
/// onto the exact region and sub-region names a prediction service expects.
///
/// Examples:
///   agri-geo Kerala Ernakulam
///   agri-geo "TAMIL-NADU" "Kancheepuram" --explain
///   agri-geo --list
///   agri-geo --vocabulary my_regions.json Punjab Ludhyana
///   agri-geo --serve --port 8090
#[derive(Parser)]
#[command(name = "agri-geo", version, about, long_about = None)]
struct Cli {
    /// Region (state) text. Example: agri-geo Kerala
    #[arg(index = 1)]
    region: Option<String>,

    /// Sub-region (district) text. Example: agri-geo Kerala Ernakulam
    #[arg(index = 2)]
    sub_region: Option<String>,

    /// Vocabulary JSON file. Defaults to ~/.agri_geo/vocabulary.json, then the built-in dataset.
    #[arg(long, env = "AGRI_GEO_VOCABULARY")]
    vocabulary: Option<PathBuf>,

    /// Similarity a region must exceed to match (0..1).
    #[arg(long, default_value_t = agri_geo::location::config::DEFAULT_REGION_THRESHOLD)]
    region_threshold: f64,

    /// Similarity a sub-region must exceed to match (0..1).
    #[arg(long, default_value_t = agri_geo::location::config::DEFAULT_SUB_REGION_THRESHOLD)]
    sub_region_threshold: f64,

    /// Score given when one name contains the other (0..1).
    #[arg(long, default_value_t = agri_geo::location::config::DEFAULT_CONTAINMENT_SCORE)]
    containment_score: f64,

    /// Include the matching tier and score for each level in the output.
    #[arg(long)]
    explain: bool,

    /// Print the loaded vocabulary and exit.
    #[arg(long)]
    list: bool,

    /// Start the HTTP API instead of resolving once.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for --serve.
    #[arg(long, short = 'p', default_value_t = 8090)]
    port: u16,

    /// Verbose logging (tier decisions, request timings).
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("agri_geo=debug,info")
        } else {
            EnvFilter::new("agri_geo=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // ── Load vocabulary ─────────────────────────────────────────

    let vocabulary = match &cli.vocabulary {
        Some(path) => Vocabulary::load_from_file(path)
            .with_context(|| format!("loading vocabulary from {}", path.display()))?,
        None => Vocabulary::load_default().context("loading default vocabulary")?,
    };
    info!("Loaded {} regions from {}", vocabulary.len(), vocabulary.source());

    if cli.list {
        print_vocabulary(&vocabulary);
        return Ok(());
    }

    // ── Build resolver ──────────────────────────────────────────

    let config = MatchConfig::default()
        .with_region_threshold(cli.region_threshold)
        .with_sub_region_threshold(cli.sub_region_threshold)
        .with_containment_score(cli.containment_score);
    let resolver = Resolver::new(Arc::new(vocabulary), config).context("invalid matching parameters")?;

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
        return runtime
            .block_on(agri_geo::server::start(&cli.host, cli.port, resolver))
            .with_context(|| format!("serving on {}:{}", cli.host, cli.port));
    }

    // ── Resolve once ────────────────────────────────────────────

    if cli.region.is_none() {
        eprintln!("Error: No region specified.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  agri-geo Kerala Ernakulam");
        eprintln!("  agri-geo --list");
        eprintln!("  agri-geo --serve");
        std::process::exit(1);
    }

    let raw = RawLocation {
        region_text: cli.region.clone(),
        sub_region_text: cli.sub_region.clone(),
    };
    let resolution = resolver.resolve_detailed(&raw);

    // Banner to stderr
    eprintln!("  {}", resolution.location.display_line());
    if let Some(ref warning) = resolution.location.warning {
        eprintln!("  \u{26A0}\u{FE0F}  {}", warning);
    }

    // JSON to stdout
    let json = if cli.explain {
        serde_json::to_string_pretty(&resolution)?
    } else {
        serde_json::to_string_pretty(&resolution.location)?
    };
    println!("{}", json);

    Ok(())
}

fn print_vocabulary(vocabulary: &Vocabulary) {
    eprintln!("  Vocabulary: {} ({} regions)", vocabulary.source(), vocabulary.len());
    for region in vocabulary.region_names() {
        let subs = vocabulary.sub_region_names(region).unwrap_or_default();
        println!("{} ({})", region, subs.len());
        for sub in subs {
            println!("  {}", sub);
        }
    }
}
