use anicat_config::Overrides;
use anicat_library::Traversal;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "anicat")]
#[command(author, version, about = "Match a directory of anime against the AniDB title database")]
pub struct Cli {
    /// AniDB title dump (anime-titles.xml, optionally gzipped)
    pub titledb: PathBuf,

    /// Directory containing the anime to catalog
    pub mediadir: PathBuf,

    /// Directory for cached AniDB replies [default: ./cache]
    pub cachedir: Option<PathBuf>,

    /// Configuration file (must exist if given)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory traversal mode: shallow or recursive
    #[arg(short, long, value_parser = parse_traversal)]
    pub traversal: Option<Traversal>,

    /// Emit matched titles without contacting AniDB or the cache
    #[arg(long)]
    pub no_augment: bool,

    /// Pretty-print the JSON catalog
    #[arg(long)]
    pub pretty: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            cache_dir: self.cachedir.clone(),
            traversal: self.traversal,
            augment: self.no_augment.then_some(false),
        }
    }
}

fn parse_traversal(s: &str) -> Result<Traversal, String> {
    s.parse().map_err(|err: anicat_library::error::Error| (*err).to_string())
}
