//! Positioned Rect CLI
//!
//! Usage:
//!   positioned-rect [OPTIONS] <COMMAND>
//!
//! Commands:
//!   resolve  Resolve a position string to absolute bounds
//!   rebase   Recompute a position string from absolute bounds
//!   convert  Re-express a position string with other modes
//!   check    Lint a position string
//!
//! Options:
//!   -s, --settings <FILE>  Settings file with parent area and components (TOML)
//!   -v, --verbose          Log conversions and lookups to stderr

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

use positioned_rect::{
    convert_with, lint, ComponentId, CoordinateTransform, PixelRect,
    RelativeCoordinateResolver, Settings,
};

#[derive(Parser)]
#[command(name = "positioned-rect")]
#[command(about = "Resolve and convert relative rectangle positions")]
struct Cli {
    /// Settings file with parent area and components (TOML format)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Log conversions and lookups to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a position string to absolute bounds
    Resolve {
        /// Position string, e.g. "20% 30 150 50%"
        #[arg(allow_hyphen_values = true)]
        position: String,

        #[command(flatten)]
        relative: RelativeArgs,

        /// Print unrounded values
        #[arg(long)]
        exact: bool,
    },

    /// Recompute a position string so it resolves to the given bounds
    Rebase {
        #[arg(allow_hyphen_values = true)]
        position: String,

        /// Target bounds as X,Y,W,H
        #[arg(short, long)]
        bounds: PixelRect,

        #[command(flatten)]
        relative: RelativeArgs,
    },

    /// Re-express a position string using the modes of another
    Convert {
        #[arg(allow_hyphen_values = true)]
        position: String,

        /// Position string whose suffixes give the new modes, e.g. "0% 0Rr 0 0M"
        #[arg(short, long, allow_hyphen_values = true)]
        to: String,

        /// Parent area as X,Y,W,H
        #[arg(short, long)]
        parent: Option<PixelRect>,
    },

    /// Report anything in a position string the decoder would silently ignore
    Check {
        #[arg(allow_hyphen_values = true)]
        position: String,
    },
}

#[derive(Args)]
struct RelativeArgs {
    /// Parent area as X,Y,W,H
    #[arg(short, long)]
    parent: Option<PixelRect>,

    /// Component (hex id) the x coordinate is relative to
    #[arg(long)]
    relative_x: Option<String>,

    /// Component (hex id) the y coordinate is relative to
    #[arg(long)]
    relative_y: Option<String>,

    /// Component (hex id) the width is relative to
    #[arg(long)]
    relative_w: Option<String>,

    /// Component (hex id) the height is relative to
    #[arg(long)]
    relative_h: Option<String>,
}

impl RelativeArgs {
    fn resolver(&self, position: &str) -> RelativeCoordinateResolver {
        let id = |arg: &Option<String>| arg.as_deref().and_then(ComponentId::parse_hex);
        RelativeCoordinateResolver::new(CoordinateTransform::parse(position))
            .with_relative_x(id(&self.relative_x))
            .with_relative_y(id(&self.relative_y))
            .with_relative_w(id(&self.relative_w))
            .with_relative_h(id(&self.relative_h))
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    // Load settings
    let settings = match &cli.settings {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    tracing::debug!(
        components = settings.components.len(),
        parent = ?settings.parent,
        "settings loaded"
    );

    let parent_or_default = |parent: Option<PixelRect>| {
        parent.or(settings.parent).unwrap_or_else(|| {
            eprintln!("Error: no parent area given (use --parent or a settings file)");
            std::process::exit(1);
        })
    };

    match cli.command {
        Command::Resolve {
            position,
            relative,
            exact,
        } => {
            let parent = parent_or_default(relative.parent);
            let resolver = relative.resolver(&position);
            if exact {
                let b = resolver.resolve_absolute_f64(parent, &settings.components);
                println!("{},{},{},{}", b.x, b.y, b.width, b.height);
            } else {
                println!("{}", resolver.resolve_absolute(parent, &settings.components));
            }
        }
        Command::Rebase {
            position,
            bounds,
            relative,
        } => {
            let parent = parent_or_default(relative.parent);
            let mut resolver = relative.resolver(&position);
            resolver.rebase_from_bounds(bounds, parent, &settings.components);
            println!("{}", resolver.rect.to_string_with(&settings.encoding));
        }
        Command::Convert {
            position,
            to,
            parent,
        } => {
            let parent = parent_or_default(parent);
            println!("{}", convert_with(&position, &to, parent, &settings.encoding));
        }
        Command::Check { position } => {
            let warnings = lint::check(&position);
            if warnings.is_empty() {
                println!("ok");
                return;
            }
            for warning in &warnings {
                eprint!("{}", warning.format(&position, "position"));
            }
            std::process::exit(1);
        }
    }
}
