use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use movie_catalog::{Account, Catalog, CatalogConfig, SeedDocument};

struct Args {
    config: Option<PathBuf>,
    seed: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        seed: None,
    };
    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => match iter.next() {
                Some(path) => args.config = Some(PathBuf::from(path)),
                None => bail!("--config needs a path"),
            },
            other if other.starts_with('-') => bail!("Unknown option: {other}"),
            path => {
                if args.seed.is_some() {
                    bail!("Only one seed document can be given");
                }
                args.seed = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    }
    .with_env_overrides()?;

    info!(version = movie_catalog::VERSION, "starting movie catalog");
    let mut catalog = Catalog::new(config);

    if let Some(path) = &args.seed {
        info!(path = %path.display(), "importing seed document");
        let document = SeedDocument::load(path)?;
        let report = document.apply(&mut catalog);
        info!(
            applied = report.applied,
            rejected = report.rejected,
            "import finished"
        );
    }

    let summary = catalog.summary();
    info!(
        movies = summary.movies,
        directors = summary.directors,
        actors = summary.actors,
        users = summary.users,
        admins = summary.admins,
        "catalog ready"
    );
    for account in catalog.all_accounts() {
        info!(
            kind = account.kind().as_str(),
            id = %account.id(),
            username = %account.username(),
            "account"
        );
    }

    Ok(())
}
