use anyhow::{Context, Result};
use std::{
    env,
    fs::File,
    io::{self, BufWriter},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wtr::{
    config::Config,
    fetch,
    Collection, ProductCatalogue, Record,
};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // logs go to stderr so the CSV can be piped from stdout
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    // ─── 2) configuration: optional YAML file, then env overrides ─────
    let config = match env::args().nth(1) {
        Some(path) => Config::from_yaml_file(&path)?,
        None => Config::default(),
    }
    .apply_env()?;
    info!(source = %config.source, revision = %config.revision, "startup");

    // ─── 3) load ─────────────────────────────────────────────────────
    let reader = fetch::open_source(&config.source, &config.cache_dir)?;
    let mut register = Collection::read_csv(reader, config.revision)
        .with_context(|| format!("loading {}", config.source))?;

    // ─── 4) filter ───────────────────────────────────────────────────
    let predicates = config.filters.predicates(register.schema());
    if !predicates.is_empty() {
        let refs: Vec<&dyn Fn(&Record) -> bool> = predicates.iter().map(|p| &**p).collect();
        register.filter_in_place(&refs);
    }

    let catalogue = ProductCatalogue::ofcom();
    let field = register.schema().product_number_field();
    let unknown = register
        .iter()
        .filter(|r| !catalogue.contains(r.get(field)))
        .count();
    info!(
        rows = register.len(),
        companies = register.companies().len(),
        unknown_product_codes = unknown,
        "register ready"
    );

    // ─── 5) write ────────────────────────────────────────────────────
    match &config.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
            register.write_csv(BufWriter::new(file))?;
            info!(path = %path.display(), "written");
        }
        None => register.write_csv(io::stdout().lock())?,
    }

    Ok(())
}
