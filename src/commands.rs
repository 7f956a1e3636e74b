use crate::cli::{ReportArgs, StatsArgs};
use crate::error::{ErrorKind, Result};
use crate::render::Markdown;
use exn::ResultExt;
use metagame_cache::{Cache, TournamentRecord};
use metagame_collect::{CardCatalog, Collector, EventFilter, build_report, card_codes, split_sides};
use metagame_config::Config;
use metagame_model::{Card, DecklistRecord};
use metagame_source::{AlwaysBeRunning, NetrunnerDb, ResultsQuery};
use std::path::Path;
use std::sync::Arc;
use time::OffsetDateTime;

/// Collect, cluster and write the markdown report.
pub async fn report(config_file: Option<&Path>, args: &ReportArgs) -> Result<()> {
    let config = Config::load_with(config_file, &args.overrides()).or_raise(|| ErrorKind::Config)?;
    let params = config.cluster_params().or_raise(|| ErrorKind::Config)?;
    let output = args.output(OffsetDateTime::now_utc().date());
    tracing::debug!(?config, "Loaded configuration");

    let cache = Cache::open(&config.cache_dir).or_raise(|| ErrorKind::Cache)?;
    let timeout = config.sources.timeout();
    let results =
        Arc::new(AlwaysBeRunning::new(&config.sources.results_url, timeout).or_raise(|| ErrorKind::Source)?);
    let decks = Arc::new(NetrunnerDb::new(&config.sources.decks_url, timeout).or_raise(|| ErrorKind::Source)?);

    tracing::info!(
        format = %config.format,
        start = %config.start_date,
        end = %config.end_date,
        "Collecting completed events"
    );
    let collector = Collector::new(results, decks.clone(), cache.clone())
        .with_workers(config.workers)
        .with_top_fraction(config.top_fraction());
    let filter = EventFilter::new(config.format.as_str(), config.start_date, config.end_date);
    let events = collector.events(&ResultsQuery::page(0, config.page_size), &filter).await;
    tracing::info!(tournaments = events.len(), "Collecting decklists");
    let pairs = collector.decklists(events).await;

    let (corp, runner) = split_sides(pairs);
    let catalog = CardCatalog::new(cache, decks)
        .with_concurrency(config.workers)
        .resolve(card_codes(corp.iter().chain(&runner)))
        .await;
    tracing::info!(corp = corp.len(), runner = runner.len(), "Clustering decklists");
    let report = build_report(corp, runner, &catalog, &params, config.top_cards);

    let markdown = Markdown(&report).to_string();
    tokio::fs::write(&output, markdown)
        .await
        .or_raise(|| ErrorKind::Output(output.clone()))?;
    tracing::info!(path = %output.display(), "Wrote report");
    Ok(())
}

/// Print how many records of each kind are cached.
pub async fn stats(config_file: Option<&Path>, args: &StatsArgs) -> Result<()> {
    let config = Config::load_with(config_file, &args.overrides()).or_raise(|| ErrorKind::Config)?;
    let cache = Cache::open(&config.cache_dir).or_raise(|| ErrorKind::Cache)?;
    let tournaments = cache.count::<TournamentRecord>().await.or_raise(|| ErrorKind::Cache)?;
    let decklists = cache.count::<DecklistRecord>().await.or_raise(|| ErrorKind::Cache)?;
    let cards = cache.count::<Card>().await.or_raise(|| ErrorKind::Cache)?;
    println!("cache:       {}", config.cache_dir.display());
    println!("tournaments: {tournaments}");
    println!("decklists:   {decklists}");
    println!("cards:       {cards}");
    Ok(())
}
