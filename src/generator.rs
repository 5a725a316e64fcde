use crate::{
    components::{
        parse_trust_list, reconcile, render_bundle, write_atomically, FingerprintIndex,
        TrustListFetcher, TRUSTED_CAS,
    },
    configs::GlobalConfig,
    error::AppResult,
    types::TrustListEntry,
};
use anyhow::{Context, Result as AnyResult};
use std::future::Future;

/// The rendered bundle and what went into it.
#[derive(Clone, Debug)]
pub struct Generated {
    pub source: String,
    pub entries: usize,
    pub matched: usize,
    pub bundled: usize,
    pub unmatched: Vec<TrustListEntry>,
}

/// Runs one generation: fetch, export, select, then replace the output file.
pub async fn run(config: GlobalConfig) -> AnyResult<()> {
    let fetcher = TrustListFetcher::new(config.trust_list_url.as_str())?;
    info!("Fetching the trust list from {}", fetcher.url());
    let document = fetcher
        .fetch()
        .await
        .context("Failed to fetch the trust list")?;

    let store = config.store.source();
    let output_name = config.output.display().to_string();
    let generated = generate(&document, &output_name, || store.load_index()).await?;

    write_atomically(&config.output, generated.source.as_bytes())?;
    info!(
        "Wrote {} certificates to {} ({} listed, {} found locally, {} missing)",
        generated.bundled,
        output_name,
        generated.entries,
        generated.matched,
        generated.unmatched.len()
    );
    Ok(())
}

/// Selects the bundled certificates and renders the generated source.
///
/// The trust list is parsed before `load_store` is called, so a document
/// that cannot be understood never triggers the store export.
pub async fn generate<F, Fut>(
    document: &str,
    output_name: &str,
    load_store: F,
) -> AppResult<Generated>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<FingerprintIndex>>,
{
    let entries = parse_trust_list(document)?;
    info!("Trust list has {} entries", entries.len());

    let index = load_store().await?;
    if index.is_empty() {
        warn!("The local store export contains no certificates");
    } else {
        info!("Local store has {} certificates", index.len());
    }

    let reconciled = reconcile(&entries, &index);
    let bundle = TRUSTED_CAS.filter(reconciled.certificates.iter().copied());

    Ok(Generated {
        source: render_bundle(output_name, bundle.iter().copied()),
        entries: entries.len(),
        matched: reconciled.certificates.len(),
        bundled: bundle.len(),
        unmatched: reconciled.unmatched.into_iter().cloned().collect(),
    })
}
