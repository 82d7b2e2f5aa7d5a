use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use kvote_io::read_queries;
use kvote_knn::KnnScratch;

use crate::cli::ClassifyArgs;
use crate::convert;
use crate::report::{self, ClassificationRecord, ClassifyReport};
use crate::setup;

pub fn run(args: ClassifyArgs) -> Result<()> {
    let _cmd = info_span!("classify").entered();

    let config = setup::load_config(&args.classifier)?;
    let (clf, knn_cfg) = setup::load_classifier(&config)?;

    // Query files carry no label column; only the layout flags apply.
    let reader_cfg = convert::build_reader_config(&config.io)?;
    info!(path = %args.queries.display(), "reading queries");
    let queries = read_queries(&args.queries, &reader_cfg)
        .with_context(|| format!("failed to read queries: {}", args.queries.display()))?;

    let dim = clf.pool().iter().next().map(|s| s.features().len());
    if let Some(dim) = dim
        && let Some((row, q)) = queries.iter().enumerate().find(|(_, q)| q.len() != dim)
    {
        bail!(
            "query row {row} has {} features, samples have {dim}",
            q.len()
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut scratch = KnnScratch::new(clf.pool().len());
    let mut results = Vec::with_capacity(queries.len());

    for (row, query) in queries.iter().enumerate() {
        let classification = clf
            .classify_with_scratch(query, &mut scratch)
            .with_context(|| format!("failed to classify query row {row}"))?;
        writeln!(out, "Query {row}:")?;
        report::print_classification(&mut out, &classification)?;
        writeln!(out)?;
        results.push(ClassificationRecord::from(&classification));
    }
    info!(queries = results.len(), "classification complete");

    if let Some(ref path) = args.output {
        let summary = ClassifyReport {
            k: knn_cfg.k(),
            metric: knn_cfg.metric().to_string(),
            samples: clf.pool().len(),
            results,
        };
        report::write_json(path, &summary)?;
    }

    Ok(())
}
