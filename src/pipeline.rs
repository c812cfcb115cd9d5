use crate::error::Result;
use crate::layout::WeekLayout;
use crate::manifest::{self, Manifest};
use crate::reconcile::{AssetNeeds, Backends, Reconciler, RunSummary};
use crate::throttle::Throttle;
use crate::words::read_words;

/// Brings one week directory up to date and rewrites its manifest.
///
/// The word list is read before anything else, so a missing list fails the
/// run with nothing written. Words dropped from the list fall out of the
/// manifest; their files stay on disk.
pub fn generate_week(
    layout: &WeekLayout,
    backends: Backends<'_>,
    throttle: Throttle,
    force: bool,
) -> Result<RunSummary> {
    let words = read_words(&layout.words_file())?;
    tracing::info!(count = words.len(), week = %layout.week_path, "words loaded");

    let mut prior = manifest::load_prior(&layout.manifest_file());
    let mut reconciler = Reconciler::new(backends, layout, throttle).force(force);
    let mut summary = RunSummary::default();
    let mut records = Vec::with_capacity(words.len());

    for word in &words {
        let report = reconciler.reconcile(word, prior.remove(word));
        summary.record(&report);
        records.push(report.record);
    }

    let manifest_path = layout.manifest_file();
    Manifest::new(records).save(&manifest_path)?;
    tracing::info!(path = %manifest_path.display(), "manifest written");

    Ok(summary)
}

/// What `generate_week` would do, without calling any service.
pub fn plan_week(layout: &WeekLayout, force: bool) -> Result<Vec<(String, AssetNeeds)>> {
    let words = read_words(&layout.words_file())?;
    let prior = manifest::load_prior(&layout.manifest_file());
    let audio_dir = layout.audio_dir();
    let images_dir = layout.images_dir();

    Ok(words
        .into_iter()
        .map(|word| {
            let needs = if force {
                AssetNeeds::all()
            } else {
                AssetNeeds::evaluate(&word, prior.get(&word), &audio_dir, &images_dir)
            };
            (word, needs)
        })
        .collect())
}
