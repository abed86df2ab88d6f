use super::assignment::Clusters;
use crate::Float;
use ndarray::ArrayView2;

/// Progress record handed to the iteration callback.
///
/// It borrows the state of the running fit, copy what you need to keep.
#[derive(Clone, Copy, Debug)]
pub struct IterationReport<'a, F> {
    /// Index of the restart that produced this report, starting at 0
    pub run: usize,
    /// Number of assignment/update iterations performed so far by this restart
    pub iteration: u64,
    /// Partition of the observations computed by the last assignment step
    pub clusters: &'a Clusters,
    /// Centroids computed by the last update step, with shape `(n_clusters, n_features)`
    pub centroids: ArrayView2<'a, F>,
    /// `true` only for the single report sent once the fit has finished
    pub clustering_complete: bool,
}

/// Observer notified while KMeans iterates.
///
/// It is called every `notify_count` iterations of every restart and one last time, with
/// `clustering_complete` set, for the retained restart. The callback runs inline: a panic
/// raised inside of it aborts the fit.
///
/// Every `Fn(IterationReport<F>)` closure is an `IterationCallback`.
pub trait IterationCallback<F: Float> {
    fn on_iteration(&self, report: IterationReport<'_, F>);
}

impl<F: Float, T> IterationCallback<F> for T
where
    T: Fn(IterationReport<'_, F>),
{
    fn on_iteration(&self, report: IterationReport<'_, F>) {
        self(report)
    }
}

/// Type of the callback slot before one is provided
pub type CallbackFn<F> = fn(IterationReport<'_, F>);

/// Callback emitting every report as a `tracing` event at `INFO` level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TracingCallback;

impl<F: Float> IterationCallback<F> for TracingCallback {
    fn on_iteration(&self, report: IterationReport<'_, F>) {
        tracing::info!(
            run = report.run,
            iteration = report.iteration,
            cluster_sizes = ?report.clusters.sizes().to_vec(),
            clustering_complete = report.clustering_complete,
            "k-means progress"
        );
    }
}
