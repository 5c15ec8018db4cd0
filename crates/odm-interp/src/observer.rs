//! Fill observer trait for progress reporting.

use std::fmt;

use crate::{Diagnostics, StrategyCounters};

/// The passes of a fill run, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pass {
    Cascade,
    ManualOverride,
    ReverseFallback,
    OutlierCorrection,
    SelfDistance,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pass::Cascade           => "interpolation cascade",
            Pass::ManualOverride    => "manual overrides",
            Pass::ReverseFallback   => "reverse fallback",
            Pass::OutlierCorrection => "outlier correction",
            Pass::SelfDistance      => "self-distance",
        })
    }
}

/// Cascade progress snapshot, passed to [`FillObserver::on_progress`].
#[derive(Copy, Clone, Debug)]
pub struct Progress<'a> {
    /// Pairs visited so far.
    pub done:       usize,
    /// Pairs the cascade will visit in total.
    pub total:      usize,
    pub counters:   &'a StrategyCounters,
    /// Pairs no strategy could fill so far.
    pub unresolved: usize,
}

impl Progress<'_> {
    /// Share of pairs visited, in percent.
    pub fn percent(&self) -> f64 {
        percent(self.done, self.total)
    }

    /// Share of visited pairs that `count` represents, in percent.
    pub fn share(&self, count: usize) -> f64 {
        percent(count, self.done)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 { 100.0 } else { part as f64 * 100.0 / whole as f64 }
}

/// Callbacks invoked by [`FillEngine::run`][crate::FillEngine::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait FillObserver {
    /// Called before a pass starts.  `pending` is the number of pairs (or,
    /// for post-processing, cells) the pass will visit.
    fn on_pass_start(&mut self, _pass: Pass, _pending: usize) {}

    /// Called every `progress_interval` cascade pairs and once after the
    /// last one.
    fn on_progress(&mut self, _progress: &Progress<'_>) {}

    /// Called after a pass, with the counters as they stand.
    fn on_pass_end(&mut self, _pass: Pass, _diagnostics: &Diagnostics) {}

    /// Called once after the last pass.
    fn on_fill_end(&mut self, _diagnostics: &Diagnostics) {}
}

/// A [`FillObserver`] that does nothing.
pub struct NoopObserver;

impl FillObserver for NoopObserver {}

/// A [`FillObserver`] that reports through the `log` facade.
#[derive(Default)]
pub struct LogObserver;

impl FillObserver for LogObserver {
    fn on_pass_start(&mut self, pass: Pass, pending: usize) {
        log::info!("{pass}: {pending} pending");
    }

    fn on_progress(&mut self, p: &Progress<'_>) {
        let mut line = format!("interpolation {:.1}%", p.percent());
        for (strategy, count) in p.counters.iter() {
            line.push_str(&format!(" | {strategy}: {count} ({:.1}%)", p.share(count)));
        }
        line.push_str(&format!(" | unresolved: {} ({:.1}%)", p.unresolved, p.share(p.unresolved)));
        log::info!("{line}");
    }

    fn on_pass_end(&mut self, pass: Pass, d: &Diagnostics) {
        match pass {
            Pass::Cascade => log::info!(
                "{pass}: {} of {} pairs filled, {} unresolved",
                d.strategies.total(),
                d.missing_pairs,
                d.unresolved_after_cascade
            ),
            Pass::ManualOverride => log::info!(
                "{pass}: {} of {} unresolved pairs filled",
                d.manual_override,
                d.unresolved_after_cascade
            ),
            Pass::ReverseFallback => log::info!(
                "{pass}: {} pairs filled, {} remain unresolved",
                d.reverse_fallback,
                d.unresolved_final
            ),
            Pass::OutlierCorrection => log::info!(
                "{pass}: {} pairs averaged, {} clamped",
                d.outliers_averaged,
                d.outliers_clamped
            ),
            Pass::SelfDistance => log::info!(
                "{pass}: {} measured, {} from lattice neighbors, {} from mean of means",
                d.self_measured,
                d.self_from_lattice,
                d.self_from_mean_of_means
            ),
        }
    }

    fn on_fill_end(&mut self, d: &Diagnostics) {
        if d.unresolved_final > 0 {
            log::warn!("{} pairs could not be filled and need manual follow-up", d.unresolved_final);
        } else {
            log::info!("matrix complete: all {} cells connected", d.cells);
        }
    }
}
