use std::sync::mpsc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::train::epoch_stats::EpochStats;
use crate::train::stop::StopSignal;
use crate::train::validation::ValidationMetrics;

/// Receives progress events from `train` and `validate`.
///
/// Progress reporting is a side channel: nothing a sink does affects the
/// returned loss history. Every method has a no-op default.
pub trait ProgressSink {
    /// `total_samples` is `num_batches * batch_size`, the display length.
    fn on_epoch_start(&mut self, _epoch: usize, _total_epochs: usize, _lr: f64, _total_samples: usize) {}

    /// `samples` is the size of the batch just processed.
    fn on_batch(&mut self, _samples: usize, _rolling_loss: f64) {}

    fn on_validation(&mut self, _metrics: &ValidationMetrics) {}

    fn on_epoch_end(&mut self, _stats: &EpochStats) {}

    /// The epoch in progress was abandoned.
    fn on_interrupt(&mut self, _epoch: usize) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {}

/// Terminal progress bar, one per epoch.
///
/// The bar is labelled `Epoch {epoch}, lr {lr}` and shows the rolling
/// training loss as its message.
#[derive(Default)]
pub struct BarSink {
    bar: Option<ProgressBar>,
}

impl BarSink {
    pub fn new() -> BarSink {
        BarSink::default()
    }

    fn close(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

impl ProgressSink for BarSink {
    fn on_epoch_start(&mut self, epoch: usize, _total_epochs: usize, lr: f64, total_samples: usize) {
        self.close();
        let bar = ProgressBar::new(total_samples as u64);
        let style = ProgressStyle::default_bar()
            .template("{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} loss={msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_prefix(format!("Epoch {epoch}, lr {lr}"));
        self.bar = Some(bar);
    }

    fn on_batch(&mut self, samples: usize, rolling_loss: f64) {
        if let Some(bar) = &self.bar {
            bar.inc(samples as u64);
            bar.set_message(format!("{rolling_loss:.5}"));
        }
    }

    fn on_validation(&mut self, _metrics: &ValidationMetrics) {
        self.close();
    }

    fn on_epoch_end(&mut self, _stats: &EpochStats) {
        self.close();
    }

    fn on_interrupt(&mut self, _epoch: usize) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
        eprintln!("done.");
    }
}

/// Forwards every completed epoch's `EpochStats` over a channel.
///
/// If the receiver hangs up and a stop signal is attached, the signal is
/// raised so the run winds down.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<EpochStats>,
    stop_on_disconnect: Option<StopSignal>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<EpochStats>) -> ChannelSink {
        ChannelSink { tx, stop_on_disconnect: None }
    }

    pub fn stop_on_disconnect(mut self, stop: StopSignal) -> ChannelSink {
        self.stop_on_disconnect = Some(stop);
        self
    }
}

impl ProgressSink for ChannelSink {
    fn on_epoch_end(&mut self, stats: &EpochStats) {
        if self.tx.send(stats.clone()).is_err() {
            log::debug!("progress receiver dropped after epoch {}", stats.epoch);
            if let Some(stop) = &self.stop_on_disconnect {
                stop.raise();
            }
        }
    }
}

/// Fans every event out to several sinks in order.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn ProgressSink>>,
}

impl MultiSink {
    pub fn new() -> MultiSink {
        MultiSink::default()
    }

    pub fn with(mut self, sink: impl ProgressSink + 'static) -> MultiSink {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl ProgressSink for MultiSink {
    fn on_epoch_start(&mut self, epoch: usize, total_epochs: usize, lr: f64, total_samples: usize) {
        for s in &mut self.sinks {
            s.on_epoch_start(epoch, total_epochs, lr, total_samples);
        }
    }

    fn on_batch(&mut self, samples: usize, rolling_loss: f64) {
        for s in &mut self.sinks {
            s.on_batch(samples, rolling_loss);
        }
    }

    fn on_validation(&mut self, metrics: &ValidationMetrics) {
        for s in &mut self.sinks {
            s.on_validation(metrics);
        }
    }

    fn on_epoch_end(&mut self, stats: &EpochStats) {
        for s in &mut self.sinks {
            s.on_epoch_end(stats);
        }
    }

    fn on_interrupt(&mut self, epoch: usize) {
        for s in &mut self.sinks {
            s.on_interrupt(epoch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(epoch: usize) -> EpochStats {
        EpochStats {
            epoch,
            total_epochs: 3,
            lr: 1e-3,
            rolling_loss: 0.5,
            train_loss: 0.5,
            val_loss: 0.4,
            batches: 2,
            elapsed_ms: 0,
        }
    }

    #[test]
    fn channel_sink_forwards_stats() {
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx);
        sink.on_epoch_end(&stats(1));
        assert_eq!(rx.recv().unwrap().epoch, 1);
    }

    #[test]
    fn dropped_receiver_raises_stop() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let stop = StopSignal::new();
        let mut sink = ChannelSink::new(tx).stop_on_disconnect(stop.clone());
        sink.on_epoch_end(&stats(1));
        assert!(stop.is_raised());
    }

    #[test]
    fn bar_sink_closes_bar_on_validation() {
        let mut sink = BarSink::new();
        sink.on_epoch_start(1, 3, 1e-3, 8);
        sink.on_batch(4, 0.5);
        assert!(sink.bar.is_some());
        sink.on_validation(&ValidationMetrics { valid_loss: 0.4, num_batches: 2 });
        assert!(sink.bar.is_none());
    }

    #[test]
    fn multi_sink_fans_out() {
        let (tx_a, rx_a) = mpsc::channel();
        let (tx_b, rx_b) = mpsc::channel();
        let mut sink = MultiSink::new()
            .with(NullSink)
            .with(ChannelSink::new(tx_a))
            .with(ChannelSink::new(tx_b));
        sink.on_epoch_end(&stats(2));
        assert_eq!(rx_a.recv().unwrap(), stats(2));
        assert_eq!(rx_b.recv().unwrap(), stats(2));
    }
}
