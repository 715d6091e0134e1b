//! The sampling loop.
//!
//! Each tick measures once, updates the window and failure state, recomputes
//! the statistics and redraws the whole screen. Between ticks the loop waits
//! on [`Controls`] so a quit request is seen at tick boundaries.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::data::{FailureState, FailureTracker, Sample, SlidingWindow, StatusMessage, Stats};
use crate::error::{ConfigError, MonitorError, RenderError};
use crate::events::{Command, Controls};
use crate::export::{self, ExportSnapshot};
use crate::plan::RenderPlanner;
use crate::probe::{LatencyProbe, ProbeTimeout};
use crate::ui::{Canvas, Scene, SessionInfo};

/// Default file written by the export command.
pub const EXPORT_FILE: &str = "pingwatch_export.json";

/// How long a transient notice stays in the status bar.
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Outcome of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub sample: Sample,
    /// Sample pushed out of the window, if it was full.
    pub evicted: Option<Sample>,
    pub state: FailureState,
    pub stats: Stats,
    pub status: Option<StatusMessage>,
}

/// Owns all monitoring state and drives probe, window, tracker and canvas.
#[derive(Debug)]
pub struct MonitorLoop<P, C> {
    probe: P,
    canvas: C,
    host: String,
    interval_secs: f64,
    interval: Duration,
    timeout: ProbeTimeout,
    window: SlidingWindow,
    tracker: FailureTracker,
    planner: RenderPlanner,
    ticks: u64,
    notice: Option<(String, Instant)>,
    export_path: PathBuf,
}

impl<P: LatencyProbe, C: Canvas> MonitorLoop<P, C> {
    /// Build a monitor from `settings`, which are validated first.
    pub fn new(settings: &Settings, probe: P, canvas: C) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            probe,
            canvas,
            host: settings.host.clone(),
            interval_secs: settings.interval,
            interval: settings.interval(),
            timeout: ProbeTimeout::for_interval(settings.interval),
            window: SlidingWindow::new(settings.capacity)?,
            tracker: FailureTracker::new(settings.alert_threshold),
            planner: RenderPlanner::new(settings.ymax, settings.yticks),
            ticks: 0,
            notice: None,
            export_path: PathBuf::from(EXPORT_FILE),
        })
    }

    /// Write exports somewhere other than [`EXPORT_FILE`].
    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn tracker(&self) -> &FailureTracker {
        &self.tracker
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Accumulated monitoring time: ticks times the configured interval.
    pub fn elapsed_secs(&self) -> f64 {
        self.ticks as f64 * self.interval_secs
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(
            &self.window,
            self.elapsed_secs(),
            self.tracker.consecutive_failures(),
        )
    }

    /// Run ticks on a fixed schedule until `controls` asks to quit.
    ///
    /// Returns `Ok(())` on a requested shutdown and `Err` on a fatal error.
    pub fn run(&mut self, controls: &mut impl Controls) -> Result<(), MonitorError> {
        info!(
            host = %self.host,
            interval = self.interval_secs,
            alert_threshold = self.tracker.threshold(),
            "monitoring started"
        );

        self.render()?;
        let mut next_tick = Instant::now();

        loop {
            loop {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                match controls.next_command(timeout).map_err(MonitorError::Signal)? {
                    Some(Command::Quit) => {
                        info!(ticks = self.ticks, "monitoring stopped by user");
                        return Ok(());
                    }
                    Some(Command::Export) => self.export(),
                    Some(Command::Redraw) => self.render()?,
                    None => {}
                }
                if Instant::now() >= next_tick {
                    break;
                }
            }

            self.tick()?;

            // Missed deadlines are skipped rather than replayed in a burst.
            let now = Instant::now();
            next_tick = next_tick
                .checked_add(self.interval)
                .map_or(now, |next| next.max(now));
        }
    }

    /// Take one measurement and redraw.
    pub fn tick(&mut self) -> Result<TickReport, MonitorError> {
        let sample = match self.probe.measure(&self.host, self.timeout) {
            Ok(sample) => sample,
            Err(e) => {
                error!(error = %e, "probe unavailable");
                return Err(e.into());
            }
        };
        self.ticks += 1;
        debug!(tick = self.ticks, ?sample, "sample");

        let evicted = self.window.push(sample);
        let previous = self.tracker.state();
        let state = self.tracker.update(&sample);
        log_transition(&self.host, previous, state);

        self.render()?;

        Ok(TickReport {
            sample,
            evicted,
            state,
            stats: self.stats(),
            status: self.tracker.message(&self.host),
        })
    }

    /// Draw the current state. Render errors are recovered by the canvas.
    fn render(&mut self) -> Result<(), MonitorError> {
        if let Err(err) = self.draw() {
            warn!(error = %err, "render failed, clearing screen");
            self.canvas.recover(&err).map_err(MonitorError::Terminal)?;
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        let size = self.canvas.size()?;
        let plan = self.planner.plan(&self.window, size);
        let stats = self.stats();
        let status = self.tracker.message(&self.host);
        let notice = self.current_notice();

        let session = SessionInfo {
            host: &self.host,
            probe: self.probe.description(),
            interval_secs: self.interval_secs,
            y_max: self.planner.y_max(),
            samples: self.window.len(),
            capacity: self.window.capacity(),
        };
        let scene = Scene {
            plan: &plan,
            stats: &stats,
            status: status.as_ref(),
            session,
            notice: notice.as_deref(),
        };
        self.canvas.draw(&scene)
    }

    fn current_notice(&self) -> Option<String> {
        self.notice
            .as_ref()
            .filter(|(_, at)| at.elapsed() < NOTICE_TTL)
            .map(|(msg, _)| msg.clone())
    }

    fn set_notice(&mut self, message: String) {
        self.notice = Some((message, Instant::now()));
    }

    /// Export the current window and statistics, reporting the outcome in the status bar.
    pub fn export(&mut self) {
        let path = self.export_path.clone();
        let message = match self.export_to(&path) {
            Ok(()) => {
                info!(path = %path.display(), "exported snapshot");
                format!("Exported to {}", path.display())
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                format!("Export failed: {:#}", e)
            }
        };
        self.set_notice(message);
        if let Err(e) = self.render() {
            warn!(error = %e, "redraw after export failed");
        }
    }

    fn export_to(&self, path: &Path) -> anyhow::Result<()> {
        let stats = self.stats();
        let status = self.tracker.message(&self.host);
        let snapshot = ExportSnapshot {
            host: &self.host,
            interval_secs: self.interval_secs,
            capacity: self.window.capacity(),
            samples: self.window.samples().map(Sample::value).collect(),
            stats: &stats,
            status: status.as_ref().map(|s| s.text.as_str()),
        };
        export::write_json(path, &snapshot)
    }
}

fn log_transition(host: &str, previous: FailureState, state: FailureState) {
    match (previous, state) {
        (FailureState::Alert(_), FailureState::Alert(_)) => {}
        (_, FailureState::Alert(n)) => warn!(host, failures = n, "connection lost"),
        (FailureState::Alert(n), FailureState::Normal) => {
            info!(host, failures = n, "connection restored")
        }
        (FailureState::Warning(n), FailureState::Normal) => {
            info!(host, failures = n, "ping normalized")
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::data::StatusKind;
    use crate::error::ProbeError;
    use crate::plan::{RenderPlan, TerminalSize};
    use crate::ui::{graph, TerminalCanvas, Theme};

    /// Replays a fixed list of outcomes; `None` is a failed ping.
    #[derive(Debug)]
    struct ScriptedProbe {
        script: VecDeque<Option<f64>>,
        calls: Vec<(String, ProbeTimeout)>,
    }

    impl ScriptedProbe {
        fn new(script: &[Option<f64>]) -> Self {
            Self {
                script: script.iter().copied().collect(),
                calls: Vec::new(),
            }
        }
    }

    impl LatencyProbe for ScriptedProbe {
        fn measure(&mut self, host: &str, timeout: ProbeTimeout) -> Result<Sample, ProbeError> {
            self.calls.push((host.to_string(), timeout));
            Ok(Sample::from(self.script.pop_front().flatten()))
        }

        fn description(&self) -> &str {
            "scripted"
        }
    }

    #[derive(Debug)]
    struct MissingToolProbe;

    impl LatencyProbe for MissingToolProbe {
        fn measure(&mut self, _host: &str, _timeout: ProbeTimeout) -> Result<Sample, ProbeError> {
            Err(ProbeError::Unavailable {
                program: "ping".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }

        fn description(&self) -> &str {
            "missing"
        }
    }

    #[derive(Debug, Clone)]
    struct Drawn {
        plan: RenderPlan,
        stats: Stats,
        status: Option<StatusMessage>,
        notice: Option<String>,
    }

    /// Records every scene instead of drawing it.
    #[derive(Debug, Default)]
    struct RecordingCanvas {
        frames: Vec<Drawn>,
        failing_draws: usize,
        recover_fails: bool,
        recoveries: usize,
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> Result<TerminalSize, RenderError> {
            Ok(TerminalSize { cols: 100, rows: 40 })
        }

        fn draw(&mut self, scene: &Scene<'_>) -> Result<(), RenderError> {
            if self.failing_draws > 0 {
                self.failing_draws -= 1;
                return Err(RenderError::Layout("backend gone".to_string()));
            }
            self.frames.push(Drawn {
                plan: scene.plan.clone(),
                stats: scene.stats.clone(),
                status: scene.status.cloned(),
                notice: scene.notice.map(str::to_string),
            });
            Ok(())
        }

        fn recover(&mut self, _error: &RenderError) -> Result<(), RenderError> {
            self.recoveries += 1;
            if self.recover_fails {
                return Err(RenderError::Layout("still gone".to_string()));
            }
            Ok(())
        }
    }

    /// Hands out scripted commands; `None` waits out the full timeout. Quits when exhausted.
    struct ScriptedControls(VecDeque<Option<Command>>);

    impl Controls for ScriptedControls {
        fn next_command(&mut self, timeout: Duration) -> std::io::Result<Option<Command>> {
            match self.0.pop_front() {
                Some(None) => {
                    std::thread::sleep(timeout);
                    Ok(None)
                }
                Some(command) => Ok(command),
                None => Ok(Some(Command::Quit)),
            }
        }
    }

    fn settings(capacity: usize, alert_threshold: u32, interval: f64) -> Settings {
        Settings {
            host: "8.8.8.8".to_string(),
            interval,
            capacity,
            alert_threshold,
            ..Settings::default()
        }
    }

    fn monitor(
        script: &[Option<f64>],
        settings: &Settings,
    ) -> MonitorLoop<ScriptedProbe, RecordingCanvas> {
        MonitorLoop::new(settings, ScriptedProbe::new(script), RecordingCanvas::default()).unwrap()
    }

    #[test]
    fn test_scripted_outage_and_recovery() {
        let script = [Some(12.3), Some(15.0), None, None, None, None, Some(9.8)];
        let mut monitor = monitor(&script, &settings(5, 3, 3.0));

        let reports: Vec<TickReport> = (0..script.len()).map(|_| monitor.tick().unwrap()).collect();

        let states: Vec<FailureState> = reports.iter().map(|r| r.state).collect();
        assert_eq!(
            states,
            vec![
                FailureState::Normal,
                FailureState::Normal,
                FailureState::Warning(1),
                FailureState::Warning(2),
                FailureState::Alert(3),
                FailureState::Alert(4),
                FailureState::Normal,
            ]
        );

        // Alert appears on the third consecutive failure (tick 5)
        assert_eq!(reports[3].status.as_ref().unwrap().kind, StatusKind::Warning);
        let alert = reports[4].status.as_ref().unwrap();
        assert_eq!(alert.kind, StatusKind::Alert);
        assert!(alert.text.contains("LOST (3 failures)"));
        assert!(reports[5].status.as_ref().unwrap().text.contains("LOST (4 failures)"));

        let info = reports[6].status.as_ref().unwrap();
        assert_eq!(info.kind, StatusKind::Info);
        assert!(info.text.contains("restored after 4 failures"));

        let last = &reports[6].stats;
        assert_eq!(last.current, Some(Sample::Latency(9.8)));
        assert_eq!(last.average, Some(9.8));
        assert_eq!(last.consecutive_failures, 0);
        assert_eq!(last.elapsed_secs, 21.0);

        assert_eq!(reports[5].evicted, Some(Sample::Latency(12.3)));
        assert_eq!(reports[6].evicted, Some(Sample::Latency(15.0)));
        let window: Vec<Sample> = monitor.window().samples().copied().collect();
        assert_eq!(
            window,
            vec![
                Sample::Failed,
                Sample::Failed,
                Sample::Failed,
                Sample::Failed,
                Sample::Latency(9.8),
            ]
        );

        let frames = &monitor.canvas().frames;
        assert_eq!(frames.len(), 7);
        let last_frame = frames.last().unwrap();
        assert_eq!(last_frame.plan.series_y, vec![0.0, 0.0, 0.0, 0.0, 9.8]);
        assert_eq!(
            last_frame.plan.failure_marker_x.iter().copied().collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(last_frame.stats, reports[6].stats);
        assert_eq!(last_frame.status.as_ref(), reports[6].status.as_ref());
    }

    #[test]
    fn test_info_clears_after_one_cycle() {
        let script = [None, Some(5.0), Some(6.0)];
        let mut monitor = monitor(&script, &settings(10, 3, 1.0));

        monitor.tick().unwrap();
        let recovered = monitor.tick().unwrap();
        assert_eq!(recovered.status.unwrap().kind, StatusKind::Info);
        let next = monitor.tick().unwrap();
        assert!(next.status.is_none());
        assert!(monitor.canvas().frames[2].status.is_none());
    }

    #[test]
    fn test_probe_receives_host_and_derived_timeout() {
        let mut monitor = monitor(&[Some(1.0)], &settings(10, 3, 0.5));
        monitor.tick().unwrap();

        let (host, timeout) = &monitor.probe.calls[0];
        assert_eq!(host, "8.8.8.8");
        assert_eq!(*timeout, ProbeTimeout::for_interval(0.5));
    }

    #[test]
    fn test_unavailable_probe_is_fatal() {
        let mut monitor =
            MonitorLoop::new(&settings(10, 3, 1.0), MissingToolProbe, RecordingCanvas::default())
                .unwrap();

        let err = monitor.tick().unwrap_err();
        assert!(matches!(
            err,
            MonitorError::Probe(ProbeError::Unavailable { .. })
        ));
        assert!(monitor.window().is_empty());

        let mut controls = ScriptedControls(VecDeque::from([None, None]));
        assert!(monitor.run(&mut controls).is_err());
    }

    #[test]
    fn test_render_error_is_recovered() {
        let mut monitor = monitor(&[Some(1.0), Some(2.0)], &settings(10, 3, 1.0));
        monitor.canvas.failing_draws = 1;

        let report = monitor.tick().unwrap();
        assert_eq!(report.sample, Sample::Latency(1.0));
        assert_eq!(monitor.canvas().recoveries, 1);
        assert!(monitor.canvas().frames.is_empty());

        monitor.tick().unwrap();
        assert_eq!(monitor.canvas().frames.len(), 1);
        assert_eq!(monitor.window().len(), 2);
    }

    #[test]
    fn test_failed_recovery_is_fatal() {
        let mut monitor = monitor(&[Some(1.0)], &settings(10, 3, 1.0));
        monitor.canvas.failing_draws = 1;
        monitor.canvas.recover_fails = true;

        assert!(matches!(monitor.tick(), Err(MonitorError::Terminal(_))));
    }

    #[test]
    fn test_run_ticks_until_quit() {
        let mut monitor = monitor(&[Some(1.0), None, Some(3.0)], &settings(10, 3, 0.001));
        let mut controls = ScriptedControls(VecDeque::from([None, None, None, Some(Command::Quit)]));

        monitor.run(&mut controls).unwrap();

        assert_eq!(monitor.window().len(), 3);
        assert!((monitor.elapsed_secs() - 0.003).abs() < 1e-12);
        // Initial "waiting" frame plus one per tick
        let frames = &monitor.canvas().frames;
        assert_eq!(frames.len(), 4);
        assert!(frames[0].plan.is_empty());
    }

    #[test]
    fn test_new_rejects_unrepresentable_interval() {
        let result = MonitorLoop::new(
            &settings(10, 3, 1e19),
            ScriptedProbe::new(&[]),
            RecordingCanvas::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "interval",
                ..
            })
        ));
    }

    #[test]
    fn test_run_schedules_longest_interval() {
        let mut monitor = monitor(&[Some(1.0)], &settings(10, 3, 86_400.0));
        let mut controls = ScriptedControls(VecDeque::from([None, Some(Command::Quit)]));

        monitor.run(&mut controls).unwrap();

        assert_eq!(monitor.window().len(), 1);
        assert_eq!(monitor.elapsed_secs(), 86_400.0);
        assert_eq!(monitor.tracker().threshold(), 3);
    }

    #[test]
    fn test_export_writes_file_and_sets_notice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let mut monitor = monitor(&[Some(4.0), None], &settings(10, 3, 1.0)).with_export_path(&path);
        monitor.tick().unwrap();
        monitor.tick().unwrap();

        monitor.export();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["samples"], serde_json::json!([4.0, null]));
        assert_eq!(value["stats"]["consecutive_failures"], 1);

        let notice = monitor.canvas().frames.last().unwrap().notice.clone().unwrap();
        assert!(notice.starts_with("Exported to"));
    }

    #[test]
    fn test_export_failure_is_reported_not_fatal() {
        let mut monitor = monitor(&[Some(4.0)], &settings(10, 3, 1.0))
            .with_export_path("/nonexistent/dir/snapshot.json");
        monitor.tick().unwrap();
        monitor.export();

        let notice = monitor.canvas().frames.last().unwrap().notice.clone().unwrap();
        assert!(notice.starts_with("Export failed"));
    }

    fn screen_text(monitor: &MonitorLoop<ScriptedProbe, TerminalCanvas<TestBackend>>) -> String {
        let buffer = monitor.canvas().terminal().backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_terminal_canvas_draws_graph_and_stats() {
        let terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let canvas = TerminalCanvas::new(terminal, Theme::dark());
        let script = [Some(20.0), None, None, None];
        let mut monitor =
            MonitorLoop::new(&settings(50, 3, 3.0), ScriptedProbe::new(&script), canvas).unwrap();

        let mut controls = ScriptedControls(VecDeque::new());
        monitor.run(&mut controls).unwrap();
        assert!(screen_text(&monitor).contains(graph::WAITING));

        for _ in 0..script.len() {
            monitor.tick().unwrap();
        }

        let text = screen_text(&monitor);
        assert!(text.contains("!!! ALERT: Connection to 8.8.8.8 LOST (3 failures) !!!"));
        assert!(text.contains(graph::TITLE));
        assert!(text.contains("Current Latency: PING FAILED"));
        assert!(text.contains("Average (valid pings): 20.00 ms"));
        assert!(text.contains("Monitoring Time: 12s"));
        assert!(text.contains("Consecutive Failures: 3"));
        assert!(text.contains("4/50 samples"));
    }

    #[test]
    fn test_terminal_canvas_survives_tiny_terminal() {
        let terminal = Terminal::new(TestBackend::new(10, 6)).unwrap();
        let canvas = TerminalCanvas::new(terminal, Theme::dark());
        let mut monitor =
            MonitorLoop::new(&settings(5, 3, 1.0), ScriptedProbe::new(&[Some(1.0)]), canvas)
                .unwrap();

        let report = monitor.tick().unwrap();
        assert_eq!(report.sample, Sample::Latency(1.0));
    }
}
