use color_eyre::eyre::Result;
use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use questline_flow::Flow;
use questline_flow::FlowEvent;
use questline_flow::Screen;
use ratatui::Frame;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc::unbounded_channel;

use crate::app_event::AppEvent;
use crate::app_event::MockOp;
use crate::app_event_sender::AppEventSender;
use crate::screens::ScreenWidget;
use crate::tui::Tui;

/// Delay for the wizard's step-to-step transitions. Short enough to read
/// as "saving", long enough to show the button in its busy state.
const STEP_DELAY: Duration = Duration::from_millis(300);

/// Timing knobs, resolved from the command line before the app starts.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Timing {
    pub(crate) mock_delay: Duration,
    pub(crate) carousel_interval: Duration,
    pub(crate) carousel_autoplay: bool,
}

pub(crate) struct App {
    pub(crate) app_event_tx: AppEventSender,

    /// Navigation state machine; the single source of truth for which
    /// screen is showing.
    pub(crate) flow: Flow,

    /// Widget for the current flow screen, rebuilt on every transition.
    pub(crate) screen: ScreenWidget,

    pub(crate) timing: Timing,

    /// Bumped on every screen change. Simulated backend calls carry the
    /// epoch they were scheduled under, and results from an older epoch
    /// are dropped on arrival.
    pub(crate) op_epoch: u64,

    /// Controls the ticker thread that sends CarouselTick events.
    pub(crate) carousel_running: Arc<AtomicBool>,
}

impl App {
    pub(crate) async fn run(tui: &mut Tui, timing: Timing) -> Result<()> {
        use tokio_stream::StreamExt;
        let (app_event_tx, mut app_event_rx) = unbounded_channel();
        let mut app = Self::new(AppEventSender::new(app_event_tx), timing);

        let mut terminal_events = EventStream::new();

        tui.draw(|frame| app.render(frame))?;

        while select! {
            Some(event) = app_event_rx.recv() => {
                app.handle_app_event(event)
            }
            maybe_event = terminal_events.next() => {
                match maybe_event {
                    Some(Ok(event)) => app.handle_terminal_event(&event),
                    Some(Err(err)) => {
                        tracing::error!("terminal event stream error: {err}");
                        true
                    }
                    None => false,
                }
            }
        } {
            tui.draw(|frame| app.render(frame))?;
        }
        Ok(())
    }

    fn new(app_event_tx: AppEventSender, timing: Timing) -> Self {
        let flow = Flow::new();
        let screen = ScreenWidget::for_screen(flow.screen(), flow.context(), app_event_tx.clone());
        Self {
            app_event_tx,
            flow,
            screen,
            timing,
            op_epoch: 0,
            carousel_running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns `false` when the app should exit.
    fn handle_app_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Flow(flow_event) => {
                self.apply_flow_event(&flow_event);
            }
            AppEvent::StartMockOp(op) => {
                self.schedule_mock_op(op);
            }
            AppEvent::MockOpFinished { op, epoch } => {
                if epoch == self.op_epoch {
                    self.screen.on_mock_op_finished(&op);
                } else {
                    tracing::debug!("dropping stale {op:?} result from epoch {epoch}");
                }
            }
            AppEvent::StartCarouselAnimation => {
                if self
                    .carousel_running
                    .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
                    .is_ok()
                {
                    let tx = self.app_event_tx.clone();
                    let running = self.carousel_running.clone();
                    let interval = self.timing.carousel_interval;
                    thread::spawn(move || {
                        while running.load(Ordering::Relaxed) {
                            thread::sleep(interval);
                            tx.send(AppEvent::CarouselTick);
                        }
                    });
                }
            }
            AppEvent::StopCarouselAnimation => {
                self.carousel_running.store(false, Ordering::Release);
            }
            AppEvent::CarouselTick => {
                self.screen.on_carousel_tick();
            }
            AppEvent::ExitRequest => {
                return false;
            }
        }
        true
    }

    /// Returns `false` when the app should exit.
    fn handle_terminal_event(&mut self, event: &Event) -> bool {
        if let Event::Key(key_event) = event
            && matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat)
        {
            if key_event.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
            {
                return false;
            }
            self.screen.handle_key_event(*key_event);
        }
        true
    }

    fn apply_flow_event(&mut self, event: &FlowEvent) {
        let was_dashboard = self.flow.screen() == Screen::Dashboard;
        if !self.flow.apply(event) {
            return;
        }
        self.op_epoch += 1;
        self.screen = ScreenWidget::for_screen(
            self.flow.screen(),
            self.flow.context(),
            self.app_event_tx.clone(),
        );
        tracing::info!("screen changed to {}", self.flow.screen());

        let is_dashboard = self.flow.screen() == Screen::Dashboard;
        if is_dashboard && !was_dashboard && self.timing.carousel_autoplay {
            self.app_event_tx.send(AppEvent::StartCarouselAnimation);
        } else if was_dashboard && !is_dashboard {
            self.app_event_tx.send(AppEvent::StopCarouselAnimation);
        }
    }

    fn schedule_mock_op(&self, op: MockOp) {
        let delay = match op {
            MockOp::VerifyOtp { .. } | MockOp::ResetPassword => self.timing.mock_delay,
            MockOp::AdvanceWizard | MockOp::PublishChallenge => STEP_DELAY,
        };
        let epoch = self.op_epoch;
        let tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send(AppEvent::MockOpFinished { op, epoch });
        });
    }

    fn render(&self, frame: &mut Frame) {
        use ratatui::widgets::WidgetRef;
        self.screen.render_ref(frame.area(), frame.buffer_mut());
    }
}
