use super::render::{self, Areas};
use super::terminal::TerminalSession;
use crate::kernel::services::adapters::highlight::{builtin_theme, Palette};
use crate::kernel::services::adapters::Backend;
use crate::kernel::services::ports::Settings;
use crate::kernel::{Intent, Request, RequestScheduler, Response, SearchController};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

const TICK: Duration = Duration::from_millis(33);

pub struct App {
    backend: Arc<Backend>,
    controller: SearchController,
    scheduler: RequestScheduler,
    requests: UnboundedSender<Request>,
    responses: UnboundedReceiver<Response>,
    palette: Option<Palette>,
    areas: Areas,
    should_quit: bool,
}

impl App {
    pub fn new(
        backend: Arc<Backend>,
        scheduler: RequestScheduler,
        requests: UnboundedSender<Request>,
        responses: UnboundedReceiver<Response>,
    ) -> Self {
        let palette = builtin_theme(&backend.theme());
        Self {
            backend,
            controller: SearchController::new(),
            scheduler,
            requests,
            responses,
            palette,
            areas: Areas::default(),
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// How long the event loop may block before the next debounce deadline.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .map_or(TICK, |until| until.min(TICK))
    }

    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        self.areas = render::layout(frame.area());
        let list = render::inner(self.areas.list);
        let preview = render::inner(self.areas.preview);
        self.controller
            .set_viewport(list.height as usize, preview.height as usize);
        render::draw(frame, &self.areas, &self.controller, self.palette.as_ref());
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let page = render::inner(self.areas.list).height.max(1) as isize;
        let intent = match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('t') if ctrl => Some(self.controller.toggle_theme()),
            KeyCode::Char('p') if ctrl => self.controller.move_selection(-1),
            KeyCode::Char('n') if ctrl => self.controller.move_selection(1),
            KeyCode::Up => self.controller.move_selection(-1),
            KeyCode::Down => self.controller.move_selection(1),
            KeyCode::PageUp => self.controller.move_selection(-page),
            KeyCode::PageDown => self.controller.move_selection(page),
            KeyCode::Enter => self.controller.activate(),
            KeyCode::Backspace => self.controller.backspace(),
            KeyCode::Char(ch) if !ctrl => Some(self.controller.append_char(ch)),
            _ => None,
        };
        if let Some(intent) = intent {
            self.dispatch(intent, now);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let intent = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => render::list_index_at(
                &self.areas,
                self.controller.list_scroll(),
                mouse.column,
                mouse.row,
            )
            .and_then(|idx| self.controller.click(idx)),
            MouseEventKind::ScrollUp => self.controller.move_selection(-1),
            MouseEventKind::ScrollDown => self.controller.move_selection(1),
            _ => None,
        };
        if let Some(intent) = intent {
            self.dispatch(intent, now);
        }
    }

    fn dispatch(&mut self, intent: Intent, now: Instant) {
        match intent {
            Intent::Search(term) => {
                if let Some(local) = self.scheduler.schedule_search(term, now) {
                    self.apply(local, now);
                }
            }
            Intent::Preview(request) => self.scheduler.schedule_preview(request, now),
            other => {
                if let Some(request) = other.into_immediate_request() {
                    self.send(request);
                }
            }
        }
    }

    /// Fire due requests and fold in whatever the backend has answered.
    pub fn tick(&mut self, now: Instant) {
        for request in self.scheduler.poll(now) {
            self.send(request);
        }
        while let Ok(response) = self.responses.try_recv() {
            self.apply(response, now);
        }
    }

    fn apply(&mut self, response: Response, now: Instant) {
        if matches!(response, Response::ThemeChanged) {
            self.palette = builtin_theme(&self.backend.theme());
        }
        let intent = self.controller.apply_response(response);
        if self.controller.selected().is_none() {
            self.scheduler.cancel_preview();
        }
        if let Some(intent) = intent {
            self.dispatch(intent, now);
        }
    }

    fn send(&self, request: Request) {
        tracing::debug!(kind = request.kind(), "sending request");
        if self.requests.send(request).is_err() {
            tracing::error!("backend channel closed");
        }
    }
}

/// Run the terminal UI until the user quits.
pub fn run(
    backend: Arc<Backend>,
    handle: &tokio::runtime::Handle,
    settings: &Settings,
) -> io::Result<()> {
    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let (resp_tx, resp_rx) = mpsc::unbounded_channel();
    let _server = backend.clone().spawn(handle, req_rx, resp_tx);

    let session = TerminalSession::start()?;
    session.restore_on_panic();

    let interrupted = Arc::new(AtomicBool::new(false));
    #[cfg(unix)]
    {
        let flag = interrupted.clone();
        super::terminal::watch_termination(session.restorer(), move || {
            flag.store(true, Ordering::SeqCst);
        })?;
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = App::new(
        backend,
        RequestScheduler::from_settings(settings),
        req_tx,
        resp_rx,
    );

    while !app.should_quit() && !interrupted.load(Ordering::SeqCst) {
        terminal.draw(|frame| app.draw(frame))?;
        if event::poll(app.poll_timeout(Instant::now()))? {
            app.handle_event(event::read()?, Instant::now());
        }
        app.tick(Instant::now());
    }

    drop(terminal);
    drop(session);
    tracing::info!("terminal ui closed");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/tui/app.rs"]
mod tests;
