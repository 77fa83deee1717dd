pub mod widgets;

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::{DefaultTerminal, Frame};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::error::SourceResult;
use crate::pipeline::request::Palette;
use crate::send::{Cue, SendForm, SendSequence, SENT_ACK};
use crate::session::Session;
use crate::sources::PaletteSource;

use widgets::{CardFront, CardRear, PaletteStrip};

const TICK: Duration = Duration::from_millis(50);

/// Which form input receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Sender,
    Recipient,
    Message,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Sender => Field::Recipient,
            Field::Recipient => Field::Message,
            Field::Message => Field::Sender,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::Sender => Field::Message,
            Field::Recipient => Field::Sender,
            Field::Message => Field::Recipient,
        }
    }
}

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reroll,
    Send,
}

struct Sending {
    sequence: SendSequence,
    started: Instant,
    reported: Option<Duration>,
}

type PaletteReply = (u64, SourceResult<Palette>);

/// State for the interactive postcard.
pub struct TuiApp {
    pub session: Session,
    pub form: SendForm,
    pub focus: Field,
    pub notice: Option<String>,
    sending: Option<Sending>,
    replies_tx: UnboundedSender<PaletteReply>,
    replies_rx: UnboundedReceiver<PaletteReply>,
}

impl TuiApp {
    pub fn new(session: Session) -> Self {
        let (replies_tx, replies_rx) = unbounded_channel();
        Self {
            session,
            form: SendForm::default(),
            focus: Field::Sender,
            notice: None,
            sending: None,
            replies_tx,
            replies_rx,
        }
    }

    /// Apply a key press to the form and report anything the loop must do.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Char('r') if ctrl => Action::Reroll,
            KeyCode::Enter => Action::Send,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.previous();
                Action::None
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
                Action::None
            }
            KeyCode::Char(c) if !ctrl => {
                self.notice = None;
                self.focused_mut().push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Sender => &mut self.form.sender,
            Field::Recipient => &mut self.form.recipient,
            Field::Message => &mut self.form.message,
        }
    }

    /// Fire off a palette request; the reply arrives through the channel.
    fn reroll<P>(&mut self, source: &P, runtime: &Handle)
    where
        P: PaletteSource + Clone + 'static,
    {
        let (generation, request) = self.session.begin_palette_request();
        let source = source.clone();
        let tx = self.replies_tx.clone();
        runtime.spawn(async move {
            let result = source.suggest(&request).await;
            // receiver gone means the app is shutting down
            let _ = tx.send((generation, result));
        });
    }

    /// Install any palettes that have arrived.
    fn drain_replies(&mut self) {
        while let Ok((generation, result)) = self.replies_rx.try_recv() {
            match result {
                Ok(palette) => {
                    self.session.install_palette(generation, palette);
                }
                Err(err) => warn!(generation, error = %err, "palette request failed"),
            }
        }
    }

    /// Start the stamp animation if the form is valid; otherwise do nothing.
    pub fn send(&mut self) {
        if self.sending.is_some() {
            return;
        }
        let today = chrono::Local::now().date_naive();
        match SendSequence::start(&self.form, today, &mut rand::rng()) {
            Ok(sequence) => {
                self.notice = None;
                self.sending = Some(Sending {
                    sequence,
                    started: Instant::now(),
                    reported: None,
                });
            }
            Err(err) => debug!(error = %err, "send ignored"),
        }
    }

    /// Run the cues that have come due since the last tick.
    pub fn advance(&mut self, now: Instant) {
        let Some(sending) = self.sending.as_mut() else {
            return;
        };
        let elapsed = now.saturating_duration_since(sending.started);
        let due = sending.sequence.cues_between(sending.reported, elapsed);
        sending.reported = Some(elapsed);

        let mut finished = false;
        for cue in due {
            match cue {
                Cue::Sent => {
                    self.notice = Some(SENT_ACK.to_string());
                    self.form.reset();
                    self.focus = Field::Sender;
                }
                Cue::PlaceholderRestored => finished = true,
                _ => {}
            }
        }
        if finished {
            self.sending = None;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let style = self.session.card_style();
        let [strip_area, card_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(2),
        ])
        .areas(frame.area());
        let [front_area, rear_area] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
                .areas(card_area);

        frame.render_widget(PaletteStrip::new(style.as_ref()), strip_area);

        let (title, image_url) = self
            .session
            .artwork()
            .map(|art| {
                (
                    art.summary.long_title.as_str(),
                    art.summary
                        .web_image
                        .as_ref()
                        .map_or("", |image| image.url.as_str()),
                )
            })
            .unwrap_or(("", ""));
        frame.render_widget(
            CardFront {
                style: style.as_ref(),
                title,
                image_url,
            },
            front_area,
        );

        let stamp = self.sending.as_ref().map(|sending| {
            sending
                .sequence
                .view_at(sending.started.elapsed())
        });
        frame.render_widget(
            CardRear {
                style: style.as_ref(),
                sender: &self.form.sender,
                recipient: &self.form.recipient,
                message: &self.form.message,
                focus: self.focus,
                caption: title,
                stamp,
            },
            rear_area,
        );

        let mut footer = vec![Line::styled(
            "tab: next field   enter: stamp & send   ctrl-r: new palette   esc: quit",
            Style::default().add_modifier(Modifier::DIM),
        )];
        if let Some(notice) = &self.notice {
            footer.push(Line::styled(
                notice.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        frame.render_widget(ratatui::widgets::Paragraph::new(footer), footer_area);
    }
}

/// Launch the interactive postcard and block until the user quits.
pub fn run<P>(app: TuiApp, source: P, runtime: Handle) -> Result<()>
where
    P: PaletteSource + Clone + 'static,
{
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, app, &source, &runtime);
    ratatui::restore();
    result
}

fn event_loop<P>(
    terminal: &mut DefaultTerminal,
    mut app: TuiApp,
    source: &P,
    runtime: &Handle,
) -> Result<()>
where
    P: PaletteSource + Clone + 'static,
{
    loop {
        app.drain_replies();
        app.advance(Instant::now());
        terminal.draw(|frame| app.render(frame))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match app.handle_key(key) {
                Action::Quit => return Ok(()),
                Action::Reroll => app.reroll(source, runtime),
                Action::Send => app.send(),
                Action::None => {}
            }
        }
    }
}
