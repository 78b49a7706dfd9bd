//! TUI module for monosynth
//!
//! Owns the control side of the synth: keys become note messages, the panel
//! edits the parameter snapshot, and the audio thread's output and status
//! come back through ring buffers for display.

mod panel;
mod spectrum;
pub mod state;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::{Duration, Instant};

use monosynth::{
    dsp::note_to_freq,
    patch::Preset,
    synth::{ControlError, SynthController, VoiceParams},
};

use crate::keyboard::{Keyboard, NoteAction};
use panel::{render_panel, Slot};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use state::VoiceStatus;
use waveform::render_waveform;

/// Output samples kept for display
const VIS_BUFFER_SIZE: usize = 2048;

pub struct UiApp {
    controller: SynthController,
    scope_rx: Consumer<f32>,
    status_rx: Consumer<VoiceStatus>,
    status: VoiceStatus,
    scope: Vec<f32>,
    spectrum: SpectrumAnalyzer,

    keyboard: Keyboard,
    params: VoiceParams,
    preset: Option<Preset>,
    selected: usize,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        controller: SynthController,
        scope_rx: Consumer<f32>,
        status_rx: Consumer<VoiceStatus>,
        sample_rate: f32,
        release_events: bool,
    ) -> Self {
        Self {
            controller,
            scope_rx,
            status_rx,
            status: VoiceStatus::default(),
            scope: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),

            keyboard: Keyboard::new(release_events),
            params: VoiceParams::default(),
            preset: None,
            selected: 0,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let params = self.params;
        self.control(|c| c.set_parameters(&params));

        while !self.should_quit {
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if let Some(action) = self.keyboard.expire(Instant::now()) {
                self.play(action);
            }
        }

        Ok(())
    }

    fn poll_audio(&mut self) {
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
        }
        if self.scope.len() > VIS_BUFFER_SIZE {
            let excess = self.scope.len() - VIS_BUFFER_SIZE;
            self.scope.drain(0..excess);
        }
        self.spectrum.update(&self.scope);

        // keep only the latest status
        while let Ok(status) = self.status_rx.pop() {
            self.status = status;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match (key.kind, key.code) {
            (KeyEventKind::Release, KeyCode::Char(c)) => {
                if let Some(action) = self.keyboard.release(c) {
                    self.play(action);
                }
            }
            (KeyEventKind::Release, _) => {}

            (_, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')) => {
                self.should_quit = true;
            }
            (_, KeyCode::Char('z') | KeyCode::Char('Z')) => self.keyboard.octave_down(),
            (_, KeyCode::Char('x') | KeyCode::Char('X')) => self.keyboard.octave_up(),
            (_, KeyCode::Char(c @ '1'..='5')) => {
                let preset = Preset::ALL[c as usize - '1' as usize];
                preset.apply_to(&mut self.params);
                self.preset = Some(preset);
                self.send_params();
            }
            (_, KeyCode::Char(' ')) => {
                self.keyboard.clear();
                self.control(SynthController::reset);
            }
            (_, KeyCode::Up) => {
                self.selected = (self.selected + Slot::ALL.len() - 1) % Slot::ALL.len();
            }
            (_, KeyCode::Down) => self.selected = (self.selected + 1) % Slot::ALL.len(),
            (_, KeyCode::Left | KeyCode::Right) => {
                Slot::ALL[self.selected].adjust(&mut self.params, key.code == KeyCode::Right);
                self.preset = None;
                self.send_params();
            }
            (_, KeyCode::Char(c)) => {
                if let Some(action) = self.keyboard.press(c, now) {
                    self.play(action);
                }
            }
            _ => {}
        }
    }

    fn play(&mut self, action: NoteAction) {
        match action {
            NoteAction::Trigger(note) => self.control(|c| c.note_on(note_to_freq(note))),
            NoteAction::Retune(note) => self.control(|c| c.set_frequency(note_to_freq(note))),
            NoteAction::Release => self.control(SynthController::note_off),
        }
    }

    fn send_params(&mut self) {
        let params = self.params;
        self.control(|c| c.set_parameters(&params));
    }

    /// Send a control message. A full queue drops it; a dead audio side
    /// ends the session.
    fn control(&mut self, send: impl FnOnce(&mut SynthController) -> Result<(), ControlError>) {
        if let Err(err) = send(&mut self.controller) {
            if matches!(err, ControlError::Disconnected) {
                log::error!("{err}");
                self.should_quit = true;
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: status, body, help
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(10),   // Panel + displays
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        self.render_status(frame, rows[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(20)])
            .split(rows[1]);

        render_panel(frame, body[0], &self.params, self.selected);

        let displays = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body[1]);

        render_waveform(frame, displays[0], &self.scope, self.params.volume);
        render_spectrum(frame, displays[1], self.spectrum.data());

        let help = Paragraph::new(
            " [AWSEDFTGYHUJK] Play  [Z/X] Octave  [1-5] Preset  [↑↓←→] Edit  [Space] Reset  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(32)])
            .split(area);

        let preset = self.preset.map_or("Custom", Preset::name);
        let note = match self.keyboard.sounding() {
            Some(_) if self.status.gate => format!("{:.1} Hz", self.status.frequency),
            _ => "-".to_string(),
        };
        let info = Paragraph::new(Line::from(vec![
            Span::styled(" Preset ", Style::default().fg(Color::DarkGray)),
            Span::raw(preset),
            Span::styled("  Octave ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.keyboard.octave().to_string()),
            Span::styled("  Note ", Style::default().fg(Color::DarkGray)),
            Span::raw(note),
        ]))
        .block(Block::default().title(" monosynth ").borders(Borders::ALL));
        frame.render_widget(info, cols[0]);

        let level = self.status.envelope_level.clamp(0.0, 1.0);
        let envelope = Gauge::default()
            .block(Block::default().title(" Envelope ").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(level as f64)
            .label(format!("{} {:.2}", self.status.stage.name(), level));
        frame.render_widget(envelope, cols[1]);
    }
}
