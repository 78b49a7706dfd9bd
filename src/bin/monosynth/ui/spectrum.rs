//! Spectrum analyzer widget
//!
//! Hann-windowed FFT of the latest output, read at log-spaced frequencies
//! and drawn on a log-frequency axis so each octave gets the same width.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::{f32::consts::TAU, sync::Arc};

/// Points along the frequency axis.
const SPECTRUM_POINTS: usize = 64;
const MIN_FREQ: f32 = 20.0;
const FLOOR_DB: f64 = -100.0;
/// How far a peak may fall per frame, in dB.
const FALL_DB_PER_FRAME: f64 = 3.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// FFT bin read for each display point
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 Hz, dB) per display point
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `fft_len` is the number of samples analyzed per update.
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft_len = fft_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (TAU * i as f32 / (fft_len - 1) as f32).cos()))
            .collect();

        let max_freq = (sample_rate / 2.0).min(20_000.0).max(MIN_FREQ * 2.0);
        let last_bin = fft_len / 2 - 1;
        let (bin_indices, spectrum): (Vec<usize>, Vec<(f64, f64)>) = (0..SPECTRUM_POINTS)
            .map(|i| {
                let t = i as f32 / (SPECTRUM_POINTS - 1) as f32;
                let freq = MIN_FREQ * (max_freq / MIN_FREQ).powf(t);
                let bin = ((freq * fft_len as f32 / sample_rate).round() as usize).min(last_bin);
                (bin, ((freq as f64).log10(), FLOOR_DB))
            })
            .unzip();

        Self {
            window,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            spectrum,
        }
    }

    pub fn fft_len(&self) -> usize {
        self.window.len()
    }

    /// Analyze the most recent `fft_len()` samples of `samples`.
    ///
    /// Rising levels show at once; falling ones decay a few dB per frame.
    pub fn update(&mut self, samples: &[f32]) {
        let Some(recent) = samples.len().checked_sub(self.fft_len()).map(|start| &samples[start..]) else {
            return;
        };

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(recent).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        // normalize so a full-scale sine reads near 0 dB
        let scale = 2.0 / self.fft_len() as f32;
        for (point, &index) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let magnitude = (self.scratch[index].norm() * scale).max(1e-6);
            let db = (20.0 * (magnitude as f64).log10()).max(FLOOR_DB);
            point.1 = db.max(point.1 - FALL_DB_PER_FRAME);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let (min_x, max_x) = match (spectrum.first(), spectrum.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => (1.0, 4.0),
    };

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_x, max_x])
                .labels(vec![Span::raw("20"), Span::raw("1k"), Span::raw("20k")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec![Span::raw("-100"), Span::raw("-50"), Span::raw("0")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
