//! Oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Index of the first rising zero crossing in the first half of the
/// buffer, so a steady tone stands still on screen.
fn trigger_point(samples: &[f32]) -> usize {
    let search = samples.len() / 2;
    samples
        .windows(2)
        .take(search)
        .position(|w| w[0] <= 0.0 && w[1] > 0.0)
        .unwrap_or(0)
}

/// Render the scope over the last output samples.
///
/// `volume` scales the y-axis so quiet patches still fill the view.
pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32], volume: f32) {
    let block = Block::default().title(" Scope ").borders(Borders::ALL);

    let start = trigger_point(samples);
    let window = &samples[start..(start + samples.len() / 2).min(samples.len())];
    let data: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64, sample as f64))
        .collect();

    let y_max = (volume as f64).clamp(0.05, 1.0);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, window.len().max(1) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-y_max, y_max])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
