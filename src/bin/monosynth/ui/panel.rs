//! Parameter panel: every voice parameter as one selectable row

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use monosynth::{
    dsp::{FilterType, LfoWaveform, OscillatorWaveform},
    synth::{params::*, VoiceParams},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Waveform,
    PulseWidth,
    Detune,
    SubLevel,
    NoiseLevel,
    Cutoff,
    Resonance,
    FilterType,
    EnvAmount,
    Attack,
    Decay,
    Sustain,
    Release,
    LfoRate,
    LfoDepth,
    LfoWaveform,
    Volume,
}

impl Slot {
    pub const ALL: [Slot; 17] = [
        Slot::Waveform,
        Slot::PulseWidth,
        Slot::Detune,
        Slot::SubLevel,
        Slot::NoiseLevel,
        Slot::Cutoff,
        Slot::Resonance,
        Slot::FilterType,
        Slot::EnvAmount,
        Slot::Attack,
        Slot::Decay,
        Slot::Sustain,
        Slot::Release,
        Slot::LfoRate,
        Slot::LfoDepth,
        Slot::LfoWaveform,
        Slot::Volume,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Slot::Waveform => "Waveform",
            Slot::PulseWidth => "Pulse Width",
            Slot::Detune => "Detune",
            Slot::SubLevel => "Sub Osc",
            Slot::NoiseLevel => "Noise",
            Slot::Cutoff => "Cutoff",
            Slot::Resonance => "Resonance",
            Slot::FilterType => "Filter",
            Slot::EnvAmount => "Env Mod",
            Slot::Attack => "Attack",
            Slot::Decay => "Decay",
            Slot::Sustain => "Sustain",
            Slot::Release => "Release",
            Slot::LfoRate => "LFO Rate",
            Slot::LfoDepth => "LFO Depth",
            Slot::LfoWaveform => "LFO Wave",
            Slot::Volume => "Volume",
        }
    }

    /// Section heading shown above the first row of each group.
    fn section(self) -> Option<&'static str> {
        match self {
            Slot::Waveform => Some("VCO"),
            Slot::Cutoff => Some("VCF"),
            Slot::Attack => Some("ENV"),
            Slot::LfoRate => Some("LFO"),
            Slot::Volume => Some("OUT"),
            _ => None,
        }
    }

    pub fn value_text(self, p: &VoiceParams) -> String {
        match self {
            Slot::Waveform => p.waveform.name().to_string(),
            Slot::PulseWidth => format!("{:.0}%", p.pulse_width * 100.0),
            Slot::Detune => format!("{:+.0}", p.detune_cents),
            Slot::SubLevel => format!("{:.2}", p.sub_level),
            Slot::NoiseLevel => format!("{:.2}", p.noise_level),
            Slot::Cutoff => format!("{:.0} Hz", p.cutoff_hz),
            Slot::Resonance => format!("{:.1}", p.resonance),
            Slot::FilterType => p.filter_type.name().to_string(),
            Slot::EnvAmount => format!("{:.1}", p.filter_env_amount),
            Slot::Attack => format!("{:.3} s", p.attack),
            Slot::Decay => format!("{:.3} s", p.decay),
            Slot::Sustain => format!("{:.2}", p.sustain),
            Slot::Release => format!("{:.3} s", p.release),
            Slot::LfoRate => format!("{:.1} Hz", p.lfo_rate),
            Slot::LfoDepth => format!("{:.2}", p.lfo_depth),
            Slot::LfoWaveform => p.lfo_waveform.name().to_string(),
            Slot::Volume => format!("{:.2}", p.volume),
        }
    }

    /// Nudge the parameter one step up (`up`) or down, staying in range.
    pub fn adjust(self, p: &mut VoiceParams, up: bool) {
        let dir = if up { 1.0 } else { -1.0 };
        let step = |value: &mut f32, step: f32, range: &std::ops::RangeInclusive<f32>| {
            *value = (*value + dir * step).clamp(*range.start(), *range.end());
        };

        match self {
            Slot::Waveform => p.waveform = cycle(&OscillatorWaveform::ALL, p.waveform, up),
            Slot::PulseWidth => step(&mut p.pulse_width, 0.05, &PULSE_WIDTH_RANGE),
            Slot::Detune => step(&mut p.detune_cents, 1.0, &DETUNE_RANGE),
            Slot::SubLevel => step(&mut p.sub_level, 0.05, &LEVEL_RANGE),
            Slot::NoiseLevel => step(&mut p.noise_level, 0.01, &LEVEL_RANGE),
            // cutoff moves in semitone-sized ratios
            Slot::Cutoff => {
                let ratio = if up { 1.059_463 } else { 1.0 / 1.059_463 };
                p.cutoff_hz = (p.cutoff_hz * ratio).clamp(*CUTOFF_RANGE.start(), *CUTOFF_RANGE.end());
            }
            Slot::Resonance => step(&mut p.resonance, 0.1, &RESONANCE_RANGE),
            Slot::FilterType => p.filter_type = cycle(&FilterType::ALL, p.filter_type, up),
            Slot::EnvAmount => step(&mut p.filter_env_amount, 0.1, &ENV_AMOUNT_RANGE),
            Slot::Attack => step(&mut p.attack, 0.01, &ATTACK_RANGE),
            Slot::Decay => step(&mut p.decay, 0.01, &DECAY_RANGE),
            Slot::Sustain => step(&mut p.sustain, 0.05, &LEVEL_RANGE),
            Slot::Release => step(&mut p.release, 0.01, &RELEASE_RANGE),
            Slot::LfoRate => step(&mut p.lfo_rate, 0.1, &LFO_RATE_RANGE),
            Slot::LfoDepth => step(&mut p.lfo_depth, 0.05, &LEVEL_RANGE),
            Slot::LfoWaveform => p.lfo_waveform = cycle(&LfoWaveform::ALL, p.lfo_waveform, up),
            Slot::Volume => step(&mut p.volume, 0.01, &LEVEL_RANGE),
        }
    }
}

/// Next or previous entry of `all`, wrapping around.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let index = all.iter().position(|&v| v == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % all.len()
    } else {
        (index + all.len() - 1) % all.len()
    };
    all[next]
}

pub fn render_panel(frame: &mut Frame, area: Rect, params: &VoiceParams, selected: usize) {
    let block = Block::default().title(" Parameters ").borders(Borders::ALL);

    let mut lines = Vec::with_capacity(Slot::ALL.len() * 2);
    for (i, slot) in Slot::ALL.iter().enumerate() {
        if let Some(section) = slot.section() {
            lines.push(Line::from(Span::styled(
                section,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
        }

        let style = if i == selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<12}", slot.label()), style),
            Span::styled(format!("{:>10} ", slot.value_text(params)), style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_stays_in_range() {
        let mut p = VoiceParams::default();
        for _ in 0..200 {
            Slot::Resonance.adjust(&mut p, true);
            Slot::Cutoff.adjust(&mut p, true);
            Slot::Volume.adjust(&mut p, false);
        }
        assert_eq!(p.resonance, 4.0);
        assert_eq!(p.cutoff_hz, 20_000.0);
        assert_eq!(p.volume, 0.0);
        assert_eq!(p.sanitized(), p);
    }

    #[test]
    fn enums_cycle_both_ways() {
        let mut p = VoiceParams::default();
        Slot::FilterType.adjust(&mut p, false);
        assert_eq!(p.filter_type, FilterType::HighPass);
        Slot::FilterType.adjust(&mut p, true);
        assert_eq!(p.filter_type, FilterType::LowPass);

        for _ in 0..OscillatorWaveform::ALL.len() {
            Slot::Waveform.adjust(&mut p, true);
        }
        assert_eq!(p.waveform, OscillatorWaveform::Sawtooth);
    }
}
