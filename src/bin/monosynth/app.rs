//! Audio device setup and the glue between the audio and UI threads

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use rtrb::RingBuffer;

use monosynth::{synth::MonoSynth, MAX_BLOCK_SIZE};

use crate::ui::{state::VoiceStatus, UiApp};

/// Control messages in flight from UI to audio.
const CONTROL_QUEUE_SIZE: usize = 256;
/// Output samples in flight from audio to the scope.
const SCOPE_QUEUE_SIZE: usize = 16_384;
const STATUS_QUEUE_SIZE: usize = 64;

pub fn run() -> EyreResult<()> {
    // Set up audio
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    if channels == 0 {
        return Err(eyre!("output device reports no channels"));
    }
    log::info!(
        "output device {:?}: {} Hz, {} channels",
        device.name().unwrap_or_default(),
        sample_rate,
        channels
    );

    let (mut synth, controller) = MonoSynth::with_queue(sample_rate, CONTROL_QUEUE_SIZE);
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);
    let (mut status_tx, status_rx) = RingBuffer::<VoiceStatus>::new(STATUS_QUEUE_SIZE);

    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames];
                    synth.render_block(block);

                    // Copy to output (mono to all channels)
                    let out = &mut data[frames_written * channels..(frames_written + frames) * channels];
                    for (frame, &s) in out.chunks_exact_mut(channels).zip(block.iter()) {
                        frame.fill(s);
                    }

                    // The scope drops samples rather than ever blocking audio
                    for &s in block.iter() {
                        if scope_tx.push(s).is_err() {
                            break;
                        }
                    }

                    frames_written += frames;
                }

                let _ = status_tx.push(VoiceStatus::of(synth.voice()));
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;

    let mut terminal = ratatui::init();

    // Real key-up events when the terminal can report them
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    if release_events {
        execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    log::info!("key release events: {release_events}");

    let result = UiApp::new(controller, scope_rx, status_rx, sample_rate, release_events)
        .run(&mut terminal);

    if release_events {
        let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
    }
    ratatui::restore();

    drop(stream);
    log::info!("monosynth stopped");
    result
}
