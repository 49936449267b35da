mod config;
mod graphics;
mod input;
mod math;
mod scene;
mod shadow;
mod state;
mod terminal;
mod viewport;
mod widget;

use anyhow::Context;
use clap::Parser;
use config::Args;
use crossterm::event::Event;
use input::{handle_event, Control};
use log::{debug, info, trace};
use scene::Scene;
use shadow::cast_shadows;
use state::AppState;
use std::fs::File;
use std::io;
use terminal::{TerminalEvent, TerminalSession};
use widget::{status_text, ShadowWidget};

/// Sets up `env_logger`, optionally sending records to a file
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Applies one terminal event, mapping mouse positions through the current viewport
fn dispatch(data: &mut AppState, widget: &mut ShadowWidget, event: &Event) -> Control {
    match terminal::translate_event(event, widget.viewport()) {
        Some(TerminalEvent::Resize { cols, rows }) => {
            let (width, height) = terminal::pixel_size(cols, rows);
            widget.resize(width, height);
            debug!(
                "resized to {width}x{height} pixels, {:.3} pixels per unit",
                widget.viewport().zoom()
            );
            Control::Continue
        }
        Some(TerminalEvent::Input(input)) => handle_event(data, input),
        None => Control::Continue,
    }
}

/// Frame loop: input, shadow casting, painting, presenting
fn run(args: &Args) -> anyhow::Result<()> {
    let mut data = AppState::new(Scene::default(), args.render_config());
    let frame_delay = args.frame_delay();

    let (cols, rows) = terminal::terminal_size().context("failed to query terminal size")?;
    let (width, height) = terminal::pixel_size(cols, rows);
    let mut widget = ShadowWidget::new(width, height);

    let _session = TerminalSession::start().context("failed to set up terminal")?;
    let mut stdout = io::stdout().lock();
    info!("started with {} samples on a {cols}x{rows} terminal", data.config.samples());

    'frames: loop {
        for event in terminal::poll_events().context("failed to read input")? {
            if dispatch(&mut data, &mut widget, &event) == Control::Quit {
                break 'frames;
            }
        }

        let segments = cast_shadows(&data.scene, &data.config);
        trace!("{} segments for {} occluders", segments.len(), data.scene.occluder_count());

        widget.paint(&data, &segments);
        terminal::present(&mut stdout, widget.canvas(), &status_text(&data))
            .context("failed to draw frame")?;

        std::thread::sleep(frame_delay);
    }

    info!("shutting down");
    Ok(())
}

/// Main function
pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    run(&args)
}
