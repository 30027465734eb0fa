use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use engine::input::{Action, InputManager};
use game::{hud, GameConfig, Session};

/// Drop fruit, merge matching pairs, keep the pile below the line
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file overriding the default play field, physics and tiers
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the next-fruit draw
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    info!("Starting Fruit Merge...");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Fruit Merge")
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_resizable(true)
        .build(&event_loop)?;

    let mut session = Session::new(config, window.inner_size().width as f32)?;
    let mut game_loop = GameLoop::new();
    let mut input = InputManager::new();
    let mut title = String::new();
    let mut best = hud::BestTier::default();

    info!("Merge order: {}", hud::evolution(session.tiers()));

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(size) => {
                    session.set_view_width(size.width as f32);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.process_cursor_moved(position.x);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::RedrawRequested => {
                    if input.just_pressed(Action::Pause) {
                        game_loop.toggle_pause();
                    }

                    if !game_loop.is_paused() {
                        if let Some(x) = input.pointer_x() {
                            session.pointer_moved(x);
                        }
                        if input.just_pressed(Action::Restart) && session.state().is_over() {
                            session.restart();
                            best.clear();
                        }
                        if input.just_pressed(Action::Drop) {
                            session.activate();
                        }
                    }

                    for _ in 0..game_loop.begin_frame() {
                        for merge in session.fixed_update(FIXED_TIMESTEP) {
                            if let Some(tier) = best.record(&merge) {
                                if let Some(tier) = session.tiers().get(tier) {
                                    info!("First {} of the round (+{})", tier.name, merge.awarded);
                                }
                            }
                        }
                    }
                    input.update();

                    let next_title =
                        hud::title(session.state(), session.tiers(), best, game_loop.is_paused());
                    if next_title != title {
                        window.set_title(&next_title);
                        title = next_title;
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
