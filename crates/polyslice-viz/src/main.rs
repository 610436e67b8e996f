use clap::Parser;
use macroquad::prelude::*;
use polyslice::TrackerConfig;
use polyslice_viz::{BACKGROUND, Game, to_point};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Slice a random polygon by dragging the mouse through it.
#[derive(Parser, Debug, Clone)]
#[clap(name = "polyslice", version)]
struct Args {
    /// Seed for polygon generation; random when omitted
    #[clap(long)]
    seed: Option<u64>,

    /// Add a polyline vertex every N mouse samples while cutting
    #[clap(long, default_value_t = 2)]
    spawn_interval: u32,

    /// Minimum vertex spacing as a fraction of the polygon's size
    #[clap(long, default_value_t = 0.01)]
    min_spacing_ratio: f32,
}

const GRID_SPACING: f32 = 40.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "Polyslice".to_owned(),
        window_width: 1024,
        window_height: 768,
        high_dpi: true,
        ..Default::default()
    }
}

fn draw_grid() {
    let color = Color::new(1.0, 1.0, 1.0, 0.04);
    let mut x = 0.0;
    while x < screen_width() {
        draw_line(x, 0.0, x, screen_height(), 1.0, color);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < screen_height() {
        draw_line(0.0, y, screen_width(), y, 1.0, color);
        y += GRID_SPACING;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = TrackerConfig::default()
        .with_spawn_interval(args.spawn_interval)
        .with_min_spacing_ratio(args.min_spacing_ratio);

    let mut game = match Game::new(args.seed, config, screen_width(), screen_height()) {
        Ok(game) => game,
        Err(err) => {
            error!(%err, "could not generate a polygon");
            return;
        }
    };
    info!(
        sides = game.tracker().boundary().len(),
        seed = ?args.seed,
        "drag through the shape to slice it, R for a new one"
    );

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::R) {
            if let Err(err) = game.regenerate(screen_width(), screen_height()) {
                error!(%err, "could not generate a polygon");
            }
        }

        let (mx, my) = mouse_position();
        let mouse = to_point(vec2(mx, my));
        game.frame(mouse);

        clear_background(BACKGROUND);
        draw_grid();
        game.draw();
        draw_circle(mouse.x, mouse.y, 6.0, RED);

        draw_text(
            &format!("Cuts: {}", game.cuts()),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!("FPS: {} | R: new shape | Esc: quit", get_fps()),
            10.0,
            45.0,
            18.0,
            GRAY,
        );

        next_frame().await
    }
}
