use nbezier_viz::draw::svg::SvgCanvas;
use nbezier_viz::draw::DrawCommand;
use nbezier_viz::{Options, Point2D, Visualizer};
use std::error::Error;
use std::path::Path;
use std::time::Duration;

/// Frame time the step replay is simulated with
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load_from_file(Path::new(&path)),
        None => Options::default(),
    };
    let mut visualizer = Visualizer::new(options)?;
    for (x, y) in [(50.0, 0.0), (200.0, 33.0), (0.0, 66.0), (50.0, 100.0)] {
        visualizer.add_point(Point2D::new(x, y));
    }

    let mut svg = SvgCanvas::new((-10.0, -10.0, 220.0, 120.0));
    svg.line_width = 0.5;
    svg.point_radius = 1.5;

    // Replay the steps off screen and keep only what settled
    visualizer.show_steps()?;
    let mut frames: Vec<DrawCommand> = Vec::new();
    while visualizer.is_animating() {
        visualizer.tick(FRAME, &mut frames);
        frames.clear();
    }
    visualizer.tick(Duration::ZERO, &mut svg);

    visualizer.visualize_curve()?;
    visualizer.tick(Duration::ZERO, &mut svg);
    for (name, point) in visualizer.result_coordinates() {
        log::info!("{} = ({:.2}, {:.2})", name, point.x, point.y);
    }

    println!("{}", svg);
    Ok(())
}
