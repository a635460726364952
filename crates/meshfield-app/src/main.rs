use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use winit::dpi::LogicalSize;

use meshfield_engine::device::GpuInit;
use meshfield_engine::logging::{LoggingConfig, init_logging};
use meshfield_engine::window::{Runtime, RuntimeConfig};
use meshfield_gradient::{FieldConfig, GradientField};

mod viewer;

use viewer::Viewer;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = FieldConfig::default();
    let canvas = config.canvas;

    let mut rng = StdRng::from_entropy();
    let field = GradientField::new(config, &mut rng);

    let runtime = RuntimeConfig {
        title: "Mesh Gradient".to_string(),
        initial_size: LogicalSize::new(canvas.x as f64, canvas.y as f64),
        resizable: false,
    };

    log::info!("starting mesh gradient ({}x{})", canvas.x, canvas.y);
    Runtime::run(runtime, GpuInit::default(), Viewer::new(field))
}
