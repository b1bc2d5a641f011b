use frustum_engine::config::PipelineConfig;
use frustum_engine::device::GpuInit;
use frustum_engine::logging::{init_logging, LoggingConfig};
use frustum_engine::window::Runtime;

fn main() {
    init_logging(LoggingConfig::default());

    let config = PipelineConfig::default();
    log::info!(
        "starting `{}` ({}x{})",
        config.window.title,
        config.window.size.width,
        config.window.size.height
    );

    let status = Runtime::run(config, GpuInit::default());
    std::process::exit(status.code());
}
