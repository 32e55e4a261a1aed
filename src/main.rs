use anyhow::Context;
use conv_bench::image_filter::{BenchmarkConfig, FilterBenchmark};
use conv_bench::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting conv_bench...");

    let config = BenchmarkConfig::default();
    info!("Input: {}", config.input_path.display());
    info!("Kernel source: {}", config.device_config.kernel_source_path.display());
    info!("Results: {}", config.result_dir.display());

    let benchmark = FilterBenchmark::new(config);

    match benchmark.run() {
        Ok(report) => {
            report.timings.print_summary();
            for output in &report.outputs {
                info!("{} output written to {}", output.phase, output.path.display());
            }
            Ok(())
        }
        Err(e) => {
            error!("Benchmark failed: {}", e);
            Err(e).context("filter benchmark aborted")
        }
    }
}
