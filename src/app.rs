//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or generates measurement data
//! - runs the fit engine
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, SampleArgs};
use crate::domain::{FitConfig, FixedVariable, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `linefit` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(
            &run.ingest,
            &run.spec,
            run.strategy,
            run.result.as_ref(),
            run.points.len(),
        )
    );

    if let Some(result) = &run.result {
        println!("{}", crate::report::format_residual_table(&run.points, result));

        if config.plot {
            println!(
                "{}",
                crate::plot::render_ascii_plot(
                    &run.points,
                    result,
                    config.plot_width,
                    config.plot_height,
                )
            );
        }

        if let Some(path) = &config.export_results {
            crate::io::write_results_csv(path, &run.points, result)?;
        }
        if let Some(path) = &config.export_line {
            crate::io::write_line_json(
                path,
                result,
                &run.spec,
                run.strategy,
                run.points.len(),
                run.ingest.stats.x_min,
                run.ingest.stats.x_max,
            )?;
        }
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        out_path: args.out.clone(),
        count: args.count,
        slope: args.slope,
        intercept: args.intercept,
        x_min: args.x_min,
        x_max: args.x_max,
        err_x: args.err_x,
        err_y: args.err_y,
        seed: args.seed,
    };

    let rows = crate::data::generate_sample(&config)?;
    crate::io::write_sample_csv(&config.out_path, &rows)?;
    println!("Wrote {} points to {}", rows.len(), config.out_path.display());
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let line = crate::io::read_line_json(&args.line)?;
    println!(
        "{}",
        crate::plot::render_ascii_plot_from_line_file(&line, args.width, args.height)
    );
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    let (fixed, fixed_value) = match (args.fix_slope, args.fix_intercept) {
        (Some(v), _) => (FixedVariable::Slope, v),
        (_, Some(v)) => (FixedVariable::Intercept, v),
        _ => (FixedVariable::None, 0.0),
    };

    FitConfig {
        csv_path: args.csv.clone(),
        fit_mode: args.fit,
        strategy: args.strategy,
        fixed,
        fixed_value,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_line: args.export_line.clone(),
    }
}
