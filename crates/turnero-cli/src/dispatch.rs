use turnero_client::commands;
use turnero_client::commands::bill::BillRunOptions;
use turnero_client::commands::estimate::EstimateRunOptions;
use turnero_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Classify { names, .. } => commands::classify::run(names),
        Commands::Shifts { dates, config, .. } => commands::shifts::run(dates, config.as_deref()),
        Commands::Estimate {
            path,
            from,
            to,
            config,
            ..
        } => commands::estimate::run_with_options(EstimateRunOptions {
            path: path.clone(),
            from: from.clone(),
            to: to.clone(),
            config_path: config.as_deref(),
            ..EstimateRunOptions::default()
        }),
        Commands::Bill {
            path,
            shifts,
            force_include,
            from,
            to,
            by_time,
            config,
            ..
        } => commands::bill::run_with_options(BillRunOptions {
            path: path.clone(),
            shift_dates: shifts.clone(),
            force_include: force_include.clone(),
            from: from.clone(),
            to: to.clone(),
            by_time: *by_time,
            config_path: config.as_deref(),
            ..BillRunOptions::default()
        }),
    }
}
