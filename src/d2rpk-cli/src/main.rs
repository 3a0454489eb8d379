mod bosses;
mod cli;
mod commands;
mod config;
mod tables;

use anyhow::Result;
use clap::Parser;

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            data,
            players,
            difficulty,
            out_dir,
            price_table,
            price_phase,
        } => {
            commands::generate::handle(
                data.as_deref(),
                players,
                &difficulty,
                &out_dir,
                &price_table,
                price_phase.as_deref(),
            )?;
        }

        Commands::Summary {
            data,
            players,
            difficulty,
            price_table,
            price_phase,
        } => {
            commands::summary::handle(
                data.as_deref(),
                players,
                &difficulty,
                &price_table,
                price_phase.as_deref(),
            )?;
        }

        Commands::Tc {
            name,
            data,
            players,
            roll,
            limit,
        } => {
            commands::tc::handle(&name, data.as_deref(), players, roll, limit)?;
        }

        Commands::Configure { data_dir, show } => {
            commands::configure::handle(data_dir, show)?;
        }
    }

    Ok(())
}
