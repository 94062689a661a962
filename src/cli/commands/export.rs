use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::parse_month;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        month,
        format,
        file,
        details,
        force,
    } = cmd
    {
        let (year, month) = parse_month(month)?;
        let mut pool = open_pool(cfg)?;
        ExportLogic::export(&mut pool, cfg, *format, file, year, month, *details, *force)?;
    }
    Ok(())
}
