use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::hint;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Log { print, operation } = cmd else {
        return Ok(());
    };

    if !*print {
        hint("Use `log --print` to show the internal log.");
        return Ok(());
    }

    let pool = open_pool(cfg)?;
    LogLogic::print_log(&pool, operation.as_deref())
}
