use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// `init`: write the config file (not with `--test`) and create or
/// upgrade the database it points to.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?
        .to_string_lossy()
        .to_string();

    let pool = DbPool::open(&db_path)?;
    success(format!("Database initialized at {db_path}"));

    // Not fatal.
    if let Err(e) = ttlog(&pool.conn, "init", &db_path, "Database initialized") {
        warning(format!("Failed to write internal log: {e}"));
    }

    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database    : {db_path}");
    Ok(())
}
