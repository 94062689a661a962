use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::ui::messages::{success, warning};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Snapshot the open database into `dest_file` (absolute), optionally
    /// compressed, using `VACUUM INTO`. Returns the path finally written.
    pub fn backup(
        pool: &mut DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        if !Path::new(&cfg.database).exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", cfg.database),
            )));
        }

        let dest = Path::new(dest_file);
        if !dest.is_absolute() {
            return Err(AppError::InvalidValue(format!(
                "Backup path must be absolute: {dest_file}"
            )));
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        ensure_writable(dest, force)?;
        if dest.exists() {
            fs::remove_file(dest)?;
        }

        let target = dest.to_string_lossy().to_string();
        pool.conn.execute("VACUUM INTO ?1", [&target])?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;
            if let Err(e) = fs::remove_file(dest) {
                warning(format!("Failed to remove uncompressed backup: {e}"));
            }
            compressed
        } else {
            dest.to_path_buf()
        };

        let message = if compress {
            "Backup created and compressed"
        } else {
            "Backup created"
        };
        ttlog(&pool.conn, "backup", &final_path.to_string_lossy(), message)?;

        Ok(final_path)
    }
}

/// `.zip` on Windows, `.tar.gz` elsewhere.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::InvalidValue(format!("Not a file: {}", path.display())))?;

    let out = if cfg!(target_os = "windows") {
        compress_zip(path, &name)?
    } else {
        compress_tar_gz(path, &name)?
    };

    success(format!("📦 Compressed: {}", out.display()));
    Ok(out)
}

fn compress_zip(path: &Path, name: &str) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path)
}

fn compress_tar_gz(path: &Path, name: &str) -> AppResult<PathBuf> {
    let tar_path = PathBuf::from(format!("{}.tar.gz", path.display()));
    let file = fs::File::create(&tar_path)?;

    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = tar::Builder::new(encoder);
    archive.append_path_with_name(path, name)?;
    archive.into_inner()?.finish()?;

    Ok(tar_path)
}
