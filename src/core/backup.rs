use crate::core::normalizer::FieldNormalizer;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::upsert_record;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyLog, HabitCatalog};
use crate::ui::messages::{info, success, warning};
use crate::utils::confirm::ask_confirmation;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the SQLite file to `dest_file`, optionally zipped.
    pub fn backup(
        pool: &mut DbPool,
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = crate::utils::path::expand_tilde(dest_file);

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_path = if compress {
            dest.with_extension("zip")
        } else {
            dest.clone()
        };

        // ⛔ If destination file exists → ask confirmation
        if final_path.exists()
            && !force
            && !ask_confirmation(&format!(
                "The file '{}' already exists. Overwrite it?",
                final_path.display()
            ))?
        {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        // flush pending pages before copying the file
        pool.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);").ok();

        // 3️⃣ Copy or compress
        if compress {
            zip_file(src, &final_path)?;
            info(format!("📦 Compressed: {}", final_path.display()));
        } else {
            fs::copy(src, &final_path)?;
        }
        success(format!("Backup created: {}", final_path.display()));

        // 4️⃣ Log in DB
        ttlog_or_warn(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(Some(final_path))
    }

    /// Upsert every record of a JSON export (array of daily logs).
    ///
    /// Field keys go through the normalizer; records whose fields break the
    /// catalog rules are skipped and counted.
    pub fn restore(
        pool: &mut DbPool,
        catalog: &HabitCatalog,
        file: &str,
    ) -> AppResult<(usize, usize)> {
        let path = crate::utils::path::expand_tilde(file);
        let content = fs::read_to_string(&path)?;
        let records: Vec<DailyLog> = serde_json::from_str(&content)?;

        let normalizer = FieldNormalizer::new(catalog);

        let (valid, invalid): (Vec<DailyLog>, Vec<DailyLog>) = records
            .into_iter()
            .map(|mut r| {
                r.source = "restore".to_string();
                // chiavi canoniche anche per backup modificati a mano
                r.fields = std::mem::take(&mut r.fields)
                    .into_iter()
                    .map(|(k, v)| (normalizer.normalize_header(&k), v))
                    .collect();
                r
            })
            .partition(|r| {
                r.fields
                    .iter()
                    .all(|(k, v)| !k.is_empty() && catalog.validate(k, v).is_ok())
            });

        pool.with_transaction(|tx| {
            for r in &valid {
                upsert_record(tx, r)?;
            }
            Ok(())
        })?;

        ttlog_or_warn(
            &pool.conn,
            "restore",
            &path.to_string_lossy(),
            &format!("restored {} records, skipped {}", valid.len(), invalid.len()),
        );

        success(format!(
            "Restored {} records ({} skipped) from {}.",
            valid.len(),
            invalid.len(),
            path.display()
        ));

        Ok((valid.len(), invalid.len()))
    }
}

/// Write `src` as the single entry of a deflated zip archive at `zip_path`.
fn zip_file(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Export(format!("invalid source path: {}", src.display())))?;

    let mut f = fs::File::open(src)?;
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(())
}
