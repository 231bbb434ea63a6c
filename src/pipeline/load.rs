use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::config::ColumnNames;
use crate::error::Result;
use crate::types::{CompanyRecord, StoredCompany};

/// Write records to CSV, replacing whatever was at `path`.
///
/// The first column is an unnamed zero-based row index.
#[instrument(skip(records, columns), fields(count = records.len()))]
pub fn write_csv(records: &[CompanyRecord], path: &Path, columns: &ColumnNames) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "",
        columns.rank.as_str(),
        columns.name.as_str(),
        columns.revenue.as_str(),
        columns.revenue_usd.as_str(),
    ])?;

    for (index, record) in records.iter().enumerate() {
        writer.write_record([
            index.to_string(),
            record.rank.to_string(),
            record.name.clone(),
            record.revenue_value.to_string(),
            format_usd(record.revenue_usd),
        ])?;
    }
    writer.flush()?;

    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// USD amounts always carry a fractional part, so `100` is written as `100.0`.
pub fn format_usd(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQLite side of the load stage. Owns the connection for the load-and-query
/// phase; `close` ends it.
pub struct SqliteLoader {
    conn: Connection,
}

impl SqliteLoader {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())?;
        debug!("Opened SQLite database at {}", db_path.as_ref().display());
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Drop and recreate `table`, then insert every record in one transaction.
    #[instrument(skip(self, columns, records), fields(count = records.len()))]
    pub fn replace_table(
        &mut self,
        table: &str,
        columns: &ColumnNames,
        records: &[CompanyRecord],
    ) -> Result<()> {
        let table = quote_ident(table);
        let rank = quote_ident(&columns.rank);
        let name = quote_ident(&columns.name);
        let revenue = quote_ident(&columns.revenue);
        let usd = quote_ident(&columns.revenue_usd);

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (
                 {rank}    INTEGER,
                 {name}    TEXT,
                 {revenue} INTEGER,
                 {usd}     REAL
             );"
        ))?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} ({rank}, {name}, {revenue}, {usd}) VALUES (?1, ?2, ?3, ?4)"
            ))?;
            for record in records {
                stmt.execute(params![
                    record.rank,
                    record.name,
                    record.revenue_value,
                    record.revenue_usd
                ])?;
            }
        }
        tx.commit()?;

        info!("Loaded {} rows into {}", records.len(), table);
        Ok(())
    }

    /// Read every row of `table` back in insertion order.
    pub fn query_all(&self, table: &str) -> Result<Vec<StoredCompany>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {}", quote_ident(table)))?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredCompany {
                rank: row.get(0)?,
                name: row.get(1)?,
                revenue_value: row.get(2)?,
                revenue_usd: row.get(3)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}

/// The read-back query as echoed to the console. Execution quotes the name.
pub fn select_all_statement(table: &str) -> String {
    format!("SELECT * FROM {table}")
}

/// Render query output as an aligned text table with a leading row index.
pub fn render_rows(columns: &ColumnNames, rows: &[StoredCompany]) -> String {
    let header = vec![
        String::new(),
        columns.rank.clone(),
        columns.name.clone(),
        columns.revenue.clone(),
        columns.revenue_usd.clone(),
    ];
    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            vec![
                i.to_string(),
                row.rank.to_string(),
                row.name.clone(),
                row.revenue_value.to_string(),
                format_usd(row.revenue_usd),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for cells in std::iter::once(&header).chain(body.iter()) {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:>w$}", w = *w))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out.push_str(&format!("[{} rows x 4 columns]\n", rows.len()));
    out
}
