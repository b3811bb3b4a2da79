//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The engine calls store methods — nothing else executes SQL.

use rusqlite::{params, Connection, OptionalExtension};
use crate::{
    error::SimResult,
    event::EventLogEntry,
    history::WorkHistory,
    types::Tick,
    work::{CategoryCounts, WorkCategory},
};

/// One persisted row of the per-tick history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub tick:      Tick,
    pub category:  WorkCategory,
    pub assigned:  u32,
    pub performed: u32,
}

pub struct SimStore {
    conn: Connection,
}

impl SimStore {
    /// Open (or create) the simulation database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(
        &self,
        run_id: &str,
        seed: u64,
        version: &str,
        config_json: &str,
        started_at: i64,
    ) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO run (run_id, seed, version, config_json, started_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![run_id, seed as i64, version, config_json, started_at],
        )?;
        Ok(())
    }

    pub fn run_exists(&self, run_id: &str) -> SimResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM run WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (run_id, tick, source, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.run_id,
                entry.tick as i64,
                entry.source,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_tick(&self, run_id: &str, tick: Tick) -> SimResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, tick, source, event_type, payload
             FROM event_log WHERE run_id = ?1 AND tick = ?2
             ORDER BY id ASC"
        )?;
        let entries = stmt.query_map(params![run_id, tick as i64], |row| {
            Ok(EventLogEntry {
                id:         Some(row.get(0)?),
                run_id:     row.get(1)?,
                tick:       row.get::<_, i64>(2)? as u64,
                source:     row.get(3)?,
                event_type: row.get(4)?,
                payload:    row.get(5)?,
            })
        })?.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, run_id: &str, event_type: &str) -> SimResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE run_id = ?1 AND event_type = ?2",
            params![run_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Snapshot ───────────────────────────────────────────────

    pub fn save_snapshot(&self, run_id: &str, tick: Tick, state_json: &str) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO snapshot (run_id, tick, state_json) VALUES (?1, ?2, ?3)",
            params![run_id, tick as i64, state_json],
        )?;
        Ok(())
    }

    pub fn latest_snapshot_before(
        &self, run_id: &str, tick: Tick
    ) -> SimResult<Option<(Tick, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT tick, state_json FROM snapshot
             WHERE run_id = ?1 AND tick <= ?2
             ORDER BY tick DESC LIMIT 1"
        )?;
        let result = stmt.query_row(params![run_id, tick as i64], |row| {
            Ok((row.get::<_, i64>(0)? as u64, row.get::<_, String>(1)?))
        }).optional()?;
        Ok(result)
    }

    // ── Tick history ───────────────────────────────────────────

    pub fn record_history(
        &self,
        run_id: &str,
        tick: Tick,
        assigned: &CategoryCounts,
        performed: &CategoryCounts,
    ) -> SimResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO tick_history (run_id, tick, category, assigned, performed)
             VALUES (?1, ?2, ?3, ?4, ?5)"
        )?;
        for category in WorkCategory::ALL {
            stmt.execute(params![
                run_id,
                tick as i64,
                category.name(),
                assigned.get(category),
                performed.get(category),
            ])?;
        }
        Ok(())
    }

    pub fn history_rows(&self, run_id: &str) -> SimResult<Vec<HistoryRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT tick, category, assigned, performed
             FROM tick_history WHERE run_id = ?1
             ORDER BY tick ASC"
        )?;
        let rows = stmt.query_map(params![run_id], |row| {
            let name: String = row.get(1)?;
            let category = WorkCategory::from_name(&name).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    format!("unknown work category '{name}'").into(),
                )
            })?;
            Ok(HistoryRow {
                tick:      row.get::<_, i64>(0)? as u64,
                category,
                assigned:  row.get(2)?,
                performed: row.get(3)?,
            })
        })?.collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Rebuild the in-memory series shape from the persisted rows.
    pub fn load_history(&self, run_id: &str) -> SimResult<WorkHistory> {
        let mut history = WorkHistory::new();
        let rows = self.history_rows(run_id)?;
        for chunk in rows.chunk_by(|a, b| a.tick == b.tick) {
            let mut assigned = CategoryCounts::new();
            let mut performed = CategoryCounts::new();
            for row in chunk {
                assigned.add(row.category, row.assigned);
                performed.add(row.category, row.performed);
            }
            history.record(&assigned, &performed);
        }
        Ok(history)
    }
}
