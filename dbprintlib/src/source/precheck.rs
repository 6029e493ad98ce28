//! Resource pre-checks run before anything is queried.
//!
//! The checks run in order and stop at the first failure: first the driver
//! must be one this build ships, then a connection must open and close.

use std::fmt;

use tracing::{error, info};

use crate::error::DbPrintError;
use crate::Result;

use super::sqlite::SqliteSource;

/// Driver names accepted for the bundled SQLite driver.
pub const SQLITE_DRIVERS: &[&str] = &["sqlite", "sqlite3"];

/// One pre-check step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCheck {
    /// The named driver is available
    Driver,
    /// A connection can be opened and closed
    Connection,
}

impl fmt::Display for ResourceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceCheck::Driver => f.write_str("driver"),
            ResourceCheck::Connection => f.write_str("connection"),
        }
    }
}

/// Ordered driver and connection checks for one data source.
#[derive(Debug, Clone)]
pub struct ResourceChain {
    driver: String,
    connection: String,
    checks: Vec<ResourceCheck>,
}

impl ResourceChain {
    /// Driver check followed by connection check.
    pub fn new(driver: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            connection: connection.into(),
            checks: vec![ResourceCheck::Driver, ResourceCheck::Connection],
        }
    }

    /// Steps, in the order they run.
    pub fn checks(&self) -> &[ResourceCheck] {
        &self.checks
    }

    /// Run every check in order, stopping at the first failure.
    pub fn verify(&self) -> Result<()> {
        for check in &self.checks {
            self.run(*check).map_err(|reason| {
                error!(%check, %reason, "Resource check failed");
                DbPrintError::ResourceUnavailable {
                    check: check.to_string(),
                    reason,
                }
            })?;
        }
        Ok(())
    }

    /// Like [`verify`](Self::verify), but only reports pass/fail.
    pub fn has_resource(&self) -> bool {
        self.verify().is_ok()
    }

    fn run(&self, check: ResourceCheck) -> std::result::Result<(), String> {
        match check {
            ResourceCheck::Driver => {
                if is_known_driver(&self.driver) {
                    info!(driver = %self.driver, "Driver found");
                    Ok(())
                } else {
                    Err(format!("driver '{}' not found", self.driver))
                }
            }
            ResourceCheck::Connection => {
                let source =
                    SqliteSource::open_existing(&self.connection).map_err(|e| e.to_string())?;
                source
                    .connection()
                    .query_row("SELECT 1", [], |_| Ok(()))
                    .map_err(|e| e.to_string())?;
                source.close();
                info!("Connected to database");
                Ok(())
            }
        }
    }
}

/// Whether `driver` names a driver this build can use.
pub fn is_known_driver(driver: &str) -> bool {
    SQLITE_DRIVERS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(driver.trim()))
}
