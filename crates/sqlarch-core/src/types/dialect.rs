//! SQL dialects understood by the prompts

use crate::error::SqlArchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    PostgreSql,
    MySql,
    Oracle,
    SqlServer,
    Sqlite,
    MsAccess,
}

impl Dialect {
    /// Every dialect, in menu order
    pub const ALL: [Dialect; 6] = [
        Dialect::PostgreSql,
        Dialect::MySql,
        Dialect::Oracle,
        Dialect::SqlServer,
        Dialect::Sqlite,
        Dialect::MsAccess,
    ];

    /// Name embedded in prompts and shown to users
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PostgreSql => "PostgreSQL",
            Self::MySql => "MySQL",
            Self::Oracle => "Oracle (PL/SQL)",
            Self::SqlServer => "SQL Server (T-SQL)",
            Self::Sqlite => "SQLite",
            Self::MsAccess => "MS Access",
        }
    }

    /// Short identifier used on the command line and in config files
    pub fn id(&self) -> &'static str {
        match self {
            Self::PostgreSql => "postgresql",
            Self::MySql => "mysql",
            Self::Oracle => "oracle",
            Self::SqlServer => "sqlserver",
            Self::Sqlite => "sqlite",
            Self::MsAccess => "msaccess",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Dialect {
    type Err = SqlArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "postgresql" | "postgres" | "pg" | "pgsql" => Ok(Self::PostgreSql),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "oracle" | "plsql" | "oracleplsql" => Ok(Self::Oracle),
            "sqlserver" | "mssql" | "tsql" | "sqlservertsql" => Ok(Self::SqlServer),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "msaccess" | "access" | "jet" => Ok(Self::MsAccess),
            _ => Err(SqlArchError::invalid_input_field(
                format!(
                    "Unknown SQL dialect '{}'. Expected one of: {}",
                    s,
                    Dialect::ALL
                        .iter()
                        .map(|d| d.id())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                "dialect",
            )),
        }
    }
}
