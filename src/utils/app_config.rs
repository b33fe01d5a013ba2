use anyhow::{Context, Result};
use clap::Args;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use socketioxide::SocketIo;

use crate::utils::commons::DbPool;

/// Settings shared by the server and the cli, read from flags or the environment.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    #[arg(long, env)]
    pub database_url: String,
    #[arg(long, env, default_value_t = 10)]
    pub db_pool_size: u32,
}

#[derive(Clone)]
pub struct AppConfig {
    pub pool: DbPool,
    pub io: Option<SocketIo>,
}

impl AppConfig {
    pub fn new(pool: DbPool) -> Self {
        Self { pool, io: None }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let manager = ConnectionManager::<PgConnection>::new(settings.database_url.as_str());
        let pool = Pool::builder()
            .max_size(settings.db_pool_size)
            .build(manager)
            .context("failed to build database pool")?;

        Ok(Self::new(pool))
    }

    pub fn set_io(&mut self, io: SocketIo) {
        self.io = Some(io);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        settings: Settings,
    }

    #[test]
    fn test_settings_from_flags() {
        let cli = TestCli::parse_from([
            "budget",
            "--database-url",
            "postgres://localhost/budget",
            "--db-pool-size",
            "4",
        ]);

        assert_eq!(cli.settings.database_url, "postgres://localhost/budget");
        assert_eq!(cli.settings.db_pool_size, 4);
    }
}
