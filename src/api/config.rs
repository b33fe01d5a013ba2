use clap::Parser;

use crate::utils::app_config::Settings;

#[derive(Parser, Debug, Clone)]
#[command(name = "budget-back-end", about = "Monthly budget API server")]
pub struct ApiConfig {
    #[arg(long, env, default_value_t = 6969)]
    pub port: u16,

    #[command(flatten)]
    pub settings: Settings,
}

impl ApiConfig {
    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_flag() {
        let config = ApiConfig::parse_from([
            "budget-back-end",
            "--port",
            "8080",
            "--database-url",
            "postgres://localhost/budget",
        ]);

        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.settings.db_pool_size, 10);
    }
}
