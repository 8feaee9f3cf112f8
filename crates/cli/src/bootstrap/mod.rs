mod database;
mod logging;

pub use database::init_database;
pub use logging::init_logging;

use cobalt_dns_domain::config::ConfigError;
use cobalt_dns_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> Result<Config, ConfigError> {
    Config::load(path, overrides)
}
