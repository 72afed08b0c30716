use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Server configuration.
///
/// Read from an optional `madlib-server.toml` in the working directory, then
/// from `MADLIB_*` environment variables (`MADLIB_PORT`, `MADLIB_DATA_DIR`,
/// `MADLIB_MAX_REDRAWS`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
	#[serde(default = "default_host")]
	pub host: String,
	#[serde(default = "default_port")]
	pub port: u16,
	/// Folder holding `words/` and `templates/`.
	#[serde(default = "default_data_dir")]
	pub data_dir: String,
	/// Redraw bound for every fill. A request can't run unbounded.
	#[serde(default = "default_max_redraws")]
	pub max_redraws: usize,
	#[serde(default)]
	pub permissive_cors: bool,
}

fn default_host() -> String {
	"127.0.0.1".to_string()
}

fn default_port() -> u16 {
	5000
}

fn default_data_dir() -> String {
	"./data".to_string()
}

fn default_max_redraws() -> usize {
	1000
}

impl Settings {
	pub fn load() -> Result<Self, ConfigError> {
		Config::builder()
			.add_source(File::with_name("madlib-server").required(false))
			.add_source(Environment::with_prefix("MADLIB").try_parsing(true))
			.build()?
			.try_deserialize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_sources_use_defaults() {
		let settings: Settings = Config::builder().build().unwrap().try_deserialize().unwrap();
		assert_eq!(settings.port, 5000);
		assert_eq!(settings.data_dir, "./data");
		assert_eq!(settings.max_redraws, 1000);
		assert!(!settings.permissive_cors);
	}

	#[test]
	fn overrides_are_applied() {
		let settings: Settings = Config::builder()
			.set_override("port", 8080)
			.unwrap()
			.set_override("max_redraws", 5)
			.unwrap()
			.build()
			.unwrap()
			.try_deserialize()
			.unwrap();
		assert_eq!(settings.port, 8080);
		assert_eq!(settings.max_redraws, 5);
		assert_eq!(settings.host, "127.0.0.1");
	}
}
