use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Path of the JSON data file.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("habita.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("HABITA_"))
            .extract()
    }
}
