use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::errors::Result;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UserConfig {
    pub data_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl UserConfig {
    pub fn for_input(data_path: &str) -> Self {
        UserConfig {
            data_path: data_path.to_string(),
            log_level: default_log_level(),
        }
    }
}

pub fn load_user_config<P: AsRef<Path>>(path: P) -> Result<UserConfig> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
