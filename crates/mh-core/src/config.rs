use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbenchConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub user_models_path: PathBuf,
    pub history_path: PathBuf,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8000,
            },
            data: DataConfig {
                user_models_path: PathBuf::from("data/user_models.json"),
                history_path: PathBuf::from("data/rollout_history.json"),
            },
        }
    }
}
