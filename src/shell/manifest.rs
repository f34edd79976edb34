//! 壳资源清单
//!
//! 固定的静态资源路径列表，由单一版本字符串标识；更换版本标识
//! 会使之前缓存的全部资源失效。

use crate::translation::config::ShellConfig;

/// 壳资源清单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellManifest {
    pub version: String,
    pub origin: String,
    pub assets: Vec<String>,
}

impl ShellManifest {
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            version: config.version.clone(),
            origin: config.origin.trim_end_matches('/').to_string(),
            assets: config.assets.clone(),
        }
    }

    /// 资源在存储中的键：`{version}|{path}`
    pub fn key(&self, path: &str) -> String {
        format!("{}|{}", self.version, path)
    }

    /// 从存储键还原版本标识
    pub fn version_of(key: &str) -> Option<&str> {
        key.split_once('|').map(|(version, _)| version)
    }

    /// 资源的完整抓取地址
    pub fn asset_url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }
}

impl Default for ShellManifest {
    fn default() -> Self {
        Self::from_config(&ShellConfig::default())
    }
}
