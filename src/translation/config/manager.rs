//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值。
//! 同时承担设置存储的职责：保存时整体覆盖，清除时删除配置文件。

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{TranslationError, TranslationResult};

/// 提供商与整体运行配置
///
/// `google_api_key` 为主提供商凭证；未配置时编排器只使用备用提供商。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrilangConfig {
    // 提供商设置
    pub google_api_key: Option<String>,
    pub google_api_base: String,
    pub libre_endpoint: String,

    // 校验开关：对主提供商输出做语言检测，失配时回退
    pub verify_enabled: bool,

    // 子系统配置
    pub dictionary: DictionaryConfig,
    pub shell: ShellConfig,
}

/// 词典查询配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DictionaryConfig {
    pub definition_endpoint: String,
    pub related_endpoint: String,
    pub markup_endpoint: String,
    pub language: String,

    // 抽取预算（显式配置值，避免无界抽取）
    pub section_char_budget: usize,
    pub section_line_budget: usize,
    pub max_list_items: usize,
}

/// 离线壳缓存配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShellConfig {
    pub origin: String,
    pub version: String,
    pub assets: Vec<String>,
}

impl Default for TrilangConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_api_base: constants::DEFAULT_GOOGLE_API_BASE.to_string(),
            libre_endpoint: constants::DEFAULT_LIBRE_ENDPOINT.to_string(),
            verify_enabled: true,
            dictionary: DictionaryConfig::default(),
            shell: ShellConfig::default(),
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            definition_endpoint: constants::DEFAULT_DEFINITION_ENDPOINT.to_string(),
            related_endpoint: constants::DEFAULT_RELATED_ENDPOINT.to_string(),
            markup_endpoint: constants::DEFAULT_MARKUP_ENDPOINT.to_string(),
            language: "en".to_string(),
            section_char_budget: constants::DEFAULT_SECTION_CHAR_BUDGET,
            section_line_budget: constants::DEFAULT_SECTION_LINE_BUDGET,
            max_list_items: constants::DEFAULT_MAX_LIST_ITEMS,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            origin: constants::DEFAULT_SHELL_ORIGIN.to_string(),
            version: constants::DEFAULT_SHELL_VERSION.to_string(),
            assets: constants::DEFAULT_SHELL_ASSETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl TrilangConfig {
    /// 主提供商凭证是否已配置
    pub fn has_primary_credential(&self) -> bool {
        self.google_api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.libre_endpoint.trim().is_empty() {
            return Err(TranslationError::ConfigError(
                "备用提供商端点不能为空".to_string(),
            ));
        }

        url::Url::parse(&self.libre_endpoint)
            .map_err(|e| TranslationError::ConfigError(format!("备用提供商端点无效: {}", e)))?;

        if self.dictionary.section_char_budget == 0 || self.dictionary.section_line_budget == 0 {
            return Err(TranslationError::ConfigError(
                "词典抽取预算不能为0".to_string(),
            ));
        }

        if self.dictionary.max_list_items == 0 {
            return Err(TranslationError::ConfigError(
                "词典列表上限不能为0".to_string(),
            ));
        }

        if self.shell.version.is_empty() || self.shell.version.contains('|') {
            return Err(TranslationError::ConfigError(
                "壳缓存版本标识无效".to_string(),
            ));
        }

        if self.shell.assets.is_empty() {
            return Err(TranslationError::ConfigError(
                "壳缓存资源清单不能为空".to_string(),
            ));
        }

        Ok(())
    }

    /// 应用环境变量覆盖（使用类型安全环境变量系统）
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{dictionary, shell, translation, EnvVar};

        if let Ok(key) = translation::GoogleApiKey::get() {
            self.google_api_key = Some(key);
        }

        if let Ok(endpoint) = translation::LibreEndpoint::get() {
            tracing::info!("环境变量覆盖备用端点: {}", endpoint);
            self.libre_endpoint = endpoint;
        }

        if let Ok(verify) = translation::VerifyEnabled::get() {
            self.verify_enabled = verify;
        }

        if let Ok(lang) = dictionary::Language::get() {
            self.dictionary.language = lang;
        }

        if let Ok(origin) = shell::Origin::get() {
            self.shell.origin = origin;
        }

        if let Ok(version) = shell::Version::get() {
            self.shell.version = version;
        }
    }
}

/// 简化的配置管理器
///
/// 设置生命周期：首次保存时创建，每次翻译前读取，保存时整体覆盖，
/// 仅在显式清除时删除。保存和清除都作用于实际加载配置的那个文件。
pub struct ConfigManager {
    config: TrilangConfig,
    /// 配置实际加载自的文件（已展开 `~`）；未找到配置文件时为 `None`
    config_path: Option<String>,
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new() -> TranslationResult<Self> {
        let (mut config, config_path) = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self {
            config,
            config_path,
        })
    }

    /// 使用给定配置创建（测试和嵌入场景）
    pub fn with_config(config: TrilangConfig) -> TranslationResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            config_path: None,
        })
    }

    /// 获取配置
    pub fn get_config(&self) -> &TrilangConfig {
        &self.config
    }

    /// 覆盖并持久化当前配置
    ///
    /// 写回配置加载自的文件；全新安装（尚无配置文件）写入默认路径。
    pub fn save(&mut self, config: TrilangConfig) -> TranslationResult<()> {
        config.validate()?;

        let path = self
            .config_path
            .clone()
            .unwrap_or_else(|| constants::CONFIG_PATHS[0].to_string());
        let content = toml::to_string_pretty(&config)
            .map_err(|e| TranslationError::ConfigError(format!("序列化配置失败: {}", e)))?;
        std::fs::write(&path, content)
            .map_err(|e| TranslationError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        self.config = config;
        self.config_path = Some(path);
        Ok(())
    }

    /// 显式清除已保存的设置，回到默认配置
    ///
    /// 删除配置实际加载自的文件，已保存的凭证不会在下次加载时重现。
    pub fn clear(&mut self) -> TranslationResult<()> {
        let path = self
            .config_path
            .take()
            .unwrap_or_else(|| constants::CONFIG_PATHS[0].to_string());
        if Path::new(&path).exists() {
            std::fs::remove_file(&path)
                .map_err(|e| TranslationError::ConfigError(format!("删除配置文件失败: {}", e)))?;
        }
        self.config = TrilangConfig::default();
        Ok(())
    }

    /// 从文件加载配置，同时返回实际加载的路径
    fn load_config() -> TranslationResult<(TrilangConfig, Option<String>)> {
        // 首先尝试加载 .env 文件
        Self::load_dotenv();

        // 查找配置文件
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                let config = Self::load_from_file(&expanded_path)?;
                return Ok((config, Some(expanded_path.into_owned())));
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok((TrilangConfig::default(), None))
    }

    /// 从指定文件加载配置
    fn load_from_file(path: &str) -> TranslationResult<TrilangConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::ConfigError(format!("读取配置文件失败: {}", e)))?;

        // 尝试TOML格式
        if path.ends_with(".toml") {
            toml::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析TOML配置失败: {}", e)))
        } else {
            // 尝试JSON格式
            serde_json::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env.development", ".env.production", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() {
                if dotenv::from_filename(env_file).is_ok() {
                    tracing::info!("已加载环境变量文件: {}", env_file);
                    break;
                }
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let config = TrilangConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| TranslationError::ConfigError(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslationError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}
