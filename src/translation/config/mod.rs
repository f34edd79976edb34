//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, DictionaryConfig, ShellConfig, TrilangConfig};

/// 配置常量
pub mod constants {
    // 默认API设置
    pub const DEFAULT_GOOGLE_API_BASE: &str =
        "https://translation.googleapis.com/language/translate/v2";
    pub const DEFAULT_LIBRE_ENDPOINT: &str = "http://localhost:5000";

    // 词典API设置
    pub const DEFAULT_DEFINITION_ENDPOINT: &str =
        "https://en.wiktionary.org/api/rest_v1/page/definition";
    pub const DEFAULT_RELATED_ENDPOINT: &str =
        "https://en.wiktionary.org/api/rest_v1/page/related";
    pub const DEFAULT_MARKUP_ENDPOINT: &str = "https://en.wiktionary.org/api/rest_v1/page/html";

    // 词典抽取预算
    pub const DEFAULT_SECTION_CHAR_BUDGET: usize = 1200;
    pub const DEFAULT_SECTION_LINE_BUDGET: usize = 30;
    pub const DEFAULT_MAX_LIST_ITEMS: usize = 12;

    // 离线壳设置
    pub const DEFAULT_SHELL_ORIGIN: &str = "http://localhost:7080";
    pub const DEFAULT_SHELL_VERSION: &str = "trilang-shell-v1";
    pub const DEFAULT_SHELL_ASSETS: &[&str] = &[
        "/",
        "/index.html",
        "/styles.css",
        "/app.js",
        "/manifest.json",
        "/icons/icon-192.png",
        "/icons/icon-512.png",
    ];

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "trilang.toml",
        ".trilang.toml",
        "~/.config/trilang/config.toml",
        "/etc/trilang/config.toml",
    ];
}

/// 便利函数
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS.iter().any(|path| {
        let expanded = shellexpand::tilde(path);
        std::path::Path::new(expanded.as_ref()).exists()
    })
}
