//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问，配置管理器在加载配置文件后
//! 使用这里的定义应用覆盖值

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment variable '{}': {}",
            self.variable, self.message
        )
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Err(EnvError {
                variable: Self::NAME.to_string(),
                message: "Environment variable not set".to_string(),
            }),
        }
    }
}

fn parse_bool(value: &str, variable: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(EnvError {
            variable: variable.to_string(),
            message: format!("Invalid boolean '{}'. Use: true/false, 1/0, yes/no", value),
        }),
    }
}

fn parse_url(value: &str, variable: &str) -> EnvResult<String> {
    match url::Url::parse(value) {
        Ok(_) => Ok(value.trim_end_matches('/').to_string()),
        Err(e) => Err(EnvError {
            variable: variable.to_string(),
            message: format!("Invalid URL '{}': {}", value, e),
        }),
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "TRILANG_LOG_LEVEL";
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// Google 翻译 API 密钥（主提供商凭证）
    pub struct GoogleApiKey;
    impl EnvVar<String> for GoogleApiKey {
        const NAME: &'static str = "TRILANG_GOOGLE_API_KEY";
        const DESCRIPTION: &'static str = "API key for the primary (Google) translation provider";

        fn parse(value: &str) -> EnvResult<String> {
            let key = value.trim();
            if key.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key must not be empty".to_string(),
                });
            }
            Ok(key.to_string())
        }
    }

    /// Libre/中继端点（备用提供商，同时承载 /detect）
    pub struct LibreEndpoint;
    impl EnvVar<String> for LibreEndpoint {
        const NAME: &'static str = "TRILANG_LIBRE_ENDPOINT";
        const DESCRIPTION: &'static str =
            "Base URL of the secondary (LibreTranslate-compatible) provider";

        fn parse(value: &str) -> EnvResult<String> {
            parse_url(value, Self::NAME)
        }
    }

    /// 是否对主提供商的输出做语言校验
    pub struct VerifyEnabled;
    impl EnvVar<bool> for VerifyEnabled {
        const NAME: &'static str = "TRILANG_VERIFY_ENABLED";
        const DESCRIPTION: &'static str =
            "Verify primary provider output language and fall back on mismatch";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }
}

/// 词典相关环境变量
pub mod dictionary {
    use super::*;

    /// 词典查询语言
    pub struct Language;
    impl EnvVar<String> for Language {
        const NAME: &'static str = "TRILANG_DICTIONARY_LANG";
        const DESCRIPTION: &'static str = "Language code for dictionary lookups (ISO 639-1)";

        fn parse(value: &str) -> EnvResult<String> {
            let lang = value.trim().to_lowercase();
            if lang.len() != 2 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Language code must be 2 characters (ISO 639-1)".to_string(),
                });
            }
            Ok(lang)
        }
    }
}

/// 离线壳缓存相关环境变量
pub mod shell {
    use super::*;

    /// 静态资源的来源地址
    pub struct Origin;
    impl EnvVar<String> for Origin {
        const NAME: &'static str = "TRILANG_SHELL_ORIGIN";
        const DESCRIPTION: &'static str = "Origin the shell assets are fetched from at install";

        fn parse(value: &str) -> EnvResult<String> {
            parse_url(value, Self::NAME)
        }
    }

    /// 缓存版本标识，修改后会使旧缓存整体失效
    pub struct Version;
    impl EnvVar<String> for Version {
        const NAME: &'static str = "TRILANG_SHELL_VERSION";
        const DESCRIPTION: &'static str = "Shell cache version identifier";

        fn parse(value: &str) -> EnvResult<String> {
            let version = value.trim();
            if version.is_empty() || version.contains('|') {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Version must be non-empty and must not contain '|'".to_string(),
                });
            }
            Ok(version.to_string())
        }
    }
}

/// Web 服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "TRILANG_WEB_BIND_ADDRESS";
        const DESCRIPTION: &'static str = "Web server bind address";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Bind address must not be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 监听端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "TRILANG_WEB_PORT";
        const DESCRIPTION: &'static str = "Web server port";

        fn get() -> EnvResult<u16> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(7080),
            }
        }

        fn parse(value: &str) -> EnvResult<u16> {
            match value.parse::<u16>() {
                Ok(0) => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                }),
                Ok(port) => Ok(port),
                Err(_) => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid port number '{}'", value),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_port_rejects_zero() {
        assert!(web::Port::parse("0").is_err());
        assert_eq!(web::Port::parse("7080").unwrap(), 7080);
    }

    #[test]
    fn bool_parsing_accepts_common_forms() {
        assert_eq!(parse_bool("yes", "X").unwrap(), true);
        assert_eq!(parse_bool("0", "X").unwrap(), false);
        assert!(parse_bool("maybe", "X").is_err());
    }

    #[test]
    fn url_parsing_strips_trailing_slash() {
        assert_eq!(
            parse_url("http://localhost:5000/", "X").unwrap(),
            "http://localhost:5000"
        );
        assert!(parse_url("not a url", "X").is_err());
    }

    #[test]
    fn shell_version_rejects_separator() {
        assert!(shell::Version::parse("v1|v2").is_err());
        assert_eq!(shell::Version::parse("trilang-shell-v2").unwrap(), "trilang-shell-v2");
    }
}
