//! Web 服务器模块
//!
//! 为翻译、词典查询与离线壳提供基于 HTTP 的访问入口

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

#[cfg(feature = "web")]
use axum::Router;
#[cfg(feature = "web")]
use tower_http::cors::CorsLayer;

use crate::core::TrilangError;
use crate::translation::config::TrilangConfig;

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    app_config: TrilangConfig,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, app_config: TrilangConfig) -> Self {
        Self { config, app_config }
    }

    /// 启动 Web 服务器
    #[cfg(feature = "web")]
    pub async fn start(&self) -> Result<(), TrilangError> {
        use crate::dictionary::DictionaryService;
        use crate::shell::{ShellCache, ShellManifest};
        use crate::translation::detect::{DetectLanguage, LibreDetector};
        use crate::translation::service::TranslationService;

        let service = TranslationService::from_config(&self.app_config)
            .map_err(|e| TrilangError::new(&format!("装配翻译服务失败: {}", e)))?;

        let client = reqwest::Client::new();
        let detector: Box<dyn DetectLanguage> = Box::new(LibreDetector::new(
            client,
            &self.app_config.libre_endpoint,
        ));

        let dictionary = DictionaryService::from_config(&self.app_config.dictionary);

        // 初始化离线壳缓存；任何失败都降级运行而不是中止启动
        let shell = if let Some(ref cache_path) = self.config.cache_path {
            let manifest = ShellManifest::from_config(&self.app_config.shell);
            match ShellCache::open(std::path::Path::new(cache_path), manifest) {
                Ok(cache) => {
                    match cache.install().await {
                        Ok(()) => match cache.activate() {
                            Ok(evicted) if evicted > 0 => {
                                tracing::info!("壳缓存已激活，清除 {} 个旧条目", evicted)
                            }
                            Ok(_) => tracing::info!("壳缓存已激活"),
                            Err(e) => {
                                eprintln!("警告: 壳缓存激活失败: {}", e);
                                eprintln!("继续运行，静态资源将直接回源");
                            }
                        },
                        Err(e) => {
                            eprintln!("警告: 壳缓存安装失败: {}", e);
                            eprintln!("继续运行，静态资源将直接回源");
                        }
                    }
                    Some(cache)
                }
                Err(e) => {
                    eprintln!("警告: 无法打开壳缓存 '{}': {}", cache_path, e);
                    eprintln!("继续运行，但离线壳功能将不可用");
                    None
                }
            }
        } else {
            println!("未配置壳缓存路径");
            None
        };

        let app_state = Arc::new(AppState {
            service,
            detector,
            dictionary,
            dictionary_lang: self.app_config.dictionary.language.clone(),
            shell,
        });

        let app = create_router(app_state);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address())
            .await
            .map_err(|e| TrilangError::new(&format!("Failed to bind server: {}", e)))?;

        println!(
            "Web server starting at http://{}:{}",
            self.config.bind_addr, self.config.port
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TrilangError::new(&format!("Server error: {}", e)))?;

        Ok(())
    }

    /// 启动 Web 服务器（非 web feature 版本）
    #[cfg(not(feature = "web"))]
    pub async fn start(&self) -> Result<(), TrilangError> {
        Err(TrilangError::new("Web feature not enabled"))
    }
}

/// 创建路由器
#[cfg(feature = "web")]
fn create_router(app_state: Arc<AppState>) -> Router {
    create_routes().with_state(app_state).layer(CorsLayer::permissive())
}
