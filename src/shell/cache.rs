//! 壳缓存实现
//!
//! 状态机 `Installing -> Active`：安装阶段抓取清单内全部资源，
//! 任意一个失败则整个安装失败（fail-closed），不写入任何条目；
//! 激活阶段删除版本标识不匹配的旧缓存。请求路由对 API 模式直连网络，
//! 其余走缓存优先。

use std::path::Path;
use std::sync::RwLock;

use redb::{Database, ReadableTable, TableDefinition};

use super::manifest::ShellManifest;
use super::{ShellCacheError, ShellCacheResult};

const ASSETS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("shell_assets");

/// 已知的 API 请求模式，匹配的请求永远不走缓存
const API_URL_PATTERNS: &[&str] = &[
    "translation.googleapis.com",
    "/translate",
    "/detect",
    "wiktionary.org/api/",
    "/api/dictionary",
];

/// 请求是否指向翻译/检测/词典 API
pub fn is_api_request(url: &str) -> bool {
    API_URL_PATTERNS.iter().any(|pattern| url.contains(pattern))
}

/// 缓存状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCacheState {
    Installing,
    Active,
}

/// 单个请求的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// API 请求：绕过缓存直连网络，结果永不陈旧
    NetworkOnly,
    /// 静态资源：缓存命中则返回，否则回源
    CacheFirst,
}

/// 缓存统计信息
#[derive(Debug, Default, Clone, Copy, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// 离线壳缓存
pub struct ShellCache {
    db: Database,
    manifest: ShellManifest,
    client: reqwest::Client,
    state: RwLock<ShellCacheState>,
    stats: RwLock<CacheStats>,
}

impl ShellCache {
    /// 打开或创建持久化缓存
    pub fn open(path: &Path, manifest: ShellManifest) -> ShellCacheResult<Self> {
        let db =
            Database::create(path).map_err(|e| ShellCacheError::Storage(e.to_string()))?;

        Ok(Self {
            db,
            manifest,
            client: reqwest::Client::new(),
            state: RwLock::new(ShellCacheState::Installing),
            stats: RwLock::new(CacheStats::default()),
        })
    }

    pub fn manifest(&self) -> &ShellManifest {
        &self.manifest
    }

    pub fn state(&self) -> ShellCacheState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn stats(&self) -> CacheStats {
        *self.stats.read().unwrap_or_else(|e| e.into_inner())
    }

    /// 安装：抓取清单内全部静态资源并整体写入
    ///
    /// 任意一个资源获取失败都会使整个安装失败，且不写入任何条目。
    pub async fn install(&self) -> ShellCacheResult<()> {
        let mut fetched: Vec<(String, Vec<u8>)> = Vec::with_capacity(self.manifest.assets.len());

        for asset in &self.manifest.assets {
            let url = self.manifest.asset_url(asset);
            tracing::debug!("安装壳资源: {}", url);

            let response = self.client.get(&url).send().await.map_err(|e| {
                ShellCacheError::Install {
                    asset: asset.clone(),
                    reason: e.to_string(),
                }
            })?;

            if !response.status().is_success() {
                return Err(ShellCacheError::Install {
                    asset: asset.clone(),
                    reason: format!("HTTP {}", response.status()),
                });
            }

            let bytes = response.bytes().await.map_err(|e| ShellCacheError::Install {
                asset: asset.clone(),
                reason: e.to_string(),
            })?;

            fetched.push((asset.clone(), bytes.to_vec()));
        }

        // 所有条目在同一个事务里写入，存储错误不会留下部分条目
        self.store_all(&fetched)?;

        tracing::info!(
            "壳缓存安装完成: {} 个资源，版本 {}",
            fetched.len(),
            self.manifest.version
        );
        Ok(())
    }

    /// 激活：清除版本不匹配的旧缓存条目，然后接管请求处理
    ///
    /// 返回被清除的条目数量。
    pub fn activate(&self) -> ShellCacheResult<usize> {
        let stale_keys = self.collect_stale_keys()?;

        if !stale_keys.is_empty() {
            let write_txn = self
                .db
                .begin_write()
                .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
            {
                let mut table = write_txn
                    .open_table(ASSETS_TABLE)
                    .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
                for key in &stale_keys {
                    table
                        .remove(key.as_str())
                        .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
                }
            }
            write_txn
                .commit()
                .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
        }

        {
            let mut stats = self.stats.write().unwrap_or_else(|e| e.into_inner());
            stats.evictions += stale_keys.len() as u64;
        }
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = ShellCacheState::Active;

        if !stale_keys.is_empty() {
            tracing::info!("已清除 {} 个旧版本缓存条目", stale_keys.len());
        }
        Ok(stale_keys.len())
    }

    fn collect_stale_keys(&self) -> ShellCacheResult<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| ShellCacheError::Storage(e.to_string()))?;

        let table = match read_txn.open_table(ASSETS_TABLE) {
            Ok(table) => table,
            // 表尚不存在说明从未安装过，没有旧条目
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(ShellCacheError::Storage(e.to_string())),
        };

        let mut stale = Vec::new();
        let iter = table
            .iter()
            .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
        for item in iter {
            let (key, _) = item.map_err(|e| ShellCacheError::Storage(e.to_string()))?;
            let key = key.value();
            if ShellManifest::version_of(key) != Some(self.manifest.version.as_str()) {
                stale.push(key.to_string());
            }
        }

        Ok(stale)
    }

    /// 决定一个请求的处理策略
    ///
    /// API 模式匹配优先于缓存优先默认值：即使同一路径存在缓存资源，
    /// 匹配 API 模式的请求也始终直连网络。
    pub fn route(&self, url: &str) -> FetchStrategy {
        if is_api_request(url) {
            FetchStrategy::NetworkOnly
        } else {
            FetchStrategy::CacheFirst
        }
    }

    /// 在当前版本下存储一个资源
    pub fn store(&self, path: &str, bytes: &[u8]) -> ShellCacheResult<()> {
        self.store_all(&[(path.to_string(), bytes.to_vec())])
    }

    /// 在同一个写事务中存储一批资源，整体提交或整体不写入
    fn store_all(&self, entries: &[(String, Vec<u8>)]) -> ShellCacheResult<()> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(ASSETS_TABLE)
                .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
            for (path, bytes) in entries {
                let key = self.manifest.key(path);
                table
                    .insert(key.as_str(), bytes.as_slice())
                    .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
            }
        }
        write_txn
            .commit()
            .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
        Ok(())
    }

    /// 读取当前版本下的缓存资源
    pub fn get_cached(&self, path: &str) -> ShellCacheResult<Option<Vec<u8>>> {
        let key = self.manifest.key(path);
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| ShellCacheError::Storage(e.to_string()))?;

        let table = match read_txn.open_table(ASSETS_TABLE) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(ShellCacheError::Storage(e.to_string())),
        };

        let value = table
            .get(key.as_str())
            .map_err(|e| ShellCacheError::Storage(e.to_string()))?;
        Ok(value.map(|guard| guard.value().to_vec()))
    }

    /// 处理一个资源请求
    ///
    /// API 模式的请求完全绕过缓存直连网络；其余请求缓存优先。
    pub async fn handle(&self, path: &str) -> ShellCacheResult<Vec<u8>> {
        match self.route(path) {
            FetchStrategy::NetworkOnly => self.fetch_network(path).await,
            FetchStrategy::CacheFirst => self.serve(path).await,
        }
    }

    /// 提供一个静态资源：缓存命中则返回，否则回源获取
    ///
    /// 回源获取的响应不会写回缓存（缓存只在安装阶段填充）。
    pub async fn serve(&self, path: &str) -> ShellCacheResult<Vec<u8>> {
        if let Some(bytes) = self.get_cached(path)? {
            let mut stats = self.stats.write().unwrap_or_else(|e| e.into_inner());
            stats.hits += 1;
            return Ok(bytes);
        }

        {
            let mut stats = self.stats.write().unwrap_or_else(|e| e.into_inner());
            stats.misses += 1;
        }

        self.fetch_network(path).await
    }

    /// 直连网络获取资源，不读也不写缓存
    async fn fetch_network(&self, path: &str) -> ShellCacheResult<Vec<u8>> {
        let url = self.manifest.asset_url(path);
        tracing::debug!("直连网络获取: {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShellCacheError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ShellCacheError::Network(format!(
                "网络请求 {} 返回 HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ShellCacheError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batched_store_writes_every_entry_in_one_transaction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.redb");
        let cache = ShellCache::open(&path, ShellManifest::default()).unwrap();

        let entries = vec![
            ("/".to_string(), b"index".to_vec()),
            ("/app.js".to_string(), b"js".to_vec()),
            ("/styles.css".to_string(), b"css".to_vec()),
        ];
        cache.store_all(&entries).unwrap();

        for (asset, bytes) in &entries {
            assert_eq!(
                cache.get_cached(asset).unwrap().as_deref(),
                Some(bytes.as_slice())
            );
        }
    }

    #[test]
    fn api_patterns_match_known_endpoints() {
        assert!(is_api_request(
            "https://translation.googleapis.com/language/translate/v2?key=x"
        ));
        assert!(is_api_request("http://localhost:5000/translate"));
        assert!(is_api_request("http://localhost:5000/detect"));
        assert!(is_api_request("https://en.wiktionary.org/api/rest_v1/page/definition/cat"));
        assert!(!is_api_request("http://localhost:7080/styles.css"));
        assert!(!is_api_request("http://localhost:7080/index.html"));
    }
}
