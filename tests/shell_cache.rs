//! 离线壳缓存集成测试
//!
//! 使用临时 redb 文件验证缓存优先服务、API 模式绕过、
//! 激活时的旧版本清理和安装的 fail-closed 语义。
//! 所有网络端点都指向不可达地址，网络访问必然失败。

use trilang::shell::{FetchStrategy, ShellCache, ShellCacheState, ShellManifest};

/// 不可达的来源地址，保证任何网络访问都失败
const DEAD_ORIGIN: &str = "http://127.0.0.1:1";

fn manifest(version: &str) -> ShellManifest {
    ShellManifest {
        version: version.to_string(),
        origin: DEAD_ORIGIN.to_string(),
        assets: vec!["/".to_string(), "/index.html".to_string()],
    }
}

/// 已缓存的静态资源离线可用
#[tokio::test]
async fn cached_assets_are_served_without_network() {
    let dir = tempfile::tempdir().expect("创建临时目录");
    let path = dir.path().join("shell.redb");

    let cache = ShellCache::open(&path, manifest("v1")).expect("打开缓存");
    cache.store("/index.html", b"<html>hello</html>").expect("写入资源");

    let bytes = cache
        .serve("/index.html")
        .await
        .expect("缓存命中时不应访问网络");
    assert_eq!(bytes, b"<html>hello</html>");
    assert_eq!(cache.stats().hits, 1);
}

/// 缓存未命中时回源；来源不可达则失败
#[tokio::test]
async fn cache_miss_falls_through_to_network() {
    let dir = tempfile::tempdir().expect("创建临时目录");
    let path = dir.path().join("shell.redb");

    let cache = ShellCache::open(&path, manifest("v1")).expect("打开缓存");

    let result = cache.serve("/missing.css").await;
    assert!(result.is_err(), "来源不可达时未命中应当失败");
    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().hits, 0);
}

/// API 模式匹配优先于缓存优先：即使同一路径有缓存条目也直连网络
#[tokio::test]
async fn api_patterns_bypass_cache_even_when_cached() {
    let dir = tempfile::tempdir().expect("创建临时目录");
    let path = dir.path().join("shell.redb");

    let cache = ShellCache::open(&path, manifest("v1")).expect("打开缓存");

    // 人为制造一个与 API 模式同路径的缓存条目
    cache.store("/translate", b"stale translation").expect("写入资源");
    assert_eq!(cache.route("/translate"), FetchStrategy::NetworkOnly);

    let result = cache.handle("/translate").await;
    assert!(
        result.is_err(),
        "API 请求必须直连网络，不得返回缓存的陈旧内容"
    );

    // 静态资源路径仍然走缓存
    cache.store("/styles.css", b"body{}").expect("写入资源");
    assert_eq!(cache.route("/styles.css"), FetchStrategy::CacheFirst);
    let bytes = cache.handle("/styles.css").await.expect("静态资源缓存命中");
    assert_eq!(bytes, b"body{}");
}

/// 激活清除版本不匹配的旧条目，新版本条目保留
#[tokio::test]
async fn activation_purges_entries_from_other_versions() {
    let dir = tempfile::tempdir().expect("创建临时目录");
    let path = dir.path().join("shell.redb");

    {
        let old = ShellCache::open(&path, manifest("v1")).expect("打开缓存");
        old.store("/", b"old index").expect("写入资源");
        old.store("/app.js", b"old js").expect("写入资源");
    }

    let new = ShellCache::open(&path, manifest("v2")).expect("重新打开缓存");
    assert_eq!(new.state(), ShellCacheState::Installing);

    new.store("/", b"new index").expect("写入资源");

    let evicted = new.activate().expect("激活缓存");
    assert_eq!(evicted, 2, "两个 v1 条目应当被清除");
    assert_eq!(new.state(), ShellCacheState::Active);
    assert_eq!(new.stats().evictions, 2);

    // 新版本条目完好
    let bytes = new.get_cached("/").expect("读取缓存");
    assert_eq!(bytes.as_deref(), Some(&b"new index"[..]));

    // 旧版本条目在旧版本视角下也已消失
    drop(new);
    let old_again = ShellCache::open(&path, manifest("v1")).expect("再次打开缓存");
    assert_eq!(old_again.get_cached("/app.js").expect("读取缓存"), None);
}

/// 没有旧条目时激活是无操作
#[tokio::test]
async fn activation_on_fresh_database_evicts_nothing() {
    let dir = tempfile::tempdir().expect("创建临时目录");
    let path = dir.path().join("shell.redb");

    let cache = ShellCache::open(&path, manifest("v1")).expect("打开缓存");
    let evicted = cache.activate().expect("激活缓存");
    assert_eq!(evicted, 0);
    assert_eq!(cache.state(), ShellCacheState::Active);
}

/// 多个资源的写入整体可见：逐个读取都能命中
#[tokio::test]
async fn stored_assets_are_individually_retrievable() {
    let dir = tempfile::tempdir().expect("创建临时目录");
    let path = dir.path().join("shell.redb");

    let cache = ShellCache::open(&path, manifest("v1")).expect("打开缓存");
    let assets: &[(&str, &[u8])] = &[
        ("/", b"index"),
        ("/index.html", b"index"),
        ("/styles.css", b"body{}"),
    ];
    for (asset, bytes) in assets.iter().copied() {
        cache.store(asset, bytes).expect("写入资源");
    }

    for (asset, bytes) in assets.iter().copied() {
        assert_eq!(
            cache.get_cached(asset).expect("读取缓存").as_deref(),
            Some(bytes)
        );
    }
}

/// 安装 fail-closed：任何资源获取失败都不写入任何条目
#[tokio::test]
async fn failed_install_writes_no_entries() {
    let dir = tempfile::tempdir().expect("创建临时目录");
    let path = dir.path().join("shell.redb");

    let cache = ShellCache::open(&path, manifest("v1")).expect("打开缓存");

    let result = cache.install().await;
    assert!(result.is_err(), "来源不可达时安装应当失败");

    for asset in &["/", "/index.html"] {
        assert_eq!(
            cache.get_cached(asset).expect("读取缓存"),
            None,
            "失败的安装不应留下部分条目"
        );
    }
}
