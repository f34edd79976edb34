//! Web 服务器主程序入口

#[cfg(feature = "web")]
use trilang::env::EnvVar;
#[cfg(feature = "web")]
use trilang::translation::config::ConfigManager;
#[cfg(feature = "web")]
use trilang::web::{WebConfig, WebServer};

#[cfg(feature = "web")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志：RUST_LOG 优先，否则使用 TRILANG_LOG_LEVEL
    let log_level = trilang::env::core::LogLevel::get().unwrap_or_else(|_| "info".to_string());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();

    let mut web_config = WebConfig::default();

    // 简单的命令行参数解析
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    web_config.bind_addr = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    web_config.port = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: Invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--cache-path" => {
                if i + 1 < args.len() {
                    web_config.cache_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --cache-path requires a file path");
                    std::process::exit(1);
                }
            }
            "--no-shell" => {
                web_config.cache_path = None;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    web_config.validate()?;

    // 加载应用配置（配置文件 + .env + 环境变量覆盖）
    let config_manager = ConfigManager::new()?;
    let app_config = config_manager.get_config().clone();

    // 启动 Web 服务器
    let server = WebServer::new(web_config, app_config);
    server.start().await?;

    Ok(())
}

#[cfg(feature = "web")]
fn print_help() {
    println!("Trilang Web Server");
    println!();
    println!("USAGE:");
    println!("    trilang-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>       Bind address [default: 127.0.0.1]");
    println!("    -p, --port <PORT>          Port number [default: 7080]");
    println!("        --cache-path <FILE>    Shell cache database file [default: trilang-shell.redb]");
    println!("        --no-shell             Disable the offline shell cache");
    println!("    -h, --help                 Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    trilang-web");
    println!("    trilang-web --bind 0.0.0.0 --port 3000");
    println!("    trilang-web --no-shell");
}

#[cfg(not(feature = "web"))]
fn main() {
    eprintln!("Error: Web feature not enabled. Please compile with --features web");
    std::process::exit(1);
}
