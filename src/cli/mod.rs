use anyhow::Result;
use console::style;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::config::ServiceConfig;
use crate::core::lifecycle::LifecycleManager;
use crate::core::manager::RelayEngine;
use crate::core::platform::PlatformGateway;
use crate::core::terminal::{self, print_error, print_info, print_status, print_success, print_warn};
use crate::interfaces::web::ApiServer;
use crate::store::{SessionStore, memory::MemoryStore, supabase::SupabaseStore};
use crate::telegram::TelegramGateway;

fn print_help() {
    terminal::print_banner();

    println!(" {}", style("Commands").bold());
    println!(
        "   {}   Run the relay engine and HTTP API (default)",
        style("serve").green().bold()
    );
    println!(
        "   {} Print the package version",
        style("version").green().bold()
    );
    println!("   {}    Show this help", style("help").green().bold());

    println!("\n {}", style("serve flags").bold());
    println!("   {}  Override the API bind host", style("--api-host <host>").cyan());
    println!("   {}  Override the API bind port", style("--api-port <port>").cyan());
    println!(
        "   {}              In-memory store with a demo session, no external collaborators",
        style("--dev").cyan()
    );

    println!(
        "\n {} {} <command> [flags]\n",
        style("Usage:").bold(),
        style("telefwd").green()
    );
}

pub async fn run_main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("serve") => serve(&args).await,
        Some("version") | Some("--version") | Some("-V") => {
            println!("telefwd {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some("help") | Some("--help") | Some("-h") => {
            print_help();
            Ok(())
        }
        Some(other) => {
            print_error(&format!("Unknown command: {other}"));
            print_help();
            Ok(())
        }
    }
}

async fn serve(args: &[String]) -> Result<()> {
    let mut config = ServiceConfig::from_env();
    let mut dev_mode = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--api-port" => {
                if i + 1 < args.len() {
                    config.api_port = args[i + 1].parse().unwrap_or(config.api_port);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--api-host" => {
                if i + 1 < args.len() {
                    config.api_host = args[i + 1].clone();
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--dev" => {
                dev_mode = true;
                i += 1;
            }
            _ => i += 1,
        }
    }

    let (log_tx, _) = tokio::sync::broadcast::channel::<String>(500);
    crate::logging::init(log_tx.clone());

    terminal::print_banner();
    print_status("API", &format!("http://{}:{}", config.api_host, config.api_port));
    print_status(
        "Poll interval",
        &format!("{}s", config.relay.poll_interval.as_secs()),
    );
    print_status("Dedup window", &format!("{} messages", config.relay.dedup_window));

    let store: Option<Arc<dyn SessionStore>> = if dev_mode {
        print_status("Store", "in-memory (dev)");
        Some(Arc::new(MemoryStore::with_demo_session()))
    } else {
        match (&config.store_url, &config.store_key) {
            (Some(url), Some(key)) => {
                print_status("Store", url);
                Some(Arc::new(SupabaseStore::new(
                    url,
                    key,
                    config.relay.call_timeout,
                )?))
            }
            _ => {
                print_warn("Missing store credentials (SUPABASE_URL / SUPABASE_KEY); relay and CRUD will idle.");
                None
            }
        }
    };

    let gateway: Option<Arc<dyn PlatformGateway>> = if dev_mode {
        print_info("Dev mode: forwarding gateway disabled, HTTP surface only.");
        None
    } else {
        match &config.gateway_url {
            Some(url) => {
                print_status("Gateway", url);
                Some(Arc::new(TelegramGateway::new(url, config.relay.call_timeout)?))
            }
            None => {
                print_warn("Missing TELEFWD_GATEWAY_URL; message forwarding disabled.");
                None
            }
        }
    };

    let mut lifecycle = LifecycleManager::new();
    lifecycle.attach(Arc::new(Mutex::new(ApiServer::new(
        store.clone(),
        log_tx.clone(),
        config.api_host.clone(),
        config.api_port,
    ))));
    lifecycle.attach(Arc::new(Mutex::new(RelayEngine::new(
        store,
        gateway,
        config.relay.clone(),
    ))));

    lifecycle.start().await?;
    print_success("telefwd is up. Press Ctrl-C to stop.");

    tokio::signal::ctrl_c().await?;
    lifecycle.shutdown().await
}
