use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use tfs_search_core::{parse_args, search_and_report, usage, ClientConfig, RunContext, TfsHttpClient};
use tracing::{error, info};

/// 命令行入口：`tfs-search <搜索词> [/F:] [/T:] [/P:] [/R:] [/O:] [/S:]`
///
/// 所有路径都以退出码 0 结束；出错时打印错误与原因链，之后等待按键。
fn main() {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();

    let args: Vec<String> = std::env::args_os().skip(1).map(|a| a.to_string_lossy().into_owned()).collect();
    let opts = match parse_args(&args) {
        Ok(o) => o,
        Err(e) => {
            // 用法错误：只打印用法，不连接服务器，也不等待按键
            info!(reason = %e, "usage error");
            println!("{}", usage());
            return;
        }
    };

    match run(&opts) {
        Ok(()) => println!("Completed.\t(Press any key to continue)"),
        Err(e) => {
            error!(error = %e, "search failed");
            print_error(&e);
            println!("\t(Press any key to continue)");
        }
    }
    wait_for_key();
}

fn run(opts: &tfs_search_core::SearchOptions) -> Result<()> {
    let config = ClientConfig::load().context("load configuration")?;
    let client = TfsHttpClient::new(&opts.server, &config).context("create TFS client")?;
    info!(collection = client.collection_url(), "connecting");

    let ctx = RunContext {
        machine: config.machine_name(),
        show_progress: console::user_attended_stderr(),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let stats = search_and_report(opts, &client, &ctx, &mut out)?;
    out.flush().ok();

    info!(files_scanned = stats.files_scanned, matches = stats.matches, "done");
    Ok(())
}

/// 打印错误消息、原因链与（若已捕获）回溯
fn print_error(err: &anyhow::Error) {
    println!("{err}");
    for cause in err.chain().skip(1) {
        println!("  caused by: {cause}");
    }
    let bt = err.backtrace();
    if bt.status() == std::backtrace::BacktraceStatus::Captured {
        println!("{bt}");
    }
}

/// 仅在交互终端中等待按键
fn wait_for_key() {
    if !std::io::stdin().is_terminal() || !console::user_attended() { return; }
    let _ = console::Term::stdout().read_key();
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，避免与 stdout 上的结果混在一起
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
