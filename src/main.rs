use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wrap_locale::memory::{MemoryAdapter, MemoryContainer, MemoryWrap};
use wrap_locale::{
    prefix_identifier, split_locale_fields, LocalizedWrap, Payload, SaveEvent, WrapLocaleOptions,
};

#[derive(Parser)]
#[command(name = "wrap_locale")]
#[command(about = "给记录标识符加语言前缀，或从标识符中拆出语言和路径")]
#[command(version = "0.1.0")]
struct Cli {
    /// 插件配置JSON文件路径
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 给标识符加上语言前缀
    Prefix {
        /// 当前语言，例如 de-ch
        #[arg(short, long)]
        locale: String,

        /// 标识符
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// 从标识符中拆出语言字段和路径字段
    Split {
        /// 标识符
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// 在内存宿主上演示完整的加载/保存流程
    Demo {
        /// 当前语言
        #[arg(short, long)]
        locale: String,

        /// 容器标识符
        #[arg(long, default_value = "home")]
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    let options = load_options(cli.options.as_ref())?;

    match &cli.command {
        Command::Prefix { locale, ids } => handle_prefix(locale, ids),
        Command::Split { ids } => handle_split(&options, ids),
        Command::Demo { locale, id } => handle_demo(options, locale, id),
    }
}

/// 初始化日志（RUST_LOG 优先）
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 读取插件配置，未指定时使用默认值
fn load_options(path: Option<&PathBuf>) -> anyhow::Result<WrapLocaleOptions> {
    let Some(path) = path else {
        return Ok(WrapLocaleOptions::default());
    };

    WrapLocaleOptions::from_json_file(path)
        .with_context(|| format!("读取配置文件失败: {:?}", path))
}

/// 处理前缀模式
fn handle_prefix(locale: &str, ids: &[String]) -> anyhow::Result<()> {
    for id in ids {
        println!("{}", prefix_identifier(id, Some(locale)));
    }
    Ok(())
}

/// 处理拆分模式，每个标识符输出一行JSON
fn handle_split(options: &WrapLocaleOptions, ids: &[String]) -> anyhow::Result<()> {
    let pattern = options.compile_pattern()?;

    for id in ids {
        let mut payload = Payload::new();
        split_locale_fields(&pattern, options, SaveEvent::new(id, &mut payload));
        println!("{}", serde_json::to_string(&payload)?);
    }
    Ok(())
}

/// 处理演示模式：设置语言、加载、保存，然后输出适配器中存储的记录
fn handle_demo(options: WrapLocaleOptions, locale: &str, id: &str) -> anyhow::Result<()> {
    let wrap = MemoryWrap::new()
        .with_container(MemoryContainer::new(id).with_adapter(MemoryAdapter::new("demo", "record")));
    let mut wrap = LocalizedWrap::new(wrap, options)?;

    wrap.set_locale(Some(locale));
    wrap.inner_mut().load();
    wrap.inner_mut().save(&Payload::new());

    let adapter = wrap
        .inner()
        .container(0)
        .and_then(|container| container.adapter())
        .context("演示容器没有适配器")?;

    println!("{}", serde_json::to_string_pretty(adapter.records())?);
    Ok(())
}
