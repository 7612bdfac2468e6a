use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tocforge::{DEFAULT_CONFIG_PATH, ExtractorConfig, MediaCategory, Result, TocError, TocExtractor, TreeConverter};

/// 🧭 TocForge - 高级目录（NCX）处理工具
#[derive(Parser)]
#[command(name = "tocforge")]
#[command(about = "解析高级目录（NCX）并提取测验与媒体条目")]
#[command(version)]
struct Args {
    /// NCX文件或打包文件路径
    #[arg(help = "要处理的NCX文件，或包含NCX的 .zip / .epub 文件")]
    toc_file: String,

    /// 打包文件内的NCX条目
    #[arg(short, long, help = "打包文件内的NCX条目名（默认取第一个 .ncx 条目）")]
    entry: Option<String>,

    /// 配置文件路径
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, help = "提取配置文件路径（YAML），不存在时自动生成")]
    config: String,

    /// 输出格式
    #[arg(long, value_enum, default_value = "yaml", help = "树和条目的输出格式")]
    format: OutputFormat,

    /// 显示完整标签树
    #[arg(short, long, help = "显示整个文档转换后的标签树")]
    tree: bool,

    /// 显示测验条目
    #[arg(short, long, help = "显示识别到的测验条目")]
    quiz: bool,

    /// 显示媒体条目
    #[arg(short, long, help = "显示分类后的媒体条目")]
    media: bool,

    /// 详细输出模式
    #[arg(short, long, help = "显示调试日志")]
    verbose: bool,
}

/// 输出格式
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// YAML格式
    Yaml,
    /// 格式化的JSON
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    println!("🧭 TocForge - 高级目录处理工具");
    println!("正在处理目录文件: {}", args.toc_file);

    match process_toc(&args) {
        Ok(()) => {
            println!("🎉 目录处理完成！");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn process_toc(args: &Args) -> Result<()> {
    let config = ExtractorConfig::load_or_default(&args.config)?;

    let content = tocforge::load_toc_text(&args.toc_file, args.entry.as_deref())?;

    if args.tree {
        println!("\n🌳 标签树:");
        let tree = TreeConverter::parse_to_tree(&content)?;
        print_value(&tree, args.format)?;
    }

    let mut extractor = TocExtractor::new().with_config(config);
    extractor.handle_advanced_toc(&content);

    display_summary(&extractor);

    if args.quiz {
        println!("\n📝 测验条目:");
        match extractor.quiz_item_list() {
            Some(quiz) => print_value(quiz, args.format)?,
            None => println!("  (无)"),
        }
    }

    if args.media {
        println!("\n🎞️  媒体条目:");
        match extractor.categorized_list() {
            Some(media) => print_value(media, args.format)?,
            None => println!("  (无)"),
        }
    }

    Ok(())
}

/// 显示提取结果摘要
fn display_summary(extractor: &TocExtractor) {
    println!("\n📊 提取结果:");

    match extractor.quiz_item_list() {
        Some(quiz) => {
            let id = quiz.get_str("id").unwrap_or("-");
            println!("  测验条目: 已找到 (id: {})", id);
        }
        None => println!("  测验条目: 未找到"),
    }

    match extractor.categorized_list() {
        Some(media) => {
            println!("  媒体条目: 共 {} 个", media.total());
            for category in MediaCategory::ALL {
                println!("    {}: {}", category, media.get(category).len());
            }
        }
        None => println!("  媒体条目: 未找到"),
    }
}

fn print_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Yaml => serde_yml::to_string(value)
            .map_err(|e| TocError::Serialize(e.to_string()))?,
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| TocError::Serialize(e.to_string()))?,
    };
    println!("{}", text);
    Ok(())
}
