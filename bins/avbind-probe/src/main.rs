//! avbind-probe - 绑定层信息查询工具
//!
//! 类似 `ffmpeg -codecs` / `-filters` / `-muxers` 的查询入口, 另外可以猜测输出格式、
//! 用码流解析器切分原始基本流.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

use avbind::Library;
use avbind::codec::{Codec, CodecCatalog, CodecId, NOPTS_VALUE, iter_codecs};
use avbind::core::Rational;
use avbind::filter::{Filter, FilterFlags, FilterPad, iter_filters};
use avbind::format::{OutputFormat, iter_muxers};
use avbind::logging::LoggingConfig;

/// avbind 信息查询工具
#[derive(Parser, Debug)]
#[command(name = "avbind-probe", version, about = "FFmpeg 风格绑定层信息查询工具")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// 输出 JSON 格式
    #[arg(long, global = true)]
    json: bool,

    /// 日志详细程度 (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// 同时把日志写入该目录
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 列出编解码器
    Codecs {
        /// 只列出解码器
        #[arg(long, conflicts_with = "encoders")]
        decoders: bool,
        /// 只列出编码器
        #[arg(long)]
        encoders: bool,
        /// 只列出硬件实现
        #[arg(long)]
        hardware: bool,
    },
    /// 显示单个编解码器的详细信息
    Codec {
        /// 编解码器名称
        name: String,
        /// 按编码器查找 (默认按解码器)
        #[arg(long)]
        encoder: bool,
    },
    /// 列出滤镜
    Filters,
    /// 列出封装器
    Formats,
    /// 猜测输出格式
    Guess {
        /// 短名称
        #[arg(long)]
        name: Option<String>,
        /// 文件名
        #[arg(long)]
        file: Option<String>,
        /// MIME 类型
        #[arg(long)]
        mime: Option<String>,
    },
    /// 用码流解析器切分原始基本流文件
    Parse {
        /// 编解码器名称, 如 "aac", "h264"
        codec: String,
        /// 输入文件
        input: PathBuf,
        /// 每次送入解析器的字节数
        #[arg(long, default_value_t = 4096)]
        chunk_size: usize,
        /// 逐个列出编码单元
        #[arg(long)]
        show_packets: bool,
    },
    /// 解析并化简有理数, 如 "30000/1001"
    Rational {
        /// 有理数表达式
        value: String,
    },
}

// ============================================================
// JSON 输出结构体
// ============================================================

/// 编解码器摘要
#[derive(Serialize)]
struct CodecInfo {
    name: &'static str,
    long_name: &'static str,
    codec_id: &'static str,
    kind: &'static str,
    media_type: &'static str,
    hardware: bool,
    experimental: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    wrapper_name: Option<&'static str>,
}

/// 编解码器详细信息
#[derive(Serialize)]
struct CodecDetail {
    #[serde(flatten)]
    summary: CodecInfo,
    capabilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pixel_formats: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_formats: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_rates: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame_rates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel_layouts: Option<Vec<String>>,
    profiles: Vec<&'static str>,
    hw_configs: Vec<HwConfigInfo>,
}

#[derive(Serialize)]
struct HwConfigInfo {
    device_type: &'static str,
    pixel_format: &'static str,
    device_ctx: bool,
}

/// 滤镜信息
#[derive(Serialize)]
struct FilterInfo {
    name: &'static str,
    description: &'static str,
    inputs: Vec<PadInfo>,
    outputs: Vec<PadInfo>,
    dynamic_inputs: bool,
    dynamic_outputs: bool,
    source: bool,
    sink: bool,
}

#[derive(Serialize)]
struct PadInfo {
    name: &'static str,
    media_type: &'static str,
}

/// 封装器信息
#[derive(Serialize)]
struct FormatInfo {
    name: &'static str,
    long_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<&'static str>,
    extensions: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_codec: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    video_codec: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle_codec: Option<&'static str>,
    global_header: bool,
    needs_file: bool,
}

/// 单个编码单元
#[derive(Serialize)]
struct PacketInfo {
    index: usize,
    size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pos: Option<i64>,
    keyframe: bool,
}

/// 切分结果
#[derive(Serialize)]
struct ParseSummary {
    codec: &'static str,
    input_bytes: u64,
    total_packets: usize,
    total_bytes: u64,
    keyframes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    packets: Option<Vec<PacketInfo>>,
}

#[derive(Serialize)]
struct RationalInfo {
    input: String,
    num: i32,
    den: i32,
    reduced: String,
    value: f64,
}

// ============================================================
// 主逻辑
// ============================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let Some(command) = &cli.command else {
        print_banner();
        return Ok(());
    };

    let lib = Library::builtin();
    match command {
        Command::Codecs {
            decoders,
            encoders,
            hardware,
        } => {
            let list: Vec<CodecInfo> = iter_codecs(lib.codecs())
                .filter(|c| !decoders || c.is_decoder())
                .filter(|c| !encoders || c.is_encoder())
                .filter(|c| !hardware || c.is_hardware())
                .map(codec_info)
                .collect();
            if cli.json {
                print_json(&list)?;
            } else {
                for c in &list {
                    println!(
                        " {}{}{}{} {:<20} {}",
                        if c.kind == "decoder" { 'D' } else { '.' },
                        if c.kind == "encoder" { 'E' } else { '.' },
                        media_letter(c.media_type),
                        if c.hardware { 'H' } else { '.' },
                        c.name,
                        c.long_name
                    );
                }
            }
        }
        Command::Codec { name, encoder } => {
            let codec = if *encoder {
                lib.codecs().find_encoder_by_name(name)
            } else {
                lib.codecs().find_decoder_by_name(name)
            };
            let codec = codec.with_context(|| {
                format!("未找到{}: {name}", if *encoder { "编码器" } else { "解码器" })
            })?;
            let detail = codec_detail(codec);
            if cli.json {
                print_json(&detail)?;
            } else {
                print_codec_detail(&detail);
            }
        }
        Command::Filters => {
            let list: Vec<FilterInfo> = iter_filters(lib.filters()).map(filter_info).collect();
            if cli.json {
                print_json(&list)?;
            } else {
                for f in iter_filters(lib.filters()) {
                    println!(
                        " {} {:<16} {:>8} {}",
                        if f.flags().intersects(FilterFlags::SUPPORT_TIMELINE) {
                            'T'
                        } else {
                            '.'
                        },
                        f.name(),
                        io_signature(&f),
                        f.description()
                    );
                }
            }
        }
        Command::Formats => {
            let list: Vec<FormatInfo> = iter_muxers(lib.formats()).map(format_info).collect();
            if cli.json {
                print_json(&list)?;
            } else {
                for f in &list {
                    println!(" E {:<12} {:<20} {}", f.name, f.extensions.join(","), f.long_name);
                }
            }
        }
        Command::Guess { name, file, mime } => {
            let fmt = lib
                .formats()
                .guess_format(name.as_deref(), file.as_deref(), mime.as_deref())
                .context("无法猜测输出格式")?;
            if cli.json {
                print_json(&format_info(fmt))?;
            } else {
                println!("{} ({})", fmt.name(), fmt.long_name());
            }
        }
        Command::Parse {
            codec,
            input,
            chunk_size,
            show_packets,
        } => {
            let summary = parse_file(&lib, codec, input, *chunk_size, *show_packets)?;
            if cli.json {
                print_json(&summary)?;
            } else {
                print_parse_summary(&summary);
            }
        }
        Command::Rational { value } => {
            let r: Rational = value
                .parse()
                .with_context(|| format!("无效的有理数: {value}"))?;
            let info = RationalInfo {
                input: value.clone(),
                num: r.num(),
                den: r.den(),
                reduced: r.reduce().to_string(),
                value: r.to_f64(),
            };
            if cli.json {
                print_json(&info)?;
            } else {
                println!("{} = {} ≈ {}", r, info.reduced, info.value);
            }
        }
    }
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    match &cli.log_dir {
        Some(dir) => avbind::logging::init(LoggingConfig {
            level: level.to_string(),
            directory: dir.to_string_lossy().to_string(),
            file_prefix: "avbind-probe".to_string(),
            ..LoggingConfig::default()
        }),
        None => {
            env_logger::Builder::from_env(
                env_logger::Env::new()
                    .filter_or(avbind::logging::LOG_ENV, level),
            )
            .try_init()
            .context("初始化日志失败")?;
            Ok(())
        }
    }
}

fn print_banner() {
    eprintln!(
        "avbind-probe 版本 {} -- FFmpeg 风格绑定层信息查询工具",
        avbind::version()
    );
    eprintln!("用法: avbind-probe <codecs|codec|filters|formats|guess|parse|rational> [选项]");
    eprintln!("使用 --help 查看详细说明");
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn media_letter(media_type: &str) -> char {
    match media_type {
        "video" => 'V',
        "audio" => 'A',
        "subtitle" => 'S',
        "data" => 'D',
        "attachment" => 'T',
        _ => '?',
    }
}

fn codec_info(codec: Codec) -> CodecInfo {
    CodecInfo {
        name: codec.name(),
        long_name: codec.long_name(),
        codec_id: codec.id().name(),
        kind: if codec.is_encoder() {
            "encoder"
        } else {
            "decoder"
        },
        media_type: codec.media_type().name(),
        hardware: codec.is_hardware(),
        experimental: codec.is_experimental(),
        wrapper_name: codec.wrapper_name(),
    }
}

fn codec_detail(codec: Codec) -> CodecDetail {
    CodecDetail {
        summary: codec_info(codec),
        capabilities: codec
            .capabilities()
            .iter_names()
            .map(|(name, _)| name.to_string())
            .collect(),
        pixel_formats: codec
            .supported_pixel_formats()
            .map(|list| list.iter().map(|f| f.name()).collect()),
        sample_formats: codec
            .supported_sample_formats()
            .map(|list| list.iter().map(|f| f.name()).collect()),
        sample_rates: codec.supported_sample_rates().map(<[u32]>::to_vec),
        frame_rates: codec
            .supported_frame_rates()
            .map(|list| list.iter().map(Rational::to_string).collect()),
        channel_layouts: codec
            .supported_channel_layouts()
            .map(|list| list.iter().map(|l| l.to_string()).collect()),
        profiles: codec.profiles().iter().map(|p| p.name).collect(),
        hw_configs: codec
            .hw_configs()
            .map(|hw| HwConfigInfo {
                device_type: hw.device_type.name(),
                pixel_format: hw.pixel_format.name(),
                device_ctx: hw.supports_device_ctx(),
            })
            .collect(),
    }
}

fn print_codec_detail(detail: &CodecDetail) {
    let s = &detail.summary;
    println!("{} [{}] {}", s.name, s.kind, s.long_name);
    println!("  标识: {} ({})", s.codec_id, s.media_type);
    if let Some(wrapper) = s.wrapper_name {
        println!("  包装库: {wrapper}");
    }
    println!("  能力: {}", detail.capabilities.join(" "));
    let print_list = |label: &str, list: &Option<Vec<String>>| match list {
        Some(items) => println!("  {label}: {}", items.join(" ")),
        None => println!("  {label}: 不限"),
    };
    let to_strings = |list: &Option<Vec<&'static str>>| -> Option<Vec<String>> {
        list.as_ref()
            .map(|items| items.iter().map(|s| s.to_string()).collect())
    };
    match s.media_type {
        "video" => {
            print_list("像素格式", &to_strings(&detail.pixel_formats));
            print_list("帧率", &detail.frame_rates);
        }
        "audio" => {
            print_list("采样格式", &to_strings(&detail.sample_formats));
            let rates: Option<Vec<String>> = detail
                .sample_rates
                .as_ref()
                .map(|r| r.iter().map(u32::to_string).collect());
            print_list("采样率", &rates);
            print_list("声道布局", &detail.channel_layouts);
        }
        _ => {}
    }
    if !detail.profiles.is_empty() {
        println!("  档次: {}", detail.profiles.join(", "));
    }
    for (i, hw) in detail.hw_configs.iter().enumerate() {
        println!(
            "  硬件配置 #{i}: {} / {}{}",
            hw.device_type,
            hw.pixel_format,
            if hw.device_ctx { " (device_ctx)" } else { "" }
        );
    }
}

fn pad_info(pad: &FilterPad) -> PadInfo {
    PadInfo {
        name: pad.name,
        media_type: pad.media_type.name(),
    }
}

fn filter_info(filter: Filter) -> FilterInfo {
    FilterInfo {
        name: filter.name(),
        description: filter.description(),
        inputs: filter.inputs().iter().map(pad_info).collect(),
        outputs: filter.outputs().iter().map(pad_info).collect(),
        dynamic_inputs: filter.flags().contains(FilterFlags::DYNAMIC_INPUTS),
        dynamic_outputs: filter.flags().contains(FilterFlags::DYNAMIC_OUTPUTS),
        source: filter.is_source(),
        sink: filter.is_sink(),
    }
}

/// `ffmpeg -filters` 风格的端口签名, 如 "VV->V", "A->N", "|->V"
fn io_signature(filter: &Filter) -> String {
    let side = |pads: &[FilterPad], dynamic: bool| {
        if dynamic {
            "N".to_string()
        } else if pads.is_empty() {
            "|".to_string()
        } else {
            pads.iter().map(|p| p.media_type.letter()).collect()
        }
    };
    let flags = filter.flags();
    format!(
        "{}->{}",
        side(filter.inputs(), flags.contains(FilterFlags::DYNAMIC_INPUTS)),
        side(filter.outputs(), flags.contains(FilterFlags::DYNAMIC_OUTPUTS))
    )
}

fn format_info(fmt: OutputFormat) -> FormatInfo {
    FormatInfo {
        name: fmt.name(),
        long_name: fmt.long_name(),
        mime_type: fmt.mime_type(),
        extensions: fmt.extensions().to_vec(),
        audio_codec: fmt.audio_codec().map(|id| id.name()),
        video_codec: fmt.video_codec().map(|id| id.name()),
        subtitle_codec: fmt.subtitle_codec().map(|id| id.name()),
        global_header: fmt.is_global_header(),
        needs_file: fmt.needs_file(),
    }
}

fn parse_file(
    lib: &Library,
    codec: &str,
    input: &Path,
    chunk_size: usize,
    show_packets: bool,
) -> Result<ParseSummary> {
    if chunk_size == 0 {
        bail!("chunk-size 必须大于 0");
    }
    let codec_id = CodecId::from_name(codec).with_context(|| format!("未知的编解码器: {codec}"))?;
    let mut parser = lib
        .parser(codec_id)
        .with_context(|| format!("无法创建 {codec} 码流解析器"))?;
    let data = std::fs::read(input)
        .with_context(|| format!("读取输入文件失败: {}", input.display()))?;
    log::debug!("切分 {}: {} 字节, 块大小 {chunk_size}", input.display(), data.len());

    let mut packets = Vec::new();
    for (i, chunk) in data.chunks(chunk_size).enumerate() {
        let pos = (i * chunk_size) as i64;
        packets.extend(parser.split(chunk, NOPTS_VALUE, NOPTS_VALUE, pos)?);
    }
    packets.extend(parser.flush()?);
    parser.close();

    Ok(ParseSummary {
        codec: codec_id.name(),
        input_bytes: data.len() as u64,
        total_packets: packets.len(),
        total_bytes: packets.iter().map(|p| p.size() as u64).sum(),
        keyframes: packets.iter().filter(|p| p.is_keyframe).count(),
        packets: show_packets.then(|| {
            packets
                .iter()
                .enumerate()
                .map(|(index, p)| PacketInfo {
                    index,
                    size: p.size(),
                    pos: (p.pos >= 0).then_some(p.pos),
                    keyframe: p.is_keyframe,
                })
                .collect()
        }),
    })
}

fn print_parse_summary(summary: &ParseSummary) {
    if let Some(packets) = &summary.packets {
        for p in packets {
            let pos = p.pos.map_or_else(|| "N/A".to_string(), |pos| pos.to_string());
            println!(
                "packet #{:<6} size={:<8} pos={:<10} {}",
                p.index,
                p.size,
                pos,
                if p.keyframe { "K" } else { "_" }
            );
        }
    }
    println!(
        "{}: {} 个编码单元, {} 字节 (输入 {} 字节), 关键帧 {}",
        summary.codec,
        summary.total_packets,
        summary.total_bytes,
        summary.input_bytes,
        summary.keyframes
    );
}
