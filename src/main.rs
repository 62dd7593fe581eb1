// ==========================================
// 铁路装车编组计划 - 命令行入口
// ==========================================
// 用法:
//   rail-rake-aps [request.json] [--json] [--log-json] [--locale <en|zh-CN>]
//
// 未给出文件时从 stdin 读取请求; --json 输出完整 JSON 响应
// --locale 仅在请求未指定语言时生效
// 请求未指定 reference_time 时以当前时刻补齐
// 退出码: 0 = 计划有效, 2 = 存在硬约束违规
// ==========================================

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use rail_rake_aps::{logging, ConstraintConfigLoader, ValidationApi, ValidationRequest};

fn main() -> anyhow::Result<ExitCode> {
    let mut json_output = false;
    let mut json_logs = false;
    let mut locale: Option<String> = None;
    let mut request_path: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json_output = true,
            "--log-json" => json_logs = true,
            "--locale" => {
                locale = Some(args.next().context("--locale 缺少语言参数")?);
            }
            _ if request_path.is_none() => request_path = Some(arg),
            _ => anyhow::bail!("多余的参数: {}", arg),
        }
    }

    if json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    let raw = match &request_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("无法读取请求文件: {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("无法从 stdin 读取请求")?;
            buf
        }
    };

    tracing::info!("{} v{}", rail_rake_aps::APP_NAME, rail_rake_aps::VERSION);

    // 站点默认约束
    let loader = ConstraintConfigLoader::from_default_location();
    tracing::info!("约束配置文件: {}", loader.path().display());
    let site_constraints = loader.load().context("加载站点约束配置失败")?;

    let mut value: serde_json::Value = serde_json::from_str(&raw).context("请求 JSON 解析失败")?;
    // 请求未携带参考时间时取当前时刻 (整个进程只取一次)
    if let Some(fields) = value.as_object_mut() {
        if fields.get("reference_time").map_or(true, |v| v.is_null()) {
            let now = chrono::Utc::now();
            tracing::info!(reference_time = %now, "请求未指定参考时间, 使用当前时刻");
            fields.insert("reference_time".to_string(), serde_json::json!(now));
        }
    }
    let mut request: ValidationRequest =
        serde_json::from_value(value).context("请求 JSON 解析失败")?;
    if request.locale.is_none() {
        request.locale = locale;
    }

    let api = ValidationApi::with_default_constraints(site_constraints);
    let response = api.validate(request)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.summary);
        for suggestion in &response.suggestions {
            println!("  ↳ {}", suggestion.impact);
        }
    }

    Ok(if response.result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
