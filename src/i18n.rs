// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 注意: 引擎输出一律走 t_in(显式 locale)，不依赖全局 locale，
//       同一输入在任意线程下得到同一文本
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "en";

/// 已提供翻译文件的语言
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(normalize_locale(locale));
}

/// 规范化语言代码，不支持的语言回退到默认语言
pub fn normalize_locale(locale: &str) -> &'static str {
    let trimmed = locale.trim();
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| l.eq_ignore_ascii_case(trimmed))
        .unwrap_or(DEFAULT_LOCALE)
}

/// 翻译消息（带参数，使用全局语言）
///
/// # 示例
/// ```no_run
/// use rail_rake_aps::i18n::t_with_args;
/// let msg = t_with_args("report.total_penalty", &[("amount", "1000")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key).to_string(), args)
}

/// 翻译消息（显式语言 + 参数）
pub fn t_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let locale = normalize_locale(locale);
    fill_args(rust_i18n::t!(key, locale = locale).to_string(), args)
}

fn fill_args(mut result: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 数值展示: 整数不带小数位，其余保留两位
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
