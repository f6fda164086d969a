// crates/skill-gate-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: English and Chinese message catalogs for `skill-gate` output.
// Purpose: Route every printed line through one keyed catalog.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Every line the `skill-gate` binary prints goes through the [`t!`](crate::t)
//! macro, keyed into an English and a Chinese catalog. Report bodies and JSON
//! payloads are not translated. A key missing from the Chinese catalog falls
//! back to English, and an unknown key renders as itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Output language of the `skill-gate` binary.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Simplified Chinese.
    Zh,
}

impl Locale {
    /// Parses a `SKILL_GATE_LANG` value such as `zh`, `zh-CN` or `EN_us`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next() {
            Some("en") => Some(Self::En),
            Some("zh") => Some(Self::Zh),
            _ => None,
        }
    }
}

/// Named value substituted into a `{placeholder}` of a catalog template.
pub struct MessageArg {
    /// Placeholder name without braces, such as `path`.
    pub key: &'static str,
    /// Rendered value.
    pub value: String,
}

impl MessageArg {
    /// Pairs a placeholder name with its rendered value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Locale chosen at startup from `--lang` or `SKILL_GATE_LANG`.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Selects the output locale. Later calls are ignored.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the selected locale, English when none was set.
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "skill-gate {version}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("bundle.open_failed", "Failed to open skill bundle: {error}"),
    ("baseline.load_failed", "Failed to load baseline: {error}"),
    ("baseline.save_failed", "Failed to write baseline: {error}"),
    ("baseline.missing", "⚠️  No baseline found. Creating initial baseline..."),
    ("baseline.created", "✅ Baseline created: {path}"),
    ("baseline.updated", "✅ Baseline updated: {path}"),
    ("baseline.run_again", "Run again to compare with baseline."),
    ("results.write_failed", "Failed to write results: {error}"),
    ("report.saved", "Report saved to: {path}"),
    ("check.run_failed", "Check run failed: {error}"),
    ("check.header", "Skill bundle checks: {bundle}"),
    ("check.entry", "[{status}] {check} - {description}"),
    ("check.finding", "    - {subject}: {message}"),
    ("check.skip_note", "    ({note})"),
    ("check.summary", "{passed} passed, {failed} failed, {skipped} skipped"),
    ("check.status.pass", "PASS"),
    ("check.status.fail", "FAIL"),
    ("check.status.skip", "SKIP"),
    ("checks.list.header", "Check catalog ({count} checks):"),
    ("checks.list.entry", "- {check} [{suite}] {description}"),
    ("metrics.collect_failed", "Failed to measure skill bundle: {error}"),
    ("metrics.header", "Metrics for {bundle}:"),
    ("metrics.entry", "- {metric}: {value}"),
    ("audit.open_failed", "Failed to open audit log {path}: {error}"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.json_failed", "Failed to serialize JSON output: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'zh'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Chinese catalog entries.
const CATALOG_ZH: &[(&str, &str)] = &[
    ("main.version", "skill-gate {version}"),
    ("config.load_failed", "加载配置失败：{error}"),
    ("config.validate.ok", "配置有效。"),
    ("bundle.open_failed", "打开技能包失败：{error}"),
    ("baseline.load_failed", "加载基线失败：{error}"),
    ("baseline.save_failed", "写入基线失败：{error}"),
    ("baseline.missing", "⚠️  未找到基线。正在创建初始基线..."),
    ("baseline.created", "✅ 基线已创建：{path}"),
    ("baseline.updated", "✅ 基线已更新：{path}"),
    ("baseline.run_again", "再次运行以与基线比较。"),
    ("results.write_failed", "写入结果失败：{error}"),
    ("report.saved", "报告已保存到：{path}"),
    ("check.run_failed", "检查运行失败：{error}"),
    ("check.header", "技能包检查：{bundle}"),
    ("check.entry", "[{status}] {check} - {description}"),
    ("check.finding", "    - {subject}：{message}"),
    ("check.skip_note", "    （{note}）"),
    ("check.summary", "通过 {passed} 项，失败 {failed} 项，跳过 {skipped} 项"),
    ("check.status.pass", "通过"),
    ("check.status.fail", "失败"),
    ("check.status.skip", "跳过"),
    ("checks.list.header", "检查目录（共 {count} 项）："),
    ("checks.list.entry", "- {check} [{suite}] {description}"),
    ("metrics.collect_failed", "测量技能包失败：{error}"),
    ("metrics.header", "{bundle} 的指标："),
    ("metrics.entry", "- {metric}：{value}"),
    ("audit.open_failed", "打开审计日志 {path} 失败：{error}"),
    ("output.write_failed", "写入 {stream} 失败：{error}"),
    ("output.stream.stdout", "标准输出"),
    ("output.stream.stderr", "标准错误"),
    ("output.stream.unknown", "输出"),
    ("output.json_failed", "序列化 JSON 输出失败：{error}"),
    ("i18n.lang.invalid_env", "{env} 的值无效：{value}。应为 'en' 或 'zh'。"),
    ("i18n.disclaimer.machine_translated", "注意：非英文输出为机器翻译，可能不准确。"),
];

/// Returns the catalog entries of a locale in declaration order.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Zh => CATALOG_ZH,
    }
}

/// Returns the keyed catalog of a locale, built on first use.
fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static EN: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static ZH: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    let map = match locale {
        Locale::En => &EN,
        Locale::Zh => &ZH,
    };
    map.get_or_init(|| catalog_entries_for(locale).iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Renders `key` in the selected locale.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_in(current_locale(), key, args)
}

/// Renders `key` in `locale`, substituting each `{name}` with its argument.
pub(crate) fn translate_in(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .or_else(|| catalog_for(Locale::En).get(key))
        .copied()
        .unwrap_or(key);
    args.into_iter().fold(template.to_string(), |message, arg| {
        message.replace(&format!("{{{}}}", arg.key), &arg.value)
    })
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Renders a catalog message: `t!("report.saved", path = path.display())`.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {
        $crate::i18n::translate(
            $key,
            ::std::vec![$($crate::i18n::MessageArg::new(stringify!($name), $value.to_string())),*],
        )
    };
}
