use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const LABEL_TEMPERATURE: &str = "input.temperature";
    pub const LABEL_PRESSURE: &str = "input.pressure";
    pub const BUTTON_CALCULATE: &str = "input.calculate";
    pub const BUTTON_RESET: &str = "input.reset";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_ENTHALPY: &str = "result.enthalpy";
    pub const RESULT_PRESSURE_USED: &str = "result.pressure_used";
    pub const RESULT_METHOD: &str = "result.method";
    pub const RESULT_BRACKET: &str = "result.bracket";
    pub const RESULT_IF97: &str = "result.if97";
    pub const METHOD_EXACT: &str = "method.exact";
    pub const METHOD_INTERPOLATED: &str = "method.interpolated";
    pub const NOTICE_NEAREST_PRESSURE: &str = "notice.nearest_pressure";

    pub const STATS_HEADING: &str = "stats.heading";
    pub const STATS_COUNT: &str = "stats.count";
    pub const STATS_AVERAGE: &str = "stats.average";
    pub const STATS_NO_DATA: &str = "stats.no_data";

    pub const CHART_HEADING: &str = "chart.heading";
    pub const CHART_EMPTY: &str = "chart.empty";
    pub const CHART_X_AXIS: &str = "chart.x_axis";
    pub const RESET_DONE: &str = "reset.done";
    pub const CONFIG_NOT_SAVED: &str = "config.not_saved";

    pub const LEVELS_HEADING: &str = "levels.heading";
    pub const LEVELS_ROW: &str = "levels.row";

    pub const INTERACTIVE_HELP: &str = "interactive.help";
    pub const PROMPT_QUERY: &str = "interactive.prompt";
    pub const INVALID_QUERY: &str = "interactive.invalid_query";
    pub const HISTORY_ROW: &str = "interactive.history_row";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 내장 언어 문자열을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "증기 비엔탈피 계산기",
        LABEL_TEMPERATURE => "온도",
        LABEL_PRESSURE => "압력",
        BUTTON_CALCULATE => "계산",
        BUTTON_RESET => "초기화",
        RESULT_HEADING => "계산 결과",
        RESULT_ENTHALPY => "비엔탈피",
        RESULT_PRESSURE_USED => "사용 압력 단계",
        RESULT_METHOD => "계산 방식",
        RESULT_BRACKET => "보간 구간: {t1}~{t2} °C / {h1}~{h2} kJ/kg",
        RESULT_IF97 => "IF97 기준값: {h} kJ/kg (편차 {d}%)",
        METHOD_EXACT => "표 값 일치",
        METHOD_INTERPOLATED => "선형 보간",
        NOTICE_NEAREST_PRESSURE => {
            "요청 압력 {requested} 대신 가장 가까운 압력 단계 {used} kgf/cm²G 를 사용했습니다."
        }
        STATS_HEADING => "통계",
        STATS_COUNT => "계산 횟수",
        STATS_AVERAGE => "평균 비엔탈피",
        STATS_NO_DATA => "데이터 없음",
        CHART_HEADING => "비엔탈피 추이",
        CHART_EMPTY => "아직 계산 기록이 없습니다. 온도와 압력을 입력해 계산하세요.",
        CHART_X_AXIS => "계산 순번",
        RESET_DONE => "기록을 초기화했습니다.",
        CONFIG_NOT_SAVED => "설정 파일을 읽지 못해 단위 변경을 저장하지 않습니다: {error}",
        LEVELS_HEADING => "압력 단계 목록",
        LEVELS_ROW => "{p} kgf/cm²G: {min}~{max} °C (샘플 {n}개)",
        INTERACTIVE_HELP => "'<온도> <압력>' 입력 | stats | history | reset | quit",
        PROMPT_QUERY => "> ",
        INVALID_QUERY => "입력 형식: <온도> <압력>",
        HISTORY_ROW => "#{seq}  {t} °C, {p} kgf/cm²G -> {h}",
        _ => "(missing text)",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Steam Enthalpy Estimator",
        LABEL_TEMPERATURE => "Temperature",
        LABEL_PRESSURE => "Pressure",
        BUTTON_CALCULATE => "Calculate",
        BUTTON_RESET => "Reset",
        RESULT_HEADING => "Result",
        RESULT_ENTHALPY => "Specific enthalpy",
        RESULT_PRESSURE_USED => "Pressure level used",
        RESULT_METHOD => "Method",
        RESULT_BRACKET => "Bracket: {t1}~{t2} °C / {h1}~{h2} kJ/kg",
        RESULT_IF97 => "IF97 reference: {h} kJ/kg (deviation {d}%)",
        METHOD_EXACT => "exact table value",
        METHOD_INTERPOLATED => "linear interpolation",
        NOTICE_NEAREST_PRESSURE => {
            "Requested pressure {requested} is not tabulated; used nearest level {used} kgf/cm²G."
        }
        STATS_HEADING => "Statistics",
        STATS_COUNT => "Calculations",
        STATS_AVERAGE => "Average enthalpy",
        STATS_NO_DATA => "no data",
        CHART_HEADING => "Enthalpy trend",
        CHART_EMPTY => "No calculations yet. Enter a temperature and pressure.",
        CHART_X_AXIS => "Calculation #",
        RESET_DONE => "History cleared.",
        CONFIG_NOT_SAVED => "Config file could not be read; unit changes are not saved: {error}",
        LEVELS_HEADING => "Pressure levels",
        LEVELS_ROW => "{p} kgf/cm²G: {min}~{max} °C ({n} samples)",
        INTERACTIVE_HELP => "enter '<temperature> <pressure>' | stats | history | reset | quit",
        PROMPT_QUERY => "> ",
        INVALID_QUERY => "Expected: <temperature> <pressure>",
        HISTORY_ROW => "#{seq}  {t} °C, {p} kgf/cm²G -> {h}",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("en-US"), Some("ko")), "en");
        assert_eq!(resolve_language(Some("auto"), Some("ko-KR")), "ko");
    }

    #[test]
    fn fills_placeholders() {
        let tr = Translator::new("en");
        let s = tr.fill(
            keys::LEVELS_ROW,
            &[
                ("p", "10".into()),
                ("min", "200".into()),
                ("max", "600".into()),
                ("n", "9".into()),
            ],
        );
        assert_eq!(s, "10 kgf/cm²G: 200~600 °C (9 samples)");
    }

    #[test]
    fn unknown_language_falls_back_to_korean() {
        let tr = Translator::new("xx");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::BUTTON_RESET), "초기화");
    }
}
