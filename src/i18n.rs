use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_PUMP_SELECTION: &str = "main_menu.pump_selection";
    pub const MAIN_MENU_INSULATION: &str = "main_menu.insulation";
    pub const MAIN_MENU_UNBALANCE: &str = "main_menu.unbalance";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_POSITIVE_REQUIRED: &str = "error.positive_required";

    pub const PUMP_HEADING: &str = "pump.heading";
    pub const PUMP_BRAND_LIST: &str = "pump.brand_list";
    pub const PUMP_PROMPT_BRAND: &str = "pump.prompt_brand";
    pub const PUMP_BRAND_UNKNOWN: &str = "pump.brand_unknown";
    pub const PUMP_PROMPT_FLOW: &str = "pump.prompt_flow";
    pub const PUMP_PROMPT_PRESSURE: &str = "pump.prompt_pressure";
    pub const PUMP_RESULT_HEADING: &str = "pump.result_heading";
    pub const PUMP_REASON_ENVELOPE: &str = "pump.reason_envelope";
    pub const PUMP_REASON_NO_BREAKPOINTS: &str = "pump.reason_no_breakpoints";
    pub const PUMP_REASON_PRESSURE: &str = "pump.reason_pressure";

    pub const INSUL_HEADING: &str = "insulation.heading";
    pub const INSUL_PROMPT_R30: &str = "insulation.prompt_r30";
    pub const INSUL_PROMPT_R60: &str = "insulation.prompt_r60";
    pub const INSUL_PROMPT_R600: &str = "insulation.prompt_r600";
    pub const INSUL_PROMPT_TEMP: &str = "insulation.prompt_temp";
    pub const INSUL_PROMPT_VOLTAGE: &str = "insulation.prompt_voltage";
    pub const INSUL_RESULT_DAR: &str = "insulation.result_dar";
    pub const INSUL_RESULT_PI: &str = "insulation.result_pi";
    pub const INSUL_RESULT_CORRECTED: &str = "insulation.result_corrected";
    pub const INSUL_RESULT_MIN_IR: &str = "insulation.result_min_ir";

    pub const BAND_DANGER: &str = "band.danger";
    pub const BAND_QUESTIONABLE: &str = "band.questionable";
    pub const BAND_ACCEPTABLE: &str = "band.acceptable";
    pub const BAND_EXCELLENT: &str = "band.excellent";

    pub const UNBAL_HEADING: &str = "unbalance.heading";
    pub const UNBAL_PROMPT_VAB: &str = "unbalance.prompt_vab";
    pub const UNBAL_PROMPT_VBC: &str = "unbalance.prompt_vbc";
    pub const UNBAL_PROMPT_VCA: &str = "unbalance.prompt_vca";
    pub const UNBAL_PROMPT_POWER: &str = "unbalance.prompt_power";
    pub const UNBAL_RESULT_MEAN: &str = "unbalance.result_mean";
    pub const UNBAL_RESULT_UNBALANCE: &str = "unbalance.result_unbalance";
    pub const UNBAL_RESULT_FACTOR: &str = "unbalance.result_factor";
    pub const UNBAL_RESULT_DERATED: &str = "unbalance.result_derated";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
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

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" => Some("en".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
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

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en" | "en-us" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko" | "ko-kr" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Motor & Pump Engineering Toolbox ===",
        MAIN_MENU_PUMP_SELECTION => "1) 펌프 기종 선정",
        MAIN_MENU_INSULATION => "2) 절연저항 PI/DAR 분석",
        MAIN_MENU_UNBALANCE => "3) 전압 불평형/출력 보정",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_POSITIVE_REQUIRED => "0보다 큰 값을 입력하세요.",
        PUMP_HEADING => "\n-- 펌프 기종 선정 --",
        PUMP_BRAND_LIST => "등록된 브랜드:",
        PUMP_PROMPT_BRAND => "브랜드 이름: ",
        PUMP_BRAND_UNKNOWN => "등록되지 않은 브랜드입니다.",
        PUMP_PROMPT_FLOW => "요구 유량: ",
        PUMP_PROMPT_PRESSURE => "요구 양정: ",
        PUMP_RESULT_HEADING => "시리즈별 선정 결과:",
        PUMP_REASON_ENVELOPE => "요구 유량이 운전 범위를 벗어났습니다.",
        PUMP_REASON_NO_BREAKPOINTS => "카탈로그에 유량 기준점이 없습니다.",
        PUMP_REASON_PRESSURE => "해당 유량에서 요구 양정을 만족하는 기종이 없습니다.",
        INSUL_HEADING => "\n-- 절연저항 PI/DAR 분석 --",
        INSUL_PROMPT_R30 => "30초 절연저항 [MΩ]: ",
        INSUL_PROMPT_R60 => "1분(60초) 절연저항 [MΩ]: ",
        INSUL_PROMPT_R600 => "10분 절연저항 [MΩ]: ",
        INSUL_PROMPT_TEMP => "권선 온도 [°C] (건너뛰려면 엔터): ",
        INSUL_PROMPT_VOLTAGE => "정격 전압 [V] (건너뛰려면 엔터): ",
        INSUL_RESULT_DAR => "DAR (R60s/R30s):",
        INSUL_RESULT_PI => "PI (R10min/R1min):",
        INSUL_RESULT_CORRECTED => "40°C 보정 1분값:",
        INSUL_RESULT_MIN_IR => "권장 최소 절연저항:",
        BAND_DANGER => "위험",
        BAND_QUESTIONABLE => "주의",
        BAND_ACCEPTABLE => "양호",
        BAND_EXCELLENT => "우수",
        UNBAL_HEADING => "\n-- 전압 불평형/출력 보정 --",
        UNBAL_PROMPT_VAB => "선간전압 Vab [V]: ",
        UNBAL_PROMPT_VBC => "선간전압 Vbc [V]: ",
        UNBAL_PROMPT_VCA => "선간전압 Vca [V]: ",
        UNBAL_PROMPT_POWER => "정격 출력 [kW] (건너뛰려면 엔터): ",
        UNBAL_RESULT_MEAN => "평균 전압:",
        UNBAL_RESULT_UNBALANCE => "불평형률:",
        UNBAL_RESULT_FACTOR => "보정 계수 Fr:",
        UNBAL_RESULT_DERATED => "보정 출력:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 한국어  2) English",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어 설정이 변경되었습니다:",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Motor & Pump Engineering Toolbox ===",
        MAIN_MENU_PUMP_SELECTION => "1) Pump Model Selection",
        MAIN_MENU_INSULATION => "2) Insulation Resistance PI/DAR",
        MAIN_MENU_UNBALANCE => "3) Voltage Unbalance & Derating",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_POSITIVE_REQUIRED => "Please enter a value greater than 0.",
        PUMP_HEADING => "\n-- Pump Model Selection --",
        PUMP_BRAND_LIST => "Registered brands:",
        PUMP_PROMPT_BRAND => "Brand name: ",
        PUMP_BRAND_UNKNOWN => "Unknown brand.",
        PUMP_PROMPT_FLOW => "Required flow: ",
        PUMP_PROMPT_PRESSURE => "Required head: ",
        PUMP_RESULT_HEADING => "Selection result per series:",
        PUMP_REASON_ENVELOPE => "Required flow is outside the operating envelope.",
        PUMP_REASON_NO_BREAKPOINTS => "No tabulated flow points in the catalog.",
        PUMP_REASON_PRESSURE => "No model meets the required head at the matched flow.",
        INSUL_HEADING => "\n-- Insulation Resistance PI/DAR --",
        INSUL_PROMPT_R30 => "IR at 30 s [MΩ]: ",
        INSUL_PROMPT_R60 => "IR at 1 min (60 s) [MΩ]: ",
        INSUL_PROMPT_R600 => "IR at 10 min [MΩ]: ",
        INSUL_PROMPT_TEMP => "Winding temperature [°C] (enter to skip): ",
        INSUL_PROMPT_VOLTAGE => "Rated voltage [V] (enter to skip): ",
        INSUL_RESULT_DAR => "DAR (R60s/R30s):",
        INSUL_RESULT_PI => "PI (R10min/R1min):",
        INSUL_RESULT_CORRECTED => "1-min IR corrected to 40°C:",
        INSUL_RESULT_MIN_IR => "Recommended minimum IR:",
        BAND_DANGER => "danger",
        BAND_QUESTIONABLE => "questionable",
        BAND_ACCEPTABLE => "acceptable",
        BAND_EXCELLENT => "excellent",
        UNBAL_HEADING => "\n-- Voltage Unbalance & Derating --",
        UNBAL_PROMPT_VAB => "Line voltage Vab [V]: ",
        UNBAL_PROMPT_VBC => "Line voltage Vbc [V]: ",
        UNBAL_PROMPT_VCA => "Line voltage Vca [V]: ",
        UNBAL_PROMPT_POWER => "Rated power [kW] (enter to skip): ",
        UNBAL_RESULT_MEAN => "Mean voltage:",
        UNBAL_RESULT_UNBALANCE => "Unbalance:",
        UNBAL_RESULT_FACTOR => "Derating factor Fr:",
        UNBAL_RESULT_DERATED => "Derated power:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) 한국어  2) English",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        _ => return None,
    })
}
