use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::motor::{insulation, voltage_unbalance};
use crate::pump::catalog::Catalog;
use crate::pump::selection::{self, DutyPoint, NoMatchReason, SelectionOutcome};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    PumpSelection,
    Insulation,
    Unbalance,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_PUMP_SELECTION));
    println!("{}", tr.t(keys::MAIN_MENU_INSULATION));
    println!("{}", tr.t(keys::MAIN_MENU_UNBALANCE));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::PumpSelection),
            "2" => return Ok(MenuChoice::Insulation),
            "3" => return Ok(MenuChoice::Unbalance),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 펌프 기종 선정 메뉴를 처리한다.
///
/// 요구 운전점은 엔진 호출 전에 여기서 검증한다(양수·유한). 엔진은 검증된
/// 입력을 전제로 한다.
pub fn handle_pump_selection(tr: &Translator, catalog: &Catalog) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PUMP_HEADING));
    println!("{}", tr.t(keys::PUMP_BRAND_LIST));
    for brand in &catalog.brands {
        println!("  - {}", brand.name);
    }
    let brand = loop {
        let name = read_line(tr.t(keys::PUMP_PROMPT_BRAND))?;
        match catalog.find_brand(name.trim()) {
            Some(b) => break b,
            None => println!("{}", tr.t(keys::PUMP_BRAND_UNKNOWN)),
        }
    };
    let flow = read_positive_f64(tr, tr.t(keys::PUMP_PROMPT_FLOW))?;
    let pressure = read_positive_f64(tr, tr.t(keys::PUMP_PROMPT_PRESSURE))?;

    let results = selection::select_pumps(brand, DutyPoint { flow, pressure });
    println!("{}", tr.t(keys::PUMP_RESULT_HEADING));
    for sel in &results {
        match &sel.outcome {
            SelectionOutcome::Match {
                model,
                delivered_flow,
                delivered_pressure,
            } => {
                println!(
                    "  {}: {} ({}) / {:.3} {} @ {:.1} {}",
                    sel.series.name,
                    model.name,
                    model.power_rating,
                    delivered_flow,
                    brand.flow_unit_of(sel.series),
                    delivered_pressure,
                    brand.pressure_unit_of(sel.series),
                );
            }
            SelectionOutcome::NoMatch(reason) => {
                println!("  {}: {}", sel.series.name, reason_text(tr, *reason));
            }
        }
    }
    Ok(())
}

fn reason_text(tr: &Translator, reason: NoMatchReason) -> &'static str {
    match reason {
        NoMatchReason::FlowOutOfEnvelope => tr.t(keys::PUMP_REASON_ENVELOPE),
        NoMatchReason::NoTabulatedFlow => tr.t(keys::PUMP_REASON_NO_BREAKPOINTS),
        NoMatchReason::NoQualifyingModel => tr.t(keys::PUMP_REASON_PRESSURE),
    }
}

/// 절연저항 PI/DAR 메뉴를 처리한다.
pub fn handle_insulation(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::INSUL_HEADING));
    let r_30s = read_positive_f64(tr, tr.t(keys::INSUL_PROMPT_R30))?;
    let r_1min = read_positive_f64(tr, tr.t(keys::INSUL_PROMPT_R60))?;
    let r_10min = read_positive_f64(tr, tr.t(keys::INSUL_PROMPT_R600))?;
    let temp = read_optional_f64(tr, tr.t(keys::INSUL_PROMPT_TEMP))?;
    let voltage = read_optional_f64(tr, tr.t(keys::INSUL_PROMPT_VOLTAGE))?.filter(|v| *v > 0.0);

    let res = insulation::analyze(insulation::InsulationInput {
        r_30s_mohm: r_30s,
        r_1min_mohm: r_1min,
        r_10min_mohm: r_10min,
        winding_temp_c: temp,
        rated_voltage_v: voltage,
    })?;

    println!(
        "{} {:.2} ({})",
        tr.t(keys::INSUL_RESULT_DAR),
        res.dar,
        band_text(tr, res.dar_band)
    );
    println!(
        "{} {:.2} ({})",
        tr.t(keys::INSUL_RESULT_PI),
        res.pi,
        band_text(tr, res.pi_band)
    );
    if let Some(rc) = res.r_1min_corrected_mohm {
        println!("{} {:.1} MΩ", tr.t(keys::INSUL_RESULT_CORRECTED), rc);
    }
    if let Some(min) = res.min_recommended_mohm {
        println!("{} {:.1} MΩ", tr.t(keys::INSUL_RESULT_MIN_IR), min);
    }
    for w in &res.warnings {
        println!("  - {w}");
    }
    Ok(())
}

fn band_text(tr: &Translator, band: insulation::InsulationBand) -> &'static str {
    match band {
        insulation::InsulationBand::Danger => tr.t(keys::BAND_DANGER),
        insulation::InsulationBand::Questionable => tr.t(keys::BAND_QUESTIONABLE),
        insulation::InsulationBand::Acceptable => tr.t(keys::BAND_ACCEPTABLE),
        insulation::InsulationBand::Excellent => tr.t(keys::BAND_EXCELLENT),
    }
}

/// 전압 불평형/출력 보정 메뉴를 처리한다.
pub fn handle_unbalance(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNBAL_HEADING));
    let v_ab = read_positive_f64(tr, tr.t(keys::UNBAL_PROMPT_VAB))?;
    let v_bc = read_positive_f64(tr, tr.t(keys::UNBAL_PROMPT_VBC))?;
    let v_ca = read_positive_f64(tr, tr.t(keys::UNBAL_PROMPT_VCA))?;
    let power = read_optional_f64(tr, tr.t(keys::UNBAL_PROMPT_POWER))?.filter(|v| *v > 0.0);

    let res = voltage_unbalance::evaluate(voltage_unbalance::UnbalanceInput {
        v_ab,
        v_bc,
        v_ca,
        rated_power_kw: power,
    })?;

    println!("{} {:.1} V", tr.t(keys::UNBAL_RESULT_MEAN), res.mean_voltage);
    println!(
        "{} {:.2} %",
        tr.t(keys::UNBAL_RESULT_UNBALANCE),
        res.unbalance_pct
    );
    println!(
        "{} {:.3}",
        tr.t(keys::UNBAL_RESULT_FACTOR),
        res.derating_factor
    );
    if let Some(kw) = res.derated_power_kw {
        println!("{} {:.2} kW", tr.t(keys::UNBAL_RESULT_DERATED), kw);
    }
    for w in &res.warnings {
        println!("  - {w}");
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    let lang = match sel.trim() {
        "1" => "ko",
        "2" => "en",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    cfg.language = lang.to_string();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

/// 양수이고 유한한 값을 받을 때까지 반복한다.
fn read_positive_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) if v > 0.0 && v.is_finite() => return Ok(v),
            Ok(_) => println!("{}", tr.t(keys::ERROR_POSITIVE_REQUIRED)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력이면 None, 아니면 유한한 값을 받을 때까지 반복한다.
fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        if s.trim().is_empty() {
            return Ok(None);
        }
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(Some(v)),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
