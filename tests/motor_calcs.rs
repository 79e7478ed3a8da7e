//! 절연저항 PI/DAR 분석과 전압 불평형 보정 회귀 테스트.
use motor_pump_toolbox::motor::insulation::{analyze, InsulationBand, InsulationInput};
use motor_pump_toolbox::motor::voltage_unbalance::{evaluate, UnbalanceInput};

fn insulation_input(r_30s: f64, r_1min: f64, r_10min: f64) -> InsulationInput {
    InsulationInput {
        r_30s_mohm: r_30s,
        r_1min_mohm: r_1min,
        r_10min_mohm: r_10min,
        winding_temp_c: None,
        rated_voltage_v: None,
    }
}

#[test]
fn dar_and_pi_reference_point() {
    let res = analyze(insulation_input(100.0, 130.0, 300.0)).expect("analyze");
    assert!((res.dar - 1.3).abs() < 1e-9);
    assert!((res.pi - 300.0 / 130.0).abs() < 1e-9);
    assert_eq!(res.dar_band, InsulationBand::Acceptable);
    assert_eq!(res.pi_band, InsulationBand::Acceptable);
    assert!(res.warnings.is_empty(), "warnings={:?}", res.warnings);
}

#[test]
fn low_pi_is_questionable_and_warns() {
    let res = analyze(insulation_input(100.0, 110.0, 150.0)).expect("analyze");
    assert_eq!(res.pi_band, InsulationBand::Questionable);
    assert!(!res.warnings.is_empty());
}

#[test]
fn decreasing_ten_minute_reading_warns() {
    let res = analyze(insulation_input(100.0, 120.0, 90.0)).expect("analyze");
    assert_eq!(res.pi_band, InsulationBand::Danger);
    assert!(res.warnings.iter().any(|w| w.contains("10분")));
}

#[test]
fn temperature_correction_halves_per_ten_kelvin() {
    let mut input = insulation_input(100.0, 200.0, 500.0);
    input.winding_temp_c = Some(30.0);
    let res = analyze(input).expect("analyze");
    // 40°C 기준 10K 아래 → 0.5배
    let corrected = res.r_1min_corrected_mohm.expect("corrected");
    assert!((corrected - 100.0).abs() < 1e-9);

    let mut at_40 = insulation_input(100.0, 200.0, 500.0);
    at_40.winding_temp_c = Some(40.0);
    let res = analyze(at_40).expect("analyze");
    assert!((res.r_1min_corrected_mohm.expect("corrected") - 200.0).abs() < 1e-9);
}

#[test]
fn minimum_recommended_ir_uses_rated_kilovolts() {
    let mut input = insulation_input(4.0, 5.0, 11.0);
    input.rated_voltage_v = Some(6600.0);
    let res = analyze(input).expect("analyze");
    assert!((res.min_recommended_mohm.expect("min") - 7.6).abs() < 1e-9);
    assert!(res.warnings.iter().any(|w| w.contains("권장 최소값")));
}

#[test]
fn non_positive_reading_is_rejected() {
    assert!(analyze(insulation_input(0.0, 100.0, 200.0)).is_err());
    assert!(analyze(insulation_input(100.0, -1.0, 200.0)).is_err());
}

#[test]
fn balanced_voltages_need_no_derating() {
    let res = evaluate(UnbalanceInput {
        v_ab: 400.0,
        v_bc: 400.0,
        v_ca: 400.0,
        rated_power_kw: Some(11.0),
    })
    .expect("evaluate");
    assert!(res.unbalance_pct.abs() < 1e-9);
    assert!((res.derating_factor - 1.0).abs() < 1e-9);
    assert!((res.derated_power_kw.expect("derated") - 11.0).abs() < 1e-9);
    assert!(!res.clamped);
    assert!(res.warnings.is_empty());
}

#[test]
fn unbalance_interpolates_derating_curve() {
    // 평균 400 V, 최대 편차 10 V → 2.5% → 0.95와 0.88 사이 중간값
    let res = evaluate(UnbalanceInput {
        v_ab: 390.0,
        v_bc: 400.0,
        v_ca: 410.0,
        rated_power_kw: Some(11.0),
    })
    .expect("evaluate");
    assert!((res.mean_voltage - 400.0).abs() < 1e-9);
    assert!((res.unbalance_pct - 2.5).abs() < 1e-9);
    assert!((res.derating_factor - 0.915).abs() < 1e-9);
    assert!((res.derated_power_kw.expect("derated") - 11.0 * 0.915).abs() < 1e-9);
    assert!(!res.warnings.is_empty());
}

#[test]
fn severe_unbalance_clamps_and_warns() {
    // 평균 400 V, 최대 편차 24 V → 6% → 곡선 끝값 0.75로 클램프
    let res = evaluate(UnbalanceInput {
        v_ab: 376.0,
        v_bc: 400.0,
        v_ca: 424.0,
        rated_power_kw: None,
    })
    .expect("evaluate");
    assert!((res.unbalance_pct - 6.0).abs() < 1e-9);
    assert!((res.derating_factor - 0.75).abs() < 1e-9);
    assert!(res.clamped);
    assert!(res.warnings.iter().any(|w| w.contains(">5%")));
    assert!(res.derated_power_kw.is_none());
}

#[test]
fn non_positive_voltage_is_rejected() {
    assert!(evaluate(UnbalanceInput {
        v_ab: 0.0,
        v_bc: 400.0,
        v_ca: 400.0,
        rated_power_kw: None,
    })
    .is_err());
}
