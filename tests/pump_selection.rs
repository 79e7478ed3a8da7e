//! 펌프 기종 선정 엔진 회귀 테스트. 95PR08 성능표를 기준으로 한다.
use motor_pump_toolbox::pump::catalog::{Brand, PumpModel, PumpSeries};
use motor_pump_toolbox::pump::selection::{
    select_for_series, select_pumps, DutyPoint, NoMatchReason, SelectionOutcome,
};

fn model(name: &str, power: &str, pressures: Vec<f64>) -> PumpModel {
    PumpModel {
        name: name.to_string(),
        power_rating: power.to_string(),
        pressures,
    }
}

fn series(name: &str, min_flow: f64, max_flow: f64, breakpoints: Vec<f64>, models: Vec<PumpModel>) -> PumpSeries {
    PumpSeries {
        name: name.to_string(),
        flow_unit: None,
        pressure_unit: None,
        min_flow,
        max_flow,
        flow_breakpoints: breakpoints,
        models,
    }
}

fn series_95pr08() -> PumpSeries {
    series(
        "95PR08",
        0.0,
        0.7,
        vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
        vec![
            model("95PR0806", "0.6", vec![51.0, 48.0, 45.0, 42.0, 38.0, 33.0, 28.0]),
            model("95PR0809", "0.9", vec![72.0, 70.0, 68.0, 64.0, 59.0, 53.0, 46.0]),
            model("95PR0815", "1.5", vec![111.0, 107.0, 102.0, 96.0, 89.0, 81.0, 72.0]),
        ],
    )
}

fn expect_match(outcome: &SelectionOutcome, name: &str, flow: f64, pressure: f64) {
    match outcome {
        SelectionOutcome::Match {
            model,
            delivered_flow,
            delivered_pressure,
        } => {
            assert_eq!(model.name, name);
            assert!((delivered_flow - flow).abs() < 1e-12, "flow={delivered_flow}");
            assert!(
                (delivered_pressure - pressure).abs() < 1e-12,
                "pressure={delivered_pressure}"
            );
        }
        SelectionOutcome::NoMatch(reason) => panic!("expected match, got {reason:?}"),
    }
}

fn expect_no_match(outcome: &SelectionOutcome, reason: NoMatchReason) {
    match outcome {
        SelectionOutcome::NoMatch(r) => assert_eq!(*r, reason),
        SelectionOutcome::Match { model, .. } => {
            panic!("expected no match, got {}", model.name)
        }
    }
}

#[test]
fn ceiling_match_picks_next_tabulated_flow() {
    // 요구 0.25 → 기준점 0.3, 0806은 45(<60) 탈락, 0809가 68로 선정
    let s = series_95pr08();
    let outcome = select_for_series(&s, DutyPoint { flow: 0.25, pressure: 60.0 });
    expect_match(&outcome, "95PR0809", 0.3, 68.0);
}

#[test]
fn flow_above_envelope_is_rejected() {
    let s = series_95pr08();
    let outcome = select_for_series(&s, DutyPoint { flow: 0.8, pressure: 10.0 });
    expect_no_match(&outcome, NoMatchReason::FlowOutOfEnvelope);
}

#[test]
fn unreachable_pressure_reports_no_qualifying_model() {
    let s = series_95pr08();
    let outcome = select_for_series(&s, DutyPoint { flow: 0.1, pressure: 1000.0 });
    expect_no_match(&outcome, NoMatchReason::NoQualifyingModel);
}

#[test]
fn exact_last_breakpoint_matches() {
    let s = series_95pr08();
    let outcome = select_for_series(&s, DutyPoint { flow: 0.7, pressure: 20.0 });
    expect_match(&outcome, "95PR0806", 0.7, 28.0);
}

#[test]
fn flow_below_first_breakpoint_rounds_up() {
    // 운전 범위 [0, 0.7] 안이지만 최소 기준점 0.1보다 작은 요구 유량
    let s = series_95pr08();
    let outcome = select_for_series(&s, DutyPoint { flow: 0.05, pressure: 10.0 });
    expect_match(&outcome, "95PR0806", 0.1, 51.0);
}

#[test]
fn flow_past_largest_breakpoint_falls_back_to_last() {
    // 운전 범위가 기준점 테이블보다 넓은 시리즈: 0.75는 범위 안, 기준점 밖
    let mut s = series_95pr08();
    s.max_flow = 0.8;
    let outcome = select_for_series(&s, DutyPoint { flow: 0.75, pressure: 20.0 });
    expect_match(&outcome, "95PR0806", 0.7, 28.0);
}

#[test]
fn first_listed_adequate_model_wins() {
    // 뒤 기종의 여유가 더 작아도 기재 순서가 앞선 적합 기종을 고른다
    let s = series(
        "ORDER",
        0.0,
        1.0,
        vec![0.5, 1.0],
        vec![
            model("BIG", "2.2", vec![100.0, 90.0]),
            model("SNUG", "0.4", vec![56.0, 40.0]),
        ],
    );
    let outcome = select_for_series(&s, DutyPoint { flow: 0.5, pressure: 55.0 });
    expect_match(&outcome, "BIG", 0.5, 100.0);
}

#[test]
fn short_pressure_array_is_skipped_not_fatal() {
    // 기준점 4개인데 양정이 2개뿐인 결함 기종은 건너뛰고 다음 기종을 평가한다
    let s = series(
        "DEFECT",
        0.0,
        4.0,
        vec![1.0, 2.0, 3.0, 4.0],
        vec![
            model("SHORT", "1.5", vec![50.0, 45.0]),
            model("FULL", "2.2", vec![70.0, 65.0, 58.0, 50.0]),
        ],
    );
    let outcome = select_for_series(&s, DutyPoint { flow: 3.0, pressure: 40.0 });
    expect_match(&outcome, "FULL", 3.0, 58.0);

    // 결함 기종만 있으면 시리즈는 사유 있는 탈락으로 끝난다
    let only_short = series(
        "DEFECT2",
        0.0,
        4.0,
        vec![1.0, 2.0, 3.0, 4.0],
        vec![model("SHORT", "1.5", vec![50.0, 45.0])],
    );
    let outcome = select_for_series(&only_short, DutyPoint { flow: 3.0, pressure: 40.0 });
    expect_no_match(&outcome, NoMatchReason::NoQualifyingModel);
}

#[test]
fn empty_breakpoint_table_reports_no_tabulated_flow() {
    let s = series("EMPTY", 0.0, 1.0, vec![], vec![]);
    let outcome = select_for_series(&s, DutyPoint { flow: 0.5, pressure: 10.0 });
    expect_no_match(&outcome, NoMatchReason::NoTabulatedFlow);
}

#[test]
fn every_series_yields_an_outcome_in_brand_order() {
    let brand = Brand {
        name: "Hanil".to_string(),
        default_flow_unit: "m3/min".to_string(),
        default_pressure_unit: "m".to_string(),
        series: vec![
            series("NARROW", 0.5, 0.6, vec![0.5, 0.6], vec![model("N1", "0.4", vec![30.0, 25.0])]),
            series_95pr08(),
            series("EMPTY", 0.0, 1.0, vec![], vec![]),
        ],
    };
    let results = select_pumps(&brand, DutyPoint { flow: 0.25, pressure: 60.0 });

    assert_eq!(results.len(), brand.series.len());
    assert_eq!(results[0].series.name, "NARROW");
    assert_eq!(results[1].series.name, "95PR08");
    assert_eq!(results[2].series.name, "EMPTY");

    expect_no_match(&results[0].outcome, NoMatchReason::FlowOutOfEnvelope);
    expect_match(&results[1].outcome, "95PR0809", 0.3, 68.0);
    expect_no_match(&results[2].outcome, NoMatchReason::NoTabulatedFlow);
}

#[test]
fn repeated_calls_are_deterministic() {
    let brand = Brand {
        name: "Hanil".to_string(),
        default_flow_unit: "m3/min".to_string(),
        default_pressure_unit: "m".to_string(),
        series: vec![series_95pr08()],
    };
    let duty = DutyPoint { flow: 0.25, pressure: 60.0 };
    let first = format!("{:?}", select_pumps(&brand, duty));
    for _ in 0..10 {
        assert_eq!(format!("{:?}", select_pumps(&brand, duty)), first);
    }
}
