use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 펌프 카탈로그 데이터 모델과 TOML 로더.
///
/// 카탈로그는 기동 시 한 번 로드되는 정적 데이터이며 런타임에 변경되지 않는다.
/// 시리즈/기종 테이블의 형식 불변식(기준점 오름차순, 압력 배열 길이 일치 등)은
/// 로드 시점에 검증한다. 선정 엔진은 별도로 인덱스 범위를 방어한다.

/// 한 시리즈 안의 개별 펌프 기종.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PumpModel {
    pub name: String,
    /// 출력 표기(예: "1.5" HP). 자유 형식 문자열이며 숫자로 해석하지 않는다.
    pub power_rating: String,
    /// 시리즈의 flow_breakpoints와 인덱스 단위로 정렬된 최대 양정 값.
    pub pressures: Vec<f64>,
}

impl PumpModel {
    /// 기준점 인덱스의 양정 값을 돌려준다. 배열이 짧으면 None.
    pub fn pressure_at(&self, index: usize) -> Option<f64> {
        self.pressures.get(index).copied()
    }
}

/// 하나의 제품 라인. 기준점(유량 컬럼) 테이블을 기종들이 공유한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PumpSeries {
    pub name: String,
    /// 표시용 단위. 브랜드 기본값을 덮어쓸 때만 기재한다. 환산하지 않는다.
    #[serde(default)]
    pub flow_unit: Option<String>,
    #[serde(default)]
    pub pressure_unit: Option<String>,
    /// 운전 범위(양 끝 포함). 기준점 테이블과는 독립이다.
    pub min_flow: f64,
    pub max_flow: f64,
    /// 순증가 유량 기준점. 길이 1 이상.
    pub flow_breakpoints: Vec<f64>,
    /// 카탈로그 순서 = 선호 순서(통상 저출력부터 기재).
    pub models: Vec<PumpModel>,
}

/// 브랜드 하나. 시리즈 이름은 브랜드 안에서 유일하다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub default_flow_unit: String,
    pub default_pressure_unit: String,
    pub series: Vec<PumpSeries>,
}

impl Brand {
    /// 시리즈의 표시용 유량 단위. 시리즈에 지정이 없으면 브랜드 기본값.
    pub fn flow_unit_of<'a>(&'a self, series: &'a PumpSeries) -> &'a str {
        series.flow_unit.as_deref().unwrap_or(&self.default_flow_unit)
    }

    pub fn pressure_unit_of<'a>(&'a self, series: &'a PumpSeries) -> &'a str {
        series
            .pressure_unit
            .as_deref()
            .unwrap_or(&self.default_pressure_unit)
    }
}

/// 여러 브랜드를 담는 카탈로그 루트.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub brands: Vec<Brand>,
}

impl Catalog {
    /// 브랜드 이름으로 찾는다. 대소문자를 구분하지 않는다.
    pub fn find_brand(&self, name: &str) -> Option<&Brand> {
        self.brands
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }
}

/// 카탈로그 로드/검증 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum CatalogError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 파싱 오류
    Parse(toml::de::Error),
    /// 형식 불변식 위반(위치와 사유)
    Invalid(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "카탈로그 파일 입출력 오류: {e}"),
            CatalogError::Parse(e) => write!(f, "카탈로그 파싱 오류: {e}"),
            CatalogError::Invalid(msg) => write!(f, "카탈로그 형식 오류: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(value: std::io::Error) -> Self {
        CatalogError::Io(value)
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(value: toml::de::Error) -> Self {
        CatalogError::Parse(value)
    }
}

/// TOML 문자열을 파싱하고 불변식을 검증한다.
pub fn parse_catalog(src: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = toml::from_str(src)?;
    validate(&catalog)?;
    Ok(catalog)
}

/// 외부 카탈로그 파일을 로드한다.
pub fn load_from_path(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// 빌드에 포함된 기본 카탈로그를 로드한다.
pub fn built_in() -> Result<Catalog, CatalogError> {
    parse_catalog(include_str!("../../catalogs/default.toml"))
}

fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    if catalog.brands.is_empty() {
        return Err(CatalogError::Invalid("브랜드가 하나도 없습니다".into()));
    }
    for brand in &catalog.brands {
        if brand.name.trim().is_empty() {
            return Err(CatalogError::Invalid("브랜드 이름이 비어 있습니다".into()));
        }
        for (i, series) in brand.series.iter().enumerate() {
            validate_series(&brand.name, series)?;
            if brand.series[..i]
                .iter()
                .any(|s| s.name.eq_ignore_ascii_case(&series.name))
            {
                return Err(CatalogError::Invalid(format!(
                    "{}: 시리즈 이름 {} 이(가) 중복됩니다",
                    brand.name, series.name
                )));
            }
        }
    }
    Ok(())
}

fn validate_series(brand: &str, series: &PumpSeries) -> Result<(), CatalogError> {
    let at = |msg: String| CatalogError::Invalid(format!("{}/{}: {}", brand, series.name, msg));

    if series.name.trim().is_empty() {
        return Err(CatalogError::Invalid(format!(
            "{brand}: 시리즈 이름이 비어 있습니다"
        )));
    }
    if !(series.min_flow <= series.max_flow) {
        return Err(at("운전 범위 min_flow가 max_flow보다 큽니다".into()));
    }
    if series.flow_breakpoints.is_empty() {
        return Err(at("유량 기준점이 비어 있습니다".into()));
    }
    for pair in series.flow_breakpoints.windows(2) {
        if !(pair[0] < pair[1]) {
            return Err(at(format!(
                "유량 기준점은 순증가여야 합니다 ({} -> {})",
                pair[0], pair[1]
            )));
        }
    }
    for model in &series.models {
        if model.name.trim().is_empty() {
            return Err(at("기종 이름이 비어 있습니다".into()));
        }
        if model.pressures.len() != series.flow_breakpoints.len() {
            return Err(at(format!(
                "기종 {} 의 양정 배열 길이 {} 이(가) 기준점 수 {} 과 다릅니다",
                model.name,
                model.pressures.len(),
                series.flow_breakpoints.len()
            )));
        }
    }
    Ok(())
}
