use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::motor::insulation::InsulationError;
use crate::motor::voltage_unbalance::UnbalanceError;
use crate::pump::catalog::Catalog;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 절연저항 분석 오류
    Insulation(InsulationError),
    /// 전압 불평형 계산 오류
    Unbalance(UnbalanceError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Insulation(e) => write!(f, "절연저항 분석 오류: {e}"),
            AppError::Unbalance(e) => write!(f, "전압 불평형 계산 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<InsulationError> for AppError {
    fn from(value: InsulationError) -> Self {
        AppError::Insulation(value)
    }
}

impl From<UnbalanceError> for AppError {
    fn from(value: UnbalanceError) -> Self {
        AppError::Unbalance(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator, catalog: &Catalog) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::PumpSelection => ui_cli::handle_pump_selection(tr, catalog)?,
            MenuChoice::Insulation => ui_cli::handle_insulation(tr)?,
            MenuChoice::Unbalance => ui_cli::handle_unbalance(tr)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
