use clap::Parser;
use std::path::{Path, PathBuf};

use motor_pump_toolbox::{app, config, i18n, pump::catalog};

/// 커맨드라인 옵션.
#[derive(Debug, Parser)]
#[command(name = "motor_pump_toolbox", version, about = "전동기/펌프 현장 계산 도구")]
struct Cli {
    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 외부 펌프 카탈로그 TOML 경로 (없으면 설정 또는 내장 카탈로그)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

/// 프로그램의 엔트리 포인트. 설정과 카탈로그를 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, None);

    let catalog = match cli.catalog.as_deref() {
        Some(path) => catalog::load_from_path(path)?,
        None => match cfg.catalog_path.as_deref() {
            Some(p) => catalog::load_from_path(Path::new(p))?,
            None => catalog::built_in()?,
        },
    };

    app::run(&mut cfg, &tr, &catalog)?;
    Ok(())
}
