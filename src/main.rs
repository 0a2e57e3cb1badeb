use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use steam_enthalpy_toolbox::{
    app::{AppError, Calculator},
    config::{self, Config},
    i18n::{self, keys, Translator},
    logging,
    steam::ReferenceTable,
    ui_cli,
    units::{PressureUnit, SpecificEnthalpyUnit, TemperatureUnit},
};

#[derive(Parser)]
#[command(name = "steam_enthalpy_cli", version, about = "증기 비엔탈피 계산기 (표 보간)")]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 내장 증기표 대신 사용할 TOML 기준 표
    #[arg(long)]
    table: Option<PathBuf>,
    /// 언어(auto/ko/en)
    #[arg(long, short = 'L')]
    lang: Option<String>,
    /// 입력 온도 단위
    #[arg(long, value_enum, global = true)]
    temperature_unit: Option<TemperatureUnit>,
    /// 입력 압력 단위
    #[arg(long, value_enum, global = true)]
    pressure_unit: Option<PressureUnit>,
    /// 출력 비엔탈피 단위
    #[arg(long, value_enum, global = true)]
    enthalpy_unit: Option<SpecificEnthalpyUnit>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 온도/압력으로 비엔탈피를 한 번 계산한다
    Estimate {
        #[arg(long, short = 't', allow_negative_numbers = true)]
        temperature: f64,
        #[arg(long, short = 'p', allow_negative_numbers = true)]
        pressure: f64,
    },
    /// 압력 단계와 온도 범위를 보여준다
    Levels,
    /// 여러 번 계산하며 기록/통계를 확인한다
    Interactive,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 명령을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    // 설정 로드 실패는 로깅과 번역기를 기본값으로 준비한 뒤 오류로 보고한다.
    let (cfg, load_err) = match Config::load_or_create(&cli.config) {
        Ok(cfg) => (cfg, None),
        Err(err) => (Config::default(), Some(AppError::from(err))),
    };
    logging::init(&cfg.log_filter);
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
    let tr = Translator::new(&lang);
    let result = match load_err {
        Some(err) => {
            tracing::error!(path = %cli.config.display(), error = %err, "설정 로드 실패");
            Err(err)
        }
        None => try_run(cli, cfg, &tr),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli, mut cfg: Config, tr: &Translator) -> Result<(), AppError> {
    if let Some(table) = cli.table {
        cfg.table_path = Some(table);
    }
    if let Some(unit) = cli.temperature_unit {
        cfg.units.temperature = unit;
    }
    if let Some(unit) = cli.pressure_unit {
        cfg.units.pressure = unit;
    }
    if let Some(unit) = cli.enthalpy_unit {
        cfg.units.specific_enthalpy = unit;
    }
    let mut calc = Calculator::from_config(&cfg)?;
    match cli.command {
        Commands::Estimate {
            temperature,
            pressure,
        } => {
            let result = ui_cli::calculate_in_units(&mut calc, &cfg.units, temperature, pressure)?;
            for line in ui_cli::format_calculation(tr, &result, &cfg.units) {
                println!("{line}");
            }
        }
        Commands::Levels => print_levels(tr, calc.table()),
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            ui_cli::run_interactive(tr, &mut calc, &cfg.units, stdin.lock(), &mut stdout)?;
        }
    }
    Ok(())
}

fn print_levels(tr: &Translator, table: &ReferenceTable) {
    for line in ui_cli::format_levels(tr, table) {
        println!("{line}");
    }
}
