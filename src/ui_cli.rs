use std::io::{BufRead, Write};

use crate::app::{AppError, Calculation, Calculator};
use crate::config::DefaultUnits;
use crate::i18n::{keys, Translator};
use crate::steam::{HistoryStats, Method, ReferenceTable};
use crate::units::{
    convert_pressure, convert_specific_enthalpy, convert_temperature, PressureUnit,
    SpecificEnthalpyUnit, TemperatureUnit,
};

/// 대화형 모드 한 줄 입력의 해석 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Query { temperature: f64, pressure: f64 },
    Stats,
    History,
    Reset,
    Help,
    Quit,
}

/// 입력 한 줄을 명령으로 해석한다. 빈 줄이나 알 수 없는 입력은 None.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "stats" => return Some(Command::Stats),
        "history" => return Some(Command::History),
        "reset" => return Some(Command::Reset),
        "help" | "?" => return Some(Command::Help),
        "quit" | "exit" | "q" => return Some(Command::Quit),
        _ => {}
    }
    let mut parts = line.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty());
    let temperature = parts.next()?.parse::<f64>().ok()?;
    let pressure = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Command::Query {
        temperature,
        pressure,
    })
}

/// 사용자 단위의 입력을 표 단위(°C, kgf/cm²G)로 바꿔 계산한다.
pub fn calculate_in_units(
    calc: &mut Calculator,
    units: &DefaultUnits,
    temperature: f64,
    pressure: f64,
) -> Result<Calculation, AppError> {
    let t_c = convert_temperature(temperature, units.temperature, TemperatureUnit::Celsius);
    let p_kg = convert_pressure(pressure, units.pressure, PressureUnit::KgPerCm2);
    Ok(calc.calculate(t_c, p_kg)?)
}

fn enthalpy_text(value_kj: f64, unit: SpecificEnthalpyUnit) -> String {
    let v = convert_specific_enthalpy(value_kj, SpecificEnthalpyUnit::KjPerKg, unit);
    format!("{v:.1} {}", unit.symbol())
}

/// 계산 결과를 출력용 문자열 줄로 만든다.
pub fn format_calculation(tr: &Translator, calc: &Calculation, units: &DefaultUnits) -> Vec<String> {
    let est = &calc.estimate;
    let mut lines = vec![
        format!(
            "{}: {}",
            tr.t(keys::RESULT_ENTHALPY),
            enthalpy_text(est.enthalpy, units.specific_enthalpy)
        ),
        format!(
            "{}: {} {}",
            tr.t(keys::RESULT_PRESSURE_USED),
            est.pressure_used,
            PressureUnit::KgPerCm2.symbol()
        ),
    ];
    match est.method {
        Method::Exact => lines.push(format!(
            "{}: {}",
            tr.t(keys::RESULT_METHOD),
            tr.t(keys::METHOD_EXACT)
        )),
        Method::Interpolated(b) => {
            lines.push(format!(
                "{}: {}",
                tr.t(keys::RESULT_METHOD),
                tr.t(keys::METHOD_INTERPOLATED)
            ));
            lines.push(tr.fill(
                keys::RESULT_BRACKET,
                &[
                    ("t1", b.t1.to_string()),
                    ("t2", b.t2.to_string()),
                    ("h1", b.h1.to_string()),
                    ("h2", b.h2.to_string()),
                ],
            ));
        }
    }
    if calc.nearest_pressure_notice {
        lines.push(tr.fill(
            keys::NOTICE_NEAREST_PRESSURE,
            &[
                ("requested", format!("{:.3}", calc.query.pressure)),
                ("used", est.pressure_used.to_string()),
            ],
        ));
    }
    if let Some(check) = calc.reference {
        lines.push(tr.fill(
            keys::RESULT_IF97,
            &[
                ("h", format!("{:.1}", check.if97_enthalpy)),
                ("d", format!("{:+.2}", check.deviation_percent())),
            ],
        ));
    }
    lines
}

pub fn format_stats(tr: &Translator, stats: &HistoryStats, unit: SpecificEnthalpyUnit) -> String {
    let avg = match stats.average {
        Some(h) => enthalpy_text(h, unit),
        None => tr.t(keys::STATS_NO_DATA).to_string(),
    };
    format!(
        "{}: {} | {}: {}",
        tr.t(keys::STATS_COUNT),
        stats.count,
        tr.t(keys::STATS_AVERAGE),
        avg
    )
}

pub fn format_levels(tr: &Translator, table: &ReferenceTable) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", tr.t(keys::LEVELS_HEADING), table.name())];
    for (level, curve) in table.iter() {
        let (min, max) = curve.range();
        lines.push(tr.fill(
            keys::LEVELS_ROW,
            &[
                ("p", level.to_string()),
                ("min", min.to_string()),
                ("max", max.to_string()),
                ("n", curve.len().to_string()),
            ],
        ));
    }
    lines
}

/// 대화형 모드를 실행한다. 추정 오류는 출력만 하고 계속 진행한다.
pub fn run_interactive<R: BufRead, W: Write>(
    tr: &Translator,
    calc: &mut Calculator,
    units: &DefaultUnits,
    input: R,
    out: &mut W,
) -> Result<(), AppError> {
    writeln!(out, "{}", tr.t(keys::INTERACTIVE_HELP))?;
    write!(out, "{}", tr.t(keys::PROMPT_QUERY))?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(out, "{}", tr.t(keys::PROMPT_QUERY))?;
            out.flush()?;
            continue;
        }
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => writeln!(out, "{}", tr.t(keys::INTERACTIVE_HELP))?,
            Some(Command::Stats) => {
                writeln!(out, "{}", format_stats(tr, &calc.stats(), units.specific_enthalpy))?
            }
            Some(Command::History) => {
                if calc.history().is_empty() {
                    writeln!(out, "{}", tr.t(keys::CHART_EMPTY))?;
                }
                for entry in calc.history().entries() {
                    writeln!(
                        out,
                        "{}",
                        tr.fill(
                            keys::HISTORY_ROW,
                            &[
                                ("seq", entry.sequence.to_string()),
                                ("t", entry.query.temperature.to_string()),
                                ("p", entry.query.pressure.to_string()),
                                (
                                    "h",
                                    enthalpy_text(entry.estimate.enthalpy, units.specific_enthalpy)
                                ),
                            ],
                        )
                    )?;
                }
            }
            Some(Command::Reset) => {
                calc.reset_all();
                writeln!(out, "{}", tr.t(keys::RESET_DONE))?;
            }
            Some(Command::Query {
                temperature,
                pressure,
            }) => match calculate_in_units(calc, units, temperature, pressure) {
                Ok(result) => {
                    for l in format_calculation(tr, &result, units) {
                        writeln!(out, "{l}")?;
                    }
                }
                Err(err) => writeln!(out, "{}: {err}", tr.t(keys::ERROR_PREFIX))?,
            },
            None => writeln!(out, "{}", tr.t(keys::INVALID_QUERY))?,
        }
        write!(out, "{}", tr.t(keys::PROMPT_QUERY))?;
        out.flush()?;
    }
    writeln!(out)?;
    writeln!(out, "{}", tr.t(keys::APP_EXIT))?;
    Ok(())
}
