#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::ValueEnum;
use eframe::{egui, App, Frame};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use steam_enthalpy_toolbox::{
    app::{Calculation, Calculator},
    config,
    i18n::{self, keys, Translator},
    logging,
    steam::{Method, ReferenceTable},
    ui_cli,
    units::{convert_specific_enthalpy, PressureUnit, SpecificEnthalpyUnit, TemperatureUnit},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    // 설정 파일이 깨져 있으면 기본값으로 실행하되, 그 파일을 덮어쓰지 않는다.
    let (app_cfg, config_error) = match config::load_or_default() {
        Ok(cfg) => (cfg, None),
        Err(err) => (config::Config::default(), Some(err.to_string())),
    };
    logging::init(&app_cfg.log_filter);
    if let Some(err) = &config_error {
        tracing::error!(path = config::DEFAULT_CONFIG_PATH, error = %err, "설정 로드 실패");
    }
    let lang = i18n::resolve_language(cli_lang.as_deref(), Some(app_cfg.language.as_str()));
    let tr = Translator::new(&lang);
    let calc = Calculator::from_config(&app_cfg).unwrap_or_else(|err| {
        tracing::error!(error = %err, "기준 표 로드 실패, 내장 증기표 사용");
        Calculator::new(ReferenceTable::steam(), app_cfg.max_data_points)
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
        ..Default::default()
    };
    let title = tr.t(keys::APP_TITLE);
    eframe::run_native(
        title,
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!("Font error: {e}");
            }
            Box::new(GuiApp::new(
                app_cfg,
                PathBuf::from(config::DEFAULT_CONFIG_PATH),
                config_error,
                tr,
                calc,
            ))
        }),
    )
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, font_name.clone());
    }
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾아 적용한다. 못 찾으면 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/malgun.ttf").to_path_buf(),
        Path::new("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc").to_path_buf(),
        Path::new("/usr/share/fonts/truetype/nanum/NanumGothic.ttf").to_path_buf(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.push(fonts.join("malgun.ttf"));
        candidates.push(fonts.join("gulim.ttc"));
    }
    for path in candidates {
        if path.exists() {
            let bytes = fs::read(&path)
                .map_err(|e| format!("Failed to read font ({}): {e}", path.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }
    Err("Korean font not found; using default font.".into())
}

struct Status {
    text: String,
    is_error: bool,
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    // 로드에 실패한 경우의 오류. Some 이면 저장하지 않는다.
    config_error: Option<String>,
    tr: Translator,
    calc: Calculator,
    temperature_input: String,
    pressure_input: String,
    last: Option<Calculation>,
    status: Option<Status>,
}

impl GuiApp {
    fn new(
        config: config::Config,
        config_path: PathBuf,
        config_error: Option<String>,
        tr: Translator,
        calc: Calculator,
    ) -> Self {
        let mut app = Self {
            config,
            config_path,
            config_error,
            tr,
            calc,
            temperature_input: String::new(),
            pressure_input: String::new(),
            last: None,
            status: None,
        };
        if let Some(err) = app.config_error.clone() {
            app.set_error(err);
        }
        app
    }

    /// 폼 입력 검증. 숫자가 아니거나 음수면 코어를 호출하지 않는다.
    fn parse_inputs(&self) -> Result<(f64, f64), String> {
        let parse = |label: &str, raw: &str| -> Result<f64, String> {
            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
                _ => Err(format!("{label}: '{}'", raw.trim())),
            }
        };
        let t = parse(self.tr.t(keys::LABEL_TEMPERATURE), &self.temperature_input)?;
        let p = parse(self.tr.t(keys::LABEL_PRESSURE), &self.pressure_input)?;
        Ok((t, p))
    }

    fn calculate(&mut self) {
        let (t, p) = match self.parse_inputs() {
            Ok(v) => v,
            Err(msg) => {
                self.set_error(msg);
                return;
            }
        };
        match ui_cli::calculate_in_units(&mut self.calc, &self.config.units, t, p) {
            Ok(result) => {
                self.status = if result.nearest_pressure_notice {
                    Some(Status {
                        text: self.tr.fill(
                            keys::NOTICE_NEAREST_PRESSURE,
                            &[
                                ("requested", format!("{:.3}", result.query.pressure)),
                                ("used", result.estimate.pressure_used.to_string()),
                            ],
                        ),
                        is_error: false,
                    })
                } else {
                    None
                };
                self.last = Some(result);
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn reset(&mut self) {
        self.calc.reset_all();
        self.last = None;
        self.status = Some(Status {
            text: self.tr.t(keys::RESET_DONE).to_string(),
            is_error: false,
        });
    }

    fn set_error(&mut self, msg: String) {
        self.status = Some(Status {
            text: format!("{}: {msg}", self.tr.t(keys::ERROR_PREFIX)),
            is_error: true,
        });
    }

    fn save_config(&mut self) {
        if let Some(err) = &self.config_error {
            let msg = self.tr.fill(keys::CONFIG_NOT_SAVED, &[("error", err.clone())]);
            self.set_error(msg);
            return;
        }
        if let Err(e) = self.config.save_to(&self.config_path) {
            self.set_error(e.to_string());
        }
    }

    fn input_panel(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let mut submit = false;
        let mut units_changed = false;
        egui::Grid::new("input_grid")
            .num_columns(3)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label(tr.t(keys::LABEL_TEMPERATURE));
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut self.temperature_input).desired_width(90.0),
                );
                submit |= resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                units_changed |= unit_combo(
                    ui,
                    "temperature_unit",
                    &mut self.config.units.temperature,
                    TemperatureUnit::value_variants(),
                    |u: &TemperatureUnit| u.symbol(),
                );
                ui.end_row();

                ui.label(tr.t(keys::LABEL_PRESSURE));
                let resp = ui
                    .add(egui::TextEdit::singleline(&mut self.pressure_input).desired_width(90.0));
                submit |= resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                units_changed |= unit_combo(
                    ui,
                    "pressure_unit",
                    &mut self.config.units.pressure,
                    PressureUnit::value_variants(),
                    |u: &PressureUnit| u.symbol(),
                );
                ui.end_row();

                ui.label(tr.t(keys::RESULT_ENTHALPY));
                ui.label("");
                units_changed |= unit_combo(
                    ui,
                    "enthalpy_unit",
                    &mut self.config.units.specific_enthalpy,
                    SpecificEnthalpyUnit::value_variants(),
                    |u: &SpecificEnthalpyUnit| u.symbol(),
                );
                ui.end_row();
            });
        if units_changed {
            self.save_config();
        }
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::BUTTON_CALCULATE)).clicked() {
                submit = true;
            }
            if ui.button(tr.t(keys::BUTTON_RESET)).clicked() {
                self.reset();
            }
        });
        if submit {
            self.calculate();
        }
    }

    fn result_panel(&self, ui: &mut egui::Ui) {
        let Some(result) = &self.last else {
            return;
        };
        ui.separator();
        ui.strong(self.tr.t(keys::RESULT_HEADING));
        let lines = ui_cli::format_calculation(&self.tr, result, &self.config.units);
        let enthalpy_label = ui.label(lines[0].as_str());
        if let Method::Interpolated(b) = result.estimate.method {
            enthalpy_label.on_hover_text(self.tr.fill(
                keys::RESULT_BRACKET,
                &[
                    ("t1", b.t1.to_string()),
                    ("t2", b.t2.to_string()),
                    ("h1", b.h1.to_string()),
                    ("h2", b.h2.to_string()),
                ],
            ));
        }
        for line in lines.iter().skip(1) {
            ui.label(line.as_str());
        }
    }

    fn stats_panel(&self, ui: &mut egui::Ui) {
        ui.separator();
        ui.strong(self.tr.t(keys::STATS_HEADING));
        ui.label(ui_cli::format_stats(
            &self.tr,
            &self.calc.stats(),
            self.config.units.specific_enthalpy,
        ));
    }

    fn chart_panel(&self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::CHART_HEADING));
        let history = self.calc.history();
        if history.is_empty() {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.label(self.tr.t(keys::CHART_EMPTY));
            });
            return;
        }
        let unit = self.config.units.specific_enthalpy;
        let points: Vec<[f64; 2]> = history
            .points()
            .into_iter()
            .map(|[x, h]| {
                [
                    x,
                    convert_specific_enthalpy(h, SpecificEnthalpyUnit::KjPerKg, unit),
                ]
            })
            .collect();
        let label = self.tr.t(keys::RESULT_ENTHALPY);
        Plot::new("enthalpy_history")
            .legend(Legend::default())
            .x_axis_label(self.tr.t(keys::CHART_X_AXIS))
            .y_axis_label(format!("{label} ({})", unit.symbol()))
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(PlotPoints::from(points.clone())).name(label));
                plot_ui.points(Points::new(PlotPoints::from(points)).radius(3.0));
            });
    }
}

fn unit_combo<U: Copy + PartialEq>(
    ui: &mut egui::Ui,
    id: &str,
    current: &mut U,
    variants: &[U],
    symbol: impl Fn(&U) -> &'static str,
) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_source(id)
        .selected_text(symbol(current))
        .show_ui(ui, |ui| {
            for v in variants {
                if ui.selectable_label(*v == *current, symbol(v)).clicked() && *v != *current {
                    *current = *v;
                    changed = true;
                }
            }
        });
    changed
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.heading(self.tr.t(keys::APP_TITLE));
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| match &self.status {
            Some(status) if status.is_error => {
                ui.colored_label(egui::Color32::from_rgb(200, 60, 60), status.text.as_str());
            }
            Some(status) => {
                ui.colored_label(egui::Color32::from_rgb(200, 150, 40), status.text.as_str());
            }
            None => {
                ui.label(self.calc.table().name());
            }
        });
        egui::SidePanel::left("form")
            .resizable(false)
            .min_width(320.0)
            .show(ctx, |ui| {
                self.input_panel(ui);
                self.result_panel(ui);
                self.stats_panel(ui);
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_panel(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(path: PathBuf, config_error: Option<String>) -> GuiApp {
        GuiApp::new(
            config::Config::default(),
            path,
            config_error,
            Translator::new("en"),
            Calculator::new(ReferenceTable::steam(), 50),
        )
    }

    fn temp_config(tag: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("steam-enthalpy-gui-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("tmp dir");
        dir.join("config.toml")
    }

    #[test]
    fn unreadable_config_is_shown_and_never_overwritten() {
        let path = temp_config("bad");
        let original = "max_data_points = [\n";
        fs::write(&path, original).expect("write");
        let err = config::Config::load_from(&path).unwrap_err().to_string();

        let mut app = app_with(path.clone(), Some(err));
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));

        app.config.units.pressure = PressureUnit::Bar;
        app.save_config();
        assert_eq!(fs::read_to_string(&path).expect("read"), original);
        let status = app.status.as_ref().expect("status");
        assert!(status.is_error);
        assert!(status.text.contains("unit changes are not saved"));
        let _ = fs::remove_dir_all(path.parent().expect("dir"));
    }

    #[test]
    fn unit_change_is_saved_when_config_loaded() {
        let path = temp_config("ok");
        let mut app = app_with(path.clone(), None);
        assert!(app.status.is_none());
        app.config.units.pressure = PressureUnit::Bar;
        app.save_config();
        let saved = config::Config::load_from(&path).expect("reload");
        assert_eq!(saved.units.pressure, PressureUnit::Bar);
        let _ = fs::remove_dir_all(path.parent().expect("dir"));
    }
}
