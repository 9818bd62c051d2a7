use std::io;
use std::process::ExitCode;
use std::sync::{mpsc, Arc};

use anyhow::Context as _;
use manual_core::{update, AppState, DownloadState, Msg, ProcessStatus};
use manual_engine::GeminiClient;
use manual_logging::{manual_debug, manual_info, manual_warn};

use super::cli::Cli;
use super::config::{api_key_from_env, AppConfig};
use super::effects::EffectRunner;
use super::input;
use super::ui::TerminalRenderer;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Ui(Msg),
    Quit,
}

const HELP: &str = "Introduce una URL para estructurarla, `descargar` para exportar el manual o `salir`.";
const BUSY_NOTICE: &str = "Ya hay una solicitud en curso; espera a que termine.";

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref())?.apply_cli(&cli);
    if !manual_logging::initialize(&config.log) {
        eprintln!("web2manual: logging could not be initialized");
    }
    manual_info!("Starting web2manual, output_dir={:?}", config.output_dir);
    match &config.source {
        Some(path) => manual_info!("Loaded configuration from {:?}", path),
        None => manual_info!("No configuration file; using defaults"),
    }

    let api_key = api_key_from_env();
    if api_key.is_none() {
        manual_warn!("No GEMINI_API_KEY or API_KEY set; requests will fail");
    }
    let client = GeminiClient::new(config.client_settings(api_key))
        .context("create structuring client")?;

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(Arc::new(client), config.output_dir.clone(), tx.clone())
        .context("start engine")?;

    let mut state = AppState::with_timings(config.core_timings());
    let mut renderer = TerminalRenderer::new(io::stdout());
    let mut goal = match &cli.url {
        Some(url) => {
            let _ = tx.send(AppEvent::Ui(Msg::InputChanged(url.clone())));
            let _ = tx.send(AppEvent::Ui(Msg::SubmitClicked));
            Some(BatchGoal::new(cli.export))
        }
        None => {
            renderer.notice(HELP)?;
            input::spawn_reader(tx.clone());
            None
        }
    };
    drop(tx);

    renderer.draw(&state.view())?;

    while let Ok(first) = rx.recv() {
        let mut inbox = vec![first];
        inbox.extend(rx.try_iter());

        for event in inbox {
            let msg = match event {
                AppEvent::Ui(msg) => msg,
                AppEvent::Quit => {
                    manual_info!("Quit requested");
                    return Ok(ExitCode::SUCCESS);
                }
            };
            if matches!(msg, Msg::SubmitClicked) && !state.status().accepts_submission() {
                renderer.notice(BUSY_NOTICE)?;
            }
            manual_debug!("dispatch {:?}", msg);
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            runner.run(effects);

            if state.consume_dirty() {
                renderer.draw(&state.view())?;
            }

            if let Some(goal) = goal.as_mut() {
                match goal.step(&state) {
                    BatchStep::Continue => {}
                    BatchStep::Download => {
                        let (next, effects) = update(std::mem::take(&mut state), Msg::DownloadClicked);
                        state = next;
                        runner.run(effects);
                        if state.consume_dirty() {
                            renderer.draw(&state.view())?;
                        }
                    }
                    BatchStep::Finish { success } => {
                        manual_info!("Batch run finished, success={}", success);
                        return Ok(if success {
                            ExitCode::SUCCESS
                        } else {
                            ExitCode::FAILURE
                        });
                    }
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// What a one-shot run still has to do after each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchStep {
    Continue,
    Download,
    Finish { success: bool },
}

#[derive(Debug)]
struct BatchGoal {
    export: bool,
    download_requested: bool,
}

impl BatchGoal {
    fn new(export: bool) -> Self {
        Self {
            export,
            download_requested: false,
        }
    }

    fn step(&mut self, state: &AppState) -> BatchStep {
        match state.status() {
            ProcessStatus::Error => BatchStep::Finish { success: false },
            ProcessStatus::Completed if !self.export => BatchStep::Finish { success: true },
            ProcessStatus::Completed => {
                if state.export_error().is_some() {
                    return BatchStep::Finish { success: false };
                }
                if matches!(state.download(), DownloadState::Downloaded { .. }) {
                    return BatchStep::Finish { success: true };
                }
                if !self.download_requested {
                    self.download_requested = true;
                    return BatchStep::Download;
                }
                BatchStep::Continue
            }
            _ => BatchStep::Continue,
        }
    }
}
