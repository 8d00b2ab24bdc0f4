use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use hfprop_tui::config::AppConfig;
use hfprop_tui::display::{DetailLine, DisplayMode, ResultView, TableRow};
use hfprop_tui::sim::{ClientError, ResultRecord, SimulationParams};
use hfprop_tui::{BannerKind, FormValues, RenderResult, SimulationClient, SimulationController};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;
use tokio::task::JoinHandle;

use crate::app::{handle_input, App};
use crate::ui;

// States of one simulation run as seen by the event loop
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RunState {
    Idle,
    Requesting,
    Finished,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Requesting => write!(f, "Requesting"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

#[derive(Clone, Debug)]
enum RunEvent {
    Start,
    Completed(RenderResult),
    Reset,
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Completed(result) => write!(f, "Completed({result:?})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: RunState,
    event: RunEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct RunMachine {
    state: RunState,
}

impl RunMachine {
    const fn new(initial_state: RunState) -> Self {
        Self {
            state: initial_state,
        }
    }

    const fn state(&self) -> RunState {
        self.state
    }

    fn process_event(
        &mut self,
        event: &RunEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        self.state = next_state.0;
        Ok(())
    }
}

struct NextState(RunState);

impl NextState {
    const fn new(state: RunState) -> Self {
        Self(state)
    }
}

impl RunState {
    const fn next_state(self) -> NextState {
        NextState::new(self)
    }
}

impl TryFrom<(RunState, &RunEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(value: (RunState, &RunEvent, &mut App)) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (RunState::Idle, RunEvent::Start) => {
                app.table_selected = 0;
                Ok(RunState::Requesting.next_state())
            }
            (RunState::Requesting, RunEvent::Completed(result)) => {
                tracing::debug!(?result, "run completed");
                Ok(RunState::Finished.next_state())
            }
            (RunState::Finished, RunEvent::Reset) => Ok(RunState::Idle.next_state()),
            _ => Err(StateTransitionError {
                from: current_state,
                event: event.clone(),
            }),
        }
    }
}

type RequestTask = JoinHandle<std::result::Result<Vec<ResultRecord>, ClientError>>;

struct InFlight {
    params: SimulationParams,
    task: RequestTask,
}

fn spawn_request(client: SimulationClient, params: SimulationParams) -> InFlight {
    let body = params.clone();
    let task = tokio::spawn(async move { client.run(&body).await });
    InFlight { params, task }
}

async fn join_request(task: RequestTask) -> std::result::Result<Vec<ResultRecord>, ClientError> {
    match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "simulation task failed");
            Err(ClientError::Interrupted(e.to_string()))
        }
    }
}

/// Run a single simulation without the UI and print the outcome
pub async fn run_headless(config: &AppConfig, form: &FormValues, json: bool) -> Result<()> {
    let client = SimulationClient::new(config.endpoint.clone());
    let mut controller = SimulationController::new(client, config.variant);

    let result = controller.on_submit(form).await;
    tracing::info!(?result, "headless run finished");

    if let Some(banner) = controller.banner() {
        match banner.kind {
            BannerKind::Error => return Err(eyre!("{}", banner.message)),
            BannerKind::Warning => eprintln!("{}", banner.message),
        }
    }

    if json {
        render_headless_json(config, &controller, result)?;
    } else {
        render_headless_report(config, controller.view());
    }

    Ok(())
}

fn render_headless_report(config: &AppConfig, view: &ResultView) {
    println!("\nHF Propagation Simulation");
    println!("=========================");
    println!("Endpoint: {}", config.endpoint);
    println!("Variant: {}", config.variant.as_str());

    match view.mode {
        DisplayMode::Empty => {
            println!("\nNo results.");
            return;
        }
        DisplayMode::Single => {
            let single = &view.single;
            println!("\nDistance (km): {}", single.distance_km);
            println!("Skywave Likelihood: {}", single.likelihood);
            println!("Ground Wave SNR (dB): {}", single.ground_wave_snr);
            println!("Skywave SNR (dB): {}", single.skywave_snr);
        }
        DisplayMode::Tabular => {
            println!();
            println!("{}", TableRow::HEADERS.join(" | "));
            for row in &view.rows {
                println!("{}", row.cells().join(" | "));
            }
        }
    }

    println!("\n{}", view.details.title);
    for line in &view.details.lines {
        match line {
            DetailLine::Field { label, value } => println!("  {label}: {value}"),
            DetailLine::Rule => println!("  ---"),
            DetailLine::Note(note) => println!("  {note}"),
        }
    }
}

fn render_headless_json(
    config: &AppConfig,
    controller: &SimulationController,
    result: RenderResult,
) -> Result<()> {
    let report = HeadlessReport {
        endpoint: &config.endpoint,
        variant: config.variant.as_str(),
        mode: result.mode().unwrap_or_default().as_str(),
        representative: controller.view().representative(),
        records: controller.view().records(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

#[derive(serde::Serialize)]
struct HeadlessReport<'a> {
    endpoint: &'a str,
    variant: &'a str,
    mode: &'a str,
    representative: Option<&'a ResultRecord>,
    records: &'a [ResultRecord],
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut run_machine = RunMachine::new(RunState::Idle);
    let mut in_flight: Option<InFlight> = None;

    loop {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key).await;
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        tracing::warn!("redraw after resize failed");
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }

        if app.submit_requested && run_machine.state() == RunState::Idle {
            app.submit_requested = false;
            let form = app.form.clone();

            if let Some(params) = app.controller.begin_submit(&form) {
                if let Err(e) = run_machine.process_event(&RunEvent::Start, app) {
                    tracing::warn!(error = %e, "run state machine rejected start");
                }
                in_flight = Some(spawn_request(app.controller.client().clone(), params));
            }
        }

        if in_flight
            .as_ref()
            .is_some_and(|request| request.task.is_finished())
        {
            if let Some(InFlight { params, task }) = in_flight.take() {
                let outcome = join_request(task).await;
                let result = app.controller.finish(&params, outcome);

                if let Err(e) = run_machine.process_event(&RunEvent::Completed(result), app) {
                    tracing::warn!(error = %e, "run state machine rejected completion");
                }
                if let Err(e) = run_machine.process_event(&RunEvent::Reset, app) {
                    tracing::warn!(error = %e, "run state machine rejected reset");
                }
            }
        }
    }

    if let Some(request) = in_flight.take() {
        request.task.abort();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfprop_tui::{ClientVariant, Theme, ThemeManager};

    fn app() -> App {
        App::new(
            SimulationController::new(
                SimulationClient::new("http://127.0.0.1:9/simulate"),
                ClientVariant::Online,
            ),
            ThemeManager::in_memory(Theme::Light),
        )
    }

    #[test]
    fn run_machine_follows_request_lifecycle() {
        let mut app = app();
        let mut machine = RunMachine::new(RunState::Idle);

        machine.process_event(&RunEvent::Start, &mut app).unwrap();
        assert_eq!(machine.state(), RunState::Requesting);

        machine
            .process_event(&RunEvent::Completed(RenderResult::EmptyResults), &mut app)
            .unwrap();
        assert_eq!(machine.state(), RunState::Finished);

        machine.process_event(&RunEvent::Reset, &mut app).unwrap();
        assert_eq!(machine.state(), RunState::Idle);
    }

    #[test]
    fn second_start_is_rejected() {
        let mut app = app();
        let mut machine = RunMachine::new(RunState::Idle);
        machine.process_event(&RunEvent::Start, &mut app).unwrap();

        let err = machine
            .process_event(&RunEvent::Start, &mut app)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid transition from Requesting with event Start"
        );
    }

    #[tokio::test]
    async fn aborted_task_reports_interrupted() {
        let task: RequestTask = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            Ok(Vec::new())
        });
        task.abort();
        let outcome = join_request(task).await;
        assert!(matches!(outcome, Err(ClientError::Interrupted(_))));
    }
}
