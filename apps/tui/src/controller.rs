use crate::display::{DisplayMode, ResultView};
use crate::map::{LatLon, MapOverlay};
use crate::sim::{
    validate, ClientError, ClientVariant, FormValues, ResultRecord, SimulationClient,
    SimulationParams,
};

pub const EMPTY_RESULTS_MESSAGE: &str = "Received empty results from server.";

/// Trigger and busy-indicator state. At most one request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub trigger_enabled: bool,
    pub busy: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            trigger_enabled: true,
            busy: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            message: message.into(),
        }
    }
}

/// How a submit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderResult {
    /// Records were shown in the given mode.
    Rendered(DisplayMode),
    /// Server answered with no records; display cleared, warning shown.
    EmptyResults,
    /// Input rejected locally; nothing was sent.
    ValidationFailed,
    /// Transport, HTTP or decode failure; display cleared.
    RequestFailed,
    /// A request is already in flight.
    Busy,
}

impl RenderResult {
    /// Display mode after the submit, `None` when the display was left alone.
    pub const fn mode(self) -> Option<DisplayMode> {
        match self {
            Self::Rendered(mode) => Some(mode),
            Self::EmptyResults | Self::RequestFailed => Some(DisplayMode::Empty),
            Self::ValidationFailed | Self::Busy => None,
        }
    }
}

/// Glue between the form, the client and everything that displays results.
#[derive(Debug)]
pub struct SimulationController {
    variant: ClientVariant,
    client: SimulationClient,
    controls: Controls,
    banner: Option<Banner>,
    view: ResultView,
    map: Option<MapOverlay>,
}

impl SimulationController {
    pub fn new(client: SimulationClient, variant: ClientVariant) -> Self {
        Self {
            variant,
            client,
            controls: Controls::default(),
            banner: None,
            view: ResultView::new(),
            map: variant.has_map().then(MapOverlay::new),
        }
    }

    pub const fn variant(&self) -> ClientVariant {
        self.variant
    }

    pub const fn client(&self) -> &SimulationClient {
        &self.client
    }

    pub const fn controls(&self) -> Controls {
        self.controls
    }

    pub const fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub const fn view(&self) -> &ResultView {
        &self.view
    }

    pub const fn map(&self) -> Option<&MapOverlay> {
        self.map.as_ref()
    }

    fn release_controls(&mut self) {
        self.controls = Controls::default();
    }

    /// Validates the form and locks the controls for a request.
    ///
    /// Returns the parameters to send, or `None` when the trigger is locked or
    /// validation failed (the error is then in the banner and the controls
    /// are released again).
    pub fn begin_submit(&mut self, form: &FormValues) -> Option<SimulationParams> {
        if !self.controls.trigger_enabled {
            tracing::debug!("submit ignored while a request is in flight");
            return None;
        }

        self.banner = None;
        self.controls = Controls {
            trigger_enabled: false,
            busy: true,
        };
        tracing::info!("simulation requested");

        match validate(form, self.variant) {
            Ok(params) => Some(params),
            Err(e) => {
                tracing::warn!(error = %e, "validation failed");
                self.banner = Some(Banner::error(e.message));
                self.release_controls();
                None
            }
        }
    }

    /// Renders the outcome of a request and always releases the controls.
    pub fn finish(
        &mut self,
        params: &SimulationParams,
        outcome: Result<Vec<ResultRecord>, ClientError>,
    ) -> RenderResult {
        let result = match outcome {
            Ok(records) if records.is_empty() => {
                tracing::warn!("received empty results array from server");
                self.banner = Some(Banner::warning(EMPTY_RESULTS_MESSAGE));
                self.clear_display();
                RenderResult::EmptyResults
            }
            Ok(records) => {
                let mode = self.view.render(&records);
                self.update_map(params);
                RenderResult::Rendered(mode)
            }
            Err(e) => {
                tracing::error!(error = %e, "simulation failed");
                self.banner = Some(Banner::error(format!("Simulation failed: {e}")));
                self.clear_display();
                RenderResult::RequestFailed
            }
        };

        self.release_controls();
        tracing::debug!(?result, "simulation request finished");
        result
    }

    /// Full submit: validate, send, render.
    pub async fn on_submit(&mut self, form: &FormValues) -> RenderResult {
        if !self.controls.trigger_enabled {
            return RenderResult::Busy;
        }
        let Some(params) = self.begin_submit(form) else {
            return RenderResult::ValidationFailed;
        };
        let outcome = self.client.run(&params).await;
        self.finish(&params, outcome)
    }

    fn clear_display(&mut self) {
        self.view.clear();
        if let Some(map) = self.map.as_mut() {
            map.clear();
        }
    }

    fn update_map(&mut self, params: &SimulationParams) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        let representative = self.view.representative();
        let likelihood = representative.and_then(|r| r.skywave_likelihood.as_deref());
        let ground_wave_snr = representative.and_then(|r| r.ground_wave_snr);

        if let Err(e) = map.redraw(
            LatLon::new(params.tx_lat, params.tx_lon),
            LatLon::new(params.rx_lat, params.rx_lon),
            likelihood,
            ground_wave_snr,
        ) {
            tracing::error!(error = %e, "map update failed");
            self.banner = Some(Banner::error(e.to_string()));
        }
    }
}
