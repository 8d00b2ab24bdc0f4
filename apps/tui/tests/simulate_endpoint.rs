use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use hfprop_tui::display::DisplayMode;
use hfprop_tui::{
    BannerKind, ClientVariant, Controls, FormValues, RenderResult, SimulationClient,
    SimulationController, StyleBucket,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorder {
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

impl Recorder {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }
}

async fn serve(reply: fn(&Value) -> Response) -> (String, Recorder) {
    let recorder = Recorder::default();
    let router = Router::new()
        .route(
            "/simulate",
            post(
                move |State(recorder): State<Recorder>, Json(body): Json<Value>| async move {
                    recorder.hits.fetch_add(1, Ordering::SeqCst);
                    let response = reply(&body);
                    *recorder.last_body.lock().unwrap() = Some(body);
                    response
                },
            ),
        )
        .with_state(recorder.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/simulate"), recorder)
}

fn controller(endpoint: &str, variant: ClientVariant) -> SimulationController {
    SimulationController::new(SimulationClient::new(endpoint), variant)
}

fn sweep_record(freq: f64, likelihood: &str) -> Value {
    json!({
        "frequencyMHz": freq,
        "distanceKm": 853.2,
        "groundWaveSNR": -4.0,
        "skywaveSNR": 18.44,
        "skywaveMode": "1F2",
        "absorptionDb": 2.5,
        "skywaveTotalLossDb": 120.1,
        "skywaveLikelihood": likelihood,
    })
}

fn one_record(_: &Value) -> Response {
    Json(json!([sweep_record(14.0, "Good")])).into_response()
}

fn sweep_from_steps(body: &Value) -> Response {
    let steps = body["freqSteps"].as_u64().unwrap_or(1);
    let start = body["startFreq"].as_f64().unwrap_or(7.0);
    #[allow(clippy::cast_precision_loss)]
    let records: Vec<Value> = (0..steps)
        .map(|i| sweep_record(start + i as f64, "Fair"))
        .collect();
    Json(Value::Array(records)).into_response()
}

fn empty_array(_: &Value) -> Response {
    Json(json!([])).into_response()
}

fn json_error(_: &Value) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "propagation model timeout" })),
    )
        .into_response()
}

fn text_error(_: &Value) -> Response {
    (StatusCode::BAD_GATEWAY, "upstream ionosonde feed down").into_response()
}

fn bare_error(_: &Value) -> Response {
    StatusCode::SERVICE_UNAVAILABLE.into_response()
}

fn negative_infinity(_: &Value) -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"[{"frequencyMHz": 14.0, "distanceKm": 5.0, "groundWaveSNR": 31.2, "skywaveSNR": -Infinity, "skywaveLikelihood": "Poor"}]"#,
    )
        .into_response()
}

#[tokio::test]
async fn single_frequency_renders_summary_and_map() {
    let (endpoint, recorder) = serve(one_record).await;
    let mut c = controller(&endpoint, ClientVariant::Online);

    let result = c.on_submit(&FormValues::default()).await;

    assert_eq!(result, RenderResult::Rendered(DisplayMode::Single));
    assert_eq!(c.view().single.skywave_snr, "18.4");
    assert_eq!(c.view().single.likelihood, "Good");
    assert_eq!(c.view().single.likelihood_style, StyleBucket::Good);
    assert_eq!(
        c.view().details.title,
        "Calculation Details (14.000 MHz)"
    );

    let map = c.map().unwrap();
    assert!(!map.is_empty());
    assert_eq!(map.sky_path().unwrap().style, StyleBucket::Good);
    assert_eq!(map.ground_path().unwrap().style, StyleBucket::Poor);

    assert_eq!(c.controls(), Controls::default());
    assert!(c.banner().is_none());

    let body = recorder.last_body().unwrap();
    assert_eq!(body["txLat"], json!(40.0));
    assert_eq!(body["rxLon"], json!(-90.0));
    assert_eq!(body["freqSteps"], json!(1));
    assert_eq!(body["txAntennaType"], json!("Dipole"));
    assert!(body.get("sfi").is_none());
}

#[tokio::test]
async fn sweep_renders_table() {
    let (endpoint, _) = serve(sweep_from_steps).await;
    let mut c = controller(&endpoint, ClientVariant::Offline);
    let mut form = FormValues::default();
    form.start_freq = "7".to_string();
    form.end_freq = "11".to_string();
    form.freq_steps = "5".to_string();

    let result = c.on_submit(&form).await;

    assert_eq!(result, RenderResult::Rendered(DisplayMode::Tabular));
    assert_eq!(c.view().rows.len(), 5);
    assert_eq!(c.view().rows[0].frequency_mhz, "7.000");
    assert_eq!(c.view().rows[0].likelihood_style, StyleBucket::Fair);
    assert_eq!(
        c.view().details.title,
        "Calculation Details (9.000 MHz)"
    );
    assert!(c.map().is_none());
}

#[tokio::test]
async fn offline_variant_sends_indices() {
    let (endpoint, recorder) = serve(one_record).await;
    let mut c = controller(&endpoint, ClientVariant::Offline);
    let mut form = FormValues::default();
    form.sfi = "150".to_string();
    form.kp = "0".to_string();

    c.on_submit(&form).await;

    let body = recorder.last_body().unwrap();
    assert_eq!(body["sfi"], json!(150));
    assert_eq!(body["ssn"], json!(10));
    assert_eq!(body["kp"], json!(0));
}

#[tokio::test]
async fn empty_results_warn_and_clear() {
    let (endpoint, _) = serve(empty_array).await;
    let mut c = controller(&endpoint, ClientVariant::Online);

    let result = c.on_submit(&FormValues::default()).await;

    assert_eq!(result, RenderResult::EmptyResults);
    let banner = c.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Warning);
    assert_eq!(banner.message, "Received empty results from server.");
    assert_eq!(c.view().mode, DisplayMode::Empty);
    assert_eq!(c.controls(), Controls::default());
}

#[tokio::test]
async fn structured_error_body_is_reported() {
    let (endpoint, _) = serve(json_error).await;
    let mut c = controller(&endpoint, ClientVariant::Online);

    let result = c.on_submit(&FormValues::default()).await;

    assert_eq!(result, RenderResult::RequestFailed);
    assert_eq!(
        c.banner().unwrap().message,
        "Simulation failed: HTTP error! Status: 500 - propagation model timeout"
    );
    assert!(c.view().details.is_empty());
    assert!(c.map().unwrap().is_empty());
    assert_eq!(c.controls(), Controls::default());
}

#[tokio::test]
async fn text_error_body_is_reported() {
    let (endpoint, _) = serve(text_error).await;
    let mut c = controller(&endpoint, ClientVariant::Online);

    c.on_submit(&FormValues::default()).await;

    assert_eq!(
        c.banner().unwrap().message,
        "Simulation failed: HTTP error! Status: 502 - upstream ionosonde feed down"
    );
}

#[tokio::test]
async fn empty_error_body_reports_status_only() {
    let (endpoint, _) = serve(bare_error).await;
    let mut c = controller(&endpoint, ClientVariant::Online);

    c.on_submit(&FormValues::default()).await;

    assert_eq!(
        c.banner().unwrap().message,
        "Simulation failed: HTTP error! Status: 503"
    );
}

#[tokio::test]
async fn transport_failure_is_reported() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut c = controller(&format!("http://{addr}/simulate"), ClientVariant::Online);
    let result = c.on_submit(&FormValues::default()).await;

    assert_eq!(result, RenderResult::RequestFailed);
    let banner = c.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);
    assert!(banner.message.starts_with("Simulation failed: "));
    assert_eq!(c.controls(), Controls::default());
}

#[tokio::test]
async fn negative_infinity_snr_shows_placeholder() {
    let (endpoint, _) = serve(negative_infinity).await;
    let mut c = controller(&endpoint, ClientVariant::Online);

    let result = c.on_submit(&FormValues::default()).await;

    assert_eq!(result, RenderResult::Rendered(DisplayMode::Single));
    assert_eq!(c.view().single.skywave_snr, "-");
    assert_eq!(c.view().single.ground_wave_snr, "31.2");
    assert_eq!(c.map().unwrap().ground_path().unwrap().style, StyleBucket::Good);
}

#[tokio::test]
async fn submit_while_busy_sends_nothing() {
    let (endpoint, recorder) = serve(one_record).await;
    let mut c = controller(&endpoint, ClientVariant::Online);

    let pending = c.begin_submit(&FormValues::default());
    assert!(pending.is_some());

    let result = c.on_submit(&FormValues::default()).await;
    assert_eq!(result, RenderResult::Busy);
    assert_eq!(result.mode(), None);
    assert_eq!(recorder.hits(), 0);
}

#[tokio::test]
async fn invalid_form_never_reaches_the_endpoint() {
    let (endpoint, recorder) = serve(one_record).await;
    let mut c = controller(&endpoint, ClientVariant::Online);
    let mut form = FormValues::default();
    form.rx_lat = "91".to_string();

    let result = c.on_submit(&form).await;

    assert_eq!(result, RenderResult::ValidationFailed);
    assert_eq!(c.banner().unwrap().message, "Invalid Receiver coordinates.");
    assert_eq!(recorder.hits(), 0);
}
