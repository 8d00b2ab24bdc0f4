use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use hfprop_tui::{ClientVariant, FormValues, SimulationController, ThemeManager};
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

const THROBBER_STEP: Duration = Duration::from_millis(120);

/// Form inputs in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    TxLat,
    TxLon,
    RxLat,
    RxLon,
    TxPower,
    StartFreq,
    EndFreq,
    FreqSteps,
    Sfi,
    Ssn,
    Kp,
    TxAntennaType,
    TxAntennaHeight,
    RxAntennaType,
    RxAntennaHeight,
    NoiseEnvironment,
}

impl FormField {
    pub const ALL: [Self; 16] = [
        Self::TxLat,
        Self::TxLon,
        Self::RxLat,
        Self::RxLon,
        Self::TxPower,
        Self::StartFreq,
        Self::EndFreq,
        Self::FreqSteps,
        Self::Sfi,
        Self::Ssn,
        Self::Kp,
        Self::TxAntennaType,
        Self::TxAntennaHeight,
        Self::RxAntennaType,
        Self::RxAntennaHeight,
        Self::NoiseEnvironment,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::TxLat => "Tx Latitude",
            Self::TxLon => "Tx Longitude",
            Self::RxLat => "Rx Latitude",
            Self::RxLon => "Rx Longitude",
            Self::TxPower => "Tx Power (W)",
            Self::StartFreq => "Start Freq (MHz)",
            Self::EndFreq => "End Freq (MHz)",
            Self::FreqSteps => "Freq Steps",
            Self::Sfi => "SFI",
            Self::Ssn => "SSN",
            Self::Kp => "Kp",
            Self::TxAntennaType => "Tx Antenna",
            Self::TxAntennaHeight => "Tx Height",
            Self::RxAntennaType => "Rx Antenna",
            Self::RxAntennaHeight => "Rx Height",
            Self::NoiseEnvironment => "Rx Noise Env",
        }
    }

    /// Selector fields cycle through fixed options instead of taking text.
    pub const fn is_choice(self) -> bool {
        matches!(
            self,
            Self::TxAntennaType
                | Self::TxAntennaHeight
                | Self::RxAntennaType
                | Self::RxAntennaHeight
                | Self::NoiseEnvironment
        )
    }

    const fn is_index(self) -> bool {
        matches!(self, Self::Sfi | Self::Ssn | Self::Kp)
    }

    /// Fields shown for a variant; solar indices are offline only.
    pub fn visible(variant: ClientVariant) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|field| variant.collects_indices() || !field.is_index())
            .collect()
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub form: FormValues,
    pub fields: Vec<FormField>,
    pub focus_index: usize,
    pub controller: SimulationController,
    pub theme: ThemeManager,
    pub throbber: ThrobberState,
    pub table_selected: usize,
    pub submit_requested: bool,
    pub last_frame: Instant,
}

impl App {
    pub fn new(controller: SimulationController, theme: ThemeManager) -> Self {
        Self::with_form(controller, theme, FormValues::default())
    }

    pub fn with_form(
        controller: SimulationController,
        theme: ThemeManager,
        form: FormValues,
    ) -> Self {
        let fields = FormField::visible(controller.variant());
        Self {
            running: true,
            show_help: false,
            form,
            fields,
            focus_index: 0,
            controller,
            theme,
            throbber: ThrobberState::default(),
            table_selected: 0,
            submit_requested: false,
            last_frame: Instant::now(),
        }
    }

    pub fn focused(&self) -> FormField {
        self.fields
            .get(self.focus_index)
            .copied()
            .unwrap_or(FormField::TxLat)
    }

    pub fn focus_next(&mut self) {
        self.focus_index = wrap_increment(self.focus_index, self.fields.len());
    }

    pub fn focus_prev(&mut self) {
        self.focus_index = wrap_decrement(self.focus_index, self.fields.len());
    }

    fn text_slot(&mut self, field: FormField) -> Option<&mut String> {
        let form = &mut self.form;
        match field {
            FormField::TxLat => Some(&mut form.tx_lat),
            FormField::TxLon => Some(&mut form.tx_lon),
            FormField::RxLat => Some(&mut form.rx_lat),
            FormField::RxLon => Some(&mut form.rx_lon),
            FormField::TxPower => Some(&mut form.tx_power),
            FormField::StartFreq => Some(&mut form.start_freq),
            FormField::EndFreq => Some(&mut form.end_freq),
            FormField::FreqSteps => Some(&mut form.freq_steps),
            FormField::Sfi => Some(&mut form.sfi),
            FormField::Ssn => Some(&mut form.ssn),
            FormField::Kp => Some(&mut form.kp),
            _ => None,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        let field = self.focused();
        self.text_slot(field)
    }

    pub fn push_char(&mut self, ch: char) {
        if !(ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E')) {
            return;
        }
        if let Some(slot) = self.focused_text() {
            slot.push(ch);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(slot) = self.focused_text() {
            slot.pop();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(slot) = self.focused_text() {
            slot.clear();
        }
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        let focused = self.focused();
        let form = &mut self.form;
        match focused {
            FormField::TxAntennaType => {
                form.tx_antenna_type = if forward {
                    form.tx_antenna_type.next()
                } else {
                    form.tx_antenna_type.prev()
                };
            }
            FormField::RxAntennaType => {
                form.rx_antenna_type = if forward {
                    form.rx_antenna_type.next()
                } else {
                    form.rx_antenna_type.prev()
                };
            }
            FormField::TxAntennaHeight => {
                form.tx_antenna_height = if forward {
                    form.tx_antenna_height.next()
                } else {
                    form.tx_antenna_height.prev()
                };
            }
            FormField::RxAntennaHeight => {
                form.rx_antenna_height = if forward {
                    form.rx_antenna_height.next()
                } else {
                    form.rx_antenna_height.prev()
                };
            }
            FormField::NoiseEnvironment => {
                form.noise_environment = if forward {
                    form.noise_environment.next()
                } else {
                    form.noise_environment.prev()
                };
            }
            _ => {}
        }
    }

    /// Display text for a field.
    pub fn field_value(&self, field: FormField) -> &str {
        let form = &self.form;
        match field {
            FormField::TxLat => form.tx_lat.as_str(),
            FormField::TxLon => form.tx_lon.as_str(),
            FormField::RxLat => form.rx_lat.as_str(),
            FormField::RxLon => form.rx_lon.as_str(),
            FormField::TxPower => form.tx_power.as_str(),
            FormField::StartFreq => form.start_freq.as_str(),
            FormField::EndFreq => form.end_freq.as_str(),
            FormField::FreqSteps => form.freq_steps.as_str(),
            FormField::Sfi => form.sfi.as_str(),
            FormField::Ssn => form.ssn.as_str(),
            FormField::Kp => form.kp.as_str(),
            FormField::TxAntennaType => form.tx_antenna_type.label(),
            FormField::TxAntennaHeight => form.tx_antenna_height.label(),
            FormField::RxAntennaType => form.rx_antenna_type.label(),
            FormField::RxAntennaHeight => form.rx_antenna_height.label(),
            FormField::NoiseEnvironment => form.noise_environment.label(),
        }
    }

    /// Queues a run for the event loop; ignored while the trigger is locked.
    pub fn request_submit(&mut self) {
        if self.controller.controls().trigger_enabled {
            self.submit_requested = true;
        }
    }

    pub fn scroll_table(&mut self, down: bool) {
        let rows = self.controller.view().rows.len();
        self.table_selected = if down {
            (self.table_selected + 1).min(rows.saturating_sub(1))
        } else {
            self.table_selected.saturating_sub(1)
        };
    }

    /// Advances the busy throbber while a request is in flight.
    pub fn update(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_frame) < THROBBER_STEP {
            return;
        }
        self.last_frame = now;
        if self.controller.controls().busy {
            self.throbber.calc_next();
        }
    }
}
