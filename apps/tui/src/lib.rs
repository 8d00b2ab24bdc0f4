// Library half of hfprop: everything that can be tested without a terminal
pub mod config;
pub mod controller;
pub mod db;
pub mod display;
pub mod domain;
pub mod map;
pub mod sim;
pub mod theme;

pub use controller::{Banner, BannerKind, Controls, RenderResult, SimulationController};
pub use domain::{AntennaHeight, AntennaType, NoiseEnvironment, SkywaveLikelihood, StyleBucket};
pub use sim::{ClientVariant, FormValues, SimulationClient};
pub use theme::{Theme, ThemeManager};
