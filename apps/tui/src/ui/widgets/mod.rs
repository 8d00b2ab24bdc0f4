pub mod form;
pub mod map;
pub mod popup;
pub mod results;
pub mod tables;
