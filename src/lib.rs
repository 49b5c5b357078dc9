pub mod cache;
pub mod media;
pub mod orchestrator;
pub mod selection;
pub mod session;
pub mod settings;
pub mod sort;
pub mod tmdb;
pub mod video;
pub mod view_model;
