pub mod bin_stats;
pub mod config;
pub mod feed;
pub mod filter;
pub mod heatmap;
pub mod hexbin;
pub mod http_client;
pub mod normalize;
pub mod render;
pub mod sample_data;
pub mod shot;
pub mod shots_csv;
pub mod shots_fetch;
pub mod state;
pub mod tooltip;
