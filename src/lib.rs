pub mod client;
pub mod config;
pub mod entity;
pub mod generate;
pub mod model;
pub mod page;
pub mod util;

pub use client::{Client, FetchResult, Fetcher};
pub use config::Config;
pub use entity::Episode;
pub use generate::Generator;
