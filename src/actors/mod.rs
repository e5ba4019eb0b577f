pub mod portfolio;

pub use portfolio::{PortfolioActor, PortfolioArgs, PortfolioConfig, PortfolioMessage, PortfolioStats, PortfolioView};
