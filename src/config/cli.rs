use crate::config::site::SiteConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Parser)]
#[command(name = "lactonourish")]
#[command(about = "Browse the LactoNourish site content from the terminal")]
pub struct CliConfig {
    #[arg(long, help = "Site configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Content store endpoint; overrides the config file")]
    pub endpoint: Option<String>,

    #[arg(long, help = "Serve content from a JSON fixture instead of the store")]
    pub fixture: Option<PathBuf>,

    #[arg(long, help = "Print records as JSON")]
    pub json: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List blog posts
    Blog {
        #[arg(long, default_value = "All")]
        category: String,
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Show one blog post with related articles
    Post { id: String },
    /// List services
    Services {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Featured FAQs, latest posts and testimonials
    Home,
    /// Resolve a site path to its page
    Route { path: String },
}

impl CliConfig {
    /// File config (if any) with `--endpoint` applied on top.
    pub fn site_config(&self) -> Result<SiteConfig> {
        let mut site = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::for_endpoint(DEFAULT_ENDPOINT),
        };
        if let Some(endpoint) = &self.endpoint {
            site.store.endpoint = endpoint.clone();
        }
        Ok(site)
    }
}
