//! Dictionary statistics command

use anyhow::{Context, Result};
use clap::Args;
use jiedu_client::{AnalysisBackend, HttpBackend};

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Base URL of the analysis server
    #[arg(
        long,
        value_name = "URL",
        env = "JIEDU_SERVER",
        default_value = "http://localhost:5000/api"
    )]
    pub server: String,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl StatsArgs {
    /// Execute the stats command
    pub async fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        let backend = HttpBackend::new(&self.server);
        let stats = backend
            .dictionary_stats()
            .await
            .with_context(|| format!("failed to fetch dictionary stats from {}", self.server))?;

        println!("words:                  {}", stats.total_words);
        println!("entries:                {}", stats.total_entries);
        println!("multi-pinyin words:     {}", stats.words_with_multiple_pinyin);
        println!("simplified mappings:    {}", stats.simplified_mappings);
        println!("traditional mappings:   {}", stats.traditional_mappings);
        Ok(())
    }
}
