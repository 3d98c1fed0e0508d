use clap::Parser;

/// Serenity — a supportive wellness companion in your terminal.
#[derive(Parser, Debug)]
#[command(name = "serenity", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (e.g. "debug" or "serenity_ai=trace").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Gemini model id override.
    #[arg(long)]
    pub model: Option<String>,

    /// Show replies as they stream in instead of waiting for the whole reply.
    #[arg(long)]
    pub stream: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
