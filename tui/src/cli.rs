use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "questline",
    version,
    about = "Terminal client for the Questline challenge platform"
)]
pub struct Cli {
    /// Simulated backend latency for OTP verification and password resets,
    /// in milliseconds.
    #[arg(long, default_value_t = 1000, value_name = "MS")]
    pub mock_delay_ms: u64,

    /// How often the dashboard banner auto-advances, in milliseconds.
    #[arg(long, default_value_t = 5000, value_name = "MS")]
    pub carousel_interval_ms: u64,

    /// Keep the dashboard banner still; arrow keys and 1-4 still rotate it.
    #[arg(long)]
    pub no_carousel_autoplay: bool,
}
