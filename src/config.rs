use clap::Parser;

// CLI argument structure; every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "coindash-gateway")]
#[command(about = "Caching market-data proxy for the crypto dashboard")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    // Market-data API base URL
    #[arg(
        short,
        long,
        env = "COINGECKO_API_URL",
        default_value = "https://api.coingecko.com/api/v3"
    )]
    pub upstream_url: String,

    // Cache TTL in seconds
    #[arg(short, long, env = "CACHE_TTL", default_value_t = 60)]
    pub cache_ttl: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        // clear the env overrides so the defaults are what gets parsed
        unsafe {
            std::env::remove_var("PORT");
            std::env::remove_var("COINGECKO_API_URL");
            std::env::remove_var("CACHE_TTL");
        }

        let args = Args::parse_from(["coindash-gateway"]);
        assert_eq!(args.port, 5000);
        assert_eq!(args.upstream_url, "https://api.coingecko.com/api/v3");
        assert_eq!(args.cache_ttl, 60);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "coindash-gateway",
            "--port",
            "8080",
            "--upstream-url",
            "http://localhost:9000",
            "--cache-ttl",
            "5",
        ]);
        assert_eq!(args.port, 8080);
        assert_eq!(args.upstream_url, "http://localhost:9000");
        assert_eq!(args.cache_ttl, 5);
    }
}
