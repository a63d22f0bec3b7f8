use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lazyshop", version, about = "TUI for managing a product catalog")]
pub struct Args {
    /// Backend base URL (e.g., "http://localhost:8080")
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Theme name (e.g., "Catppuccin Latte")
    #[arg(short, long)]
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_are_optional() {
        let args = Args::parse_from(["lazyshop"]);
        assert!(args.base_url.is_none());
        assert!(args.theme.is_none());

        let args = Args::parse_from(["lazyshop", "--base-url", "http://shop:9000", "-t", "Catppuccin Latte"]);
        assert_eq!(args.base_url.as_deref(), Some("http://shop:9000"));
        assert_eq!(args.theme.as_deref(), Some("Catppuccin Latte"));
    }
}
