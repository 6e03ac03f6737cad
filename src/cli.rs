use std::path::PathBuf;

use clap::Parser;

use crate::models::MintRequest;

/// Command-line form for one mint submission
#[derive(Parser, Debug)]
#[command(name = "tokensmith", version, about = "Mint a Token-2022 fungible token")]
pub struct MintArgs {
    /// Token name
    #[arg(long)]
    pub name: String,

    /// Token ticker symbol
    #[arg(long)]
    pub symbol: String,

    /// Short description embedded in the metadata document
    #[arg(long, default_value = "")]
    pub description: String,

    /// Initial supply in whole tokens
    #[arg(long)]
    pub supply: String,

    /// Number of decimal places
    #[arg(long)]
    pub decimals: String,

    /// Project website link
    #[arg(long)]
    pub website: Option<String>,

    /// Twitter handle or link
    #[arg(long)]
    pub twitter: Option<String>,

    /// Telegram link
    #[arg(long)]
    pub telegram: Option<String>,

    /// Discord invite link
    #[arg(long)]
    pub discord: Option<String>,

    /// Path to the token icon image
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Address to hand mint/freeze/update authorities to after minting
    #[arg(long)]
    pub authority: Option<String>,

    /// RPC endpoint for the target cluster
    #[arg(
        long,
        env = "RPC_ENDPOINT",
        default_value = "https://api.devnet.solana.com"
    )]
    pub rpc_endpoint: String,

    /// Storage API base URL (defaults to the hosted backend)
    #[arg(long, env = "STORAGE_API_URL")]
    pub storage_url: Option<String>,

    /// Bearer token for the storage API
    #[arg(long, env = "STORAGE_API_TOKEN", hide_env_values = true)]
    pub storage_token: Option<String>,
}

impl MintArgs {
    /// Collect the form fields into a mint request
    pub fn to_request(&self) -> MintRequest {
        MintRequest {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            description: self.description.clone(),
            supply: self.supply.clone(),
            decimals: self.decimals.clone(),
            website: self.website.clone(),
            twitter: self.twitter.clone(),
            telegram: self.telegram.clone(),
            discord: self.discord.clone(),
            image: self.image.clone(),
            authority: self.authority.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let args = MintArgs::try_parse_from([
            "tokensmith",
            "--name",
            "Foo",
            "--symbol",
            "FOO",
            "--supply",
            "10000",
            "--decimals",
            "2",
            "--image",
            "icon.png",
        ])
        .unwrap();

        let request = args.to_request();
        assert_eq!(request.name, "Foo");
        assert_eq!(request.supply, "10000");
        assert_eq!(request.image, Some(PathBuf::from("icon.png")));
        assert!(request.website.is_none());
        assert!(request.authority.is_none());
    }

    #[test]
    fn test_image_is_optional_at_parse_time() {
        // Presence is a validation concern, not a parser concern, so
        // the missing-image error can name the field like the form did
        let args = MintArgs::try_parse_from([
            "tokensmith",
            "--name",
            "Foo",
            "--symbol",
            "FOO",
            "--supply",
            "1",
            "--decimals",
            "0",
        ])
        .unwrap();
        assert!(args.to_request().image.is_none());
    }
}
