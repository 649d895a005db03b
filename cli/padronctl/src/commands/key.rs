//! Company key command.

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use padron_id::{CompanyKey, KeyGenerator};
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_single;

use super::CommandContext;

/// Generate the key a company would receive.
#[derive(Debug, Args)]
pub struct KeyCommand {
    /// Company name; its first three characters become the prefix.
    name: String,

    /// Instant to key at (YYYY-MM-DDTHH:MM:SS.mmm) instead of the clock.
    #[arg(long, value_parser = parse_instant)]
    at: Option<NaiveDateTime>,
}

fn parse_instant(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map_err(|e| e.to_string())
}

#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct KeyRow {
    #[tabled(rename = "Key")]
    key: String,

    #[tabled(rename = "Prefix")]
    prefix: String,

    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

impl KeyCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let key = self.generate(ctx);
        let row = KeyRow {
            prefix: key.prefix().to_string(),
            timestamp: key
                .timestamp()
                .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
                .unwrap_or_default(),
            key: key.to_string(),
        };
        print_single(&row, ctx.format);
        Ok(())
    }

    fn generate(&self, ctx: &CommandContext) -> CompanyKey {
        match self.at {
            Some(at) => CompanyKey::generate(&self.name, at),
            None => KeyGenerator::new(ctx.config.key_clock).generate(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::output::OutputFormat;

    #[test]
    fn test_pinned_instant() {
        let ctx = CommandContext {
            config: Config::default(),
            format: OutputFormat::Json,
        };
        let cmd = KeyCommand {
            name: "previred".to_string(),
            at: Some(parse_instant("2024-01-10T22:33:44.422").unwrap()),
        };
        assert_eq!(cmd.generate(&ctx).as_str(), "pre20240110223344422");
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(parse_instant("yesterday").is_err());
    }
}
