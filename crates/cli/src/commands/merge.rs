use super::SchemaArgs;
use crate::{input, GlobalOptions};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub input: SchemaArgs,

    /// Accepted for symmetry with other commands; built-in definitions are
    /// never printed
    #[arg(long)]
    pub include_builtins: bool,
}

pub async fn run(global: &GlobalOptions, args: MergeArgs) -> Result<()> {
    let loaded = input::load(global, &args.input.schemas).await?;
    tracing::debug!(
        include_builtins = args.include_builtins,
        types = loaded.schema.types.len(),
        "Merging schema"
    );
    print!("{}", loaded.schema);
    Ok(())
}
