//! Translate command handler

use crate::cli::TranslateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the translate command (placeholder for L2)
pub async fn handle_translate(
    args: TranslateArgs,
    _config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    output.warning("⚠ The translate command is not yet implemented (L2 feature)")?;
    output.info("This command will:")?;
    output.info("  • Translate the prompt specification to provider format")?;
    output.info("  • Execute the request against the provider API")?;
    output.info("  • Return the normalized response")?;
    
    if args.stream {
        output.info("  • Support streaming responses")?;
    }
    
    Err(Error::other("translate command not yet implemented (L2)"))
}