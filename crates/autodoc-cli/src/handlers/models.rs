//! Models command handler

use super::utils::load_manifest;
use crate::cli::ModelsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the models command: print the tables reachable from one type
pub fn handle_models(args: ModelsArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let manifest = load_manifest(&args.manifest)?;
    let locale = config.locale(args.lang.as_deref());

    let text = manifest.model_text(&args.model, locale)?;
    if text.is_empty() {
        return output.warning(&format!("'{}' does not contain any model", args.model));
    }
    output.writeln(&text)
}
