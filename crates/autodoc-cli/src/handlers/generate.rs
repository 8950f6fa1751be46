//! Generate command handler

use super::utils::{load_manifest, pick_title};
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use std::path::Path;
use tracing::instrument;

/// Handle the generate command
#[instrument(skip_all, fields(manifest = %args.manifest.display()))]
pub fn handle_generate(args: GenerateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let target = args.output.unwrap_or_else(|| config.output.path.clone());
    let to_stdout = target == Path::new("-");
    if !to_stdout && target.is_dir() {
        return Err(Error::invalid_args(format!(
            "output path {} is a directory",
            target.display()
        )));
    }

    if !to_stdout {
        output.info(&format!("Generating documentation for {}", args.manifest.display()))?;
    }

    let manifest = load_manifest(&args.manifest)?;
    let locale = config.locale(args.lang.as_deref());
    let title = pick_title(
        args.title.as_deref(),
        &manifest.title,
        config.title.as_deref(),
    );

    if !to_stdout {
        output.debug(&format!(
            "{} models, {} endpoints, locale {}",
            manifest.catalog.len(),
            manifest.endpoints.len(),
            locale
        ))?;
        for endpoint in &manifest.endpoints {
            if !manifest.sections.contains_key(&endpoint.section_key) {
                output.warning(&format!(
                    "Endpoint '{}' uses section '{}' which has no title; the key is used instead",
                    endpoint.title, endpoint.section_key
                ))?;
            }
        }
    }

    let assembler = manifest.assembler(locale);
    let timer = Timer::with_details("generate", &target.display().to_string());

    if to_stdout {
        let doc = assembler.assemble(title, &manifest.sections, &manifest.endpoints);
        return output.write(&doc);
    }

    assembler.generate(&target, title, &manifest.sections, &manifest.endpoints)?;
    output.debug(&format!("Rendered in {:?}", timer.elapsed()))?;
    output.success(&format!("✓ Documentation written to {}", target.display()))?;
    Ok(())
}
